//! Dataset structure for model training

use ndarray::{Array1, Array2};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Dataset of feature vectors and target scores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Feature matrix (n_samples x n_features)
    pub features: Vec<Vec<f64>>,
    /// Target scores
    pub labels: Vec<f64>,
    /// Feature names (vocabulary terms)
    pub feature_names: Vec<String>,
    /// Essay ids for each sample
    pub essay_ids: Vec<i64>,
}

/// Train/test split result
pub struct Split {
    pub train: Dataset,
    pub test: Dataset,
}

impl Dataset {
    /// Create a new empty dataset
    pub fn new(feature_names: Vec<String>) -> Self {
        Self {
            features: Vec::new(),
            labels: Vec::new(),
            feature_names,
            essay_ids: Vec::new(),
        }
    }

    /// Create dataset from raw data
    pub fn from_data(
        features: Vec<Vec<f64>>,
        labels: Vec<f64>,
        feature_names: Vec<String>,
        essay_ids: Vec<i64>,
    ) -> Self {
        Self {
            features,
            labels,
            feature_names,
            essay_ids,
        }
    }

    /// Number of samples
    pub fn n_samples(&self) -> usize {
        self.features.len()
    }

    /// Number of features
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Add a sample
    pub fn add_sample(&mut self, features: Vec<f64>, label: f64, essay_id: i64) {
        assert_eq!(features.len(), self.feature_names.len());
        self.features.push(features);
        self.labels.push(label);
        self.essay_ids.push(essay_id);
    }

    /// Get labels as ndarray
    pub fn labels_array(&self) -> Array1<f64> {
        Array1::from_vec(self.labels.clone())
    }

    /// Get feature matrix as ndarray
    pub fn features_array(&self) -> Array2<f64> {
        let n_samples = self.n_samples();
        let n_features = self.n_features();

        if n_samples == 0 {
            return Array2::zeros((0, n_features));
        }

        Array2::from_shape_fn((n_samples, n_features), |(i, j)| self.features[i][j])
    }

    /// Shuffle and split into train and test sets.
    ///
    /// Essays carry no temporal ordering, so a seeded random shuffle keeps
    /// both subsets representative while staying reproducible.
    pub fn random_split(&self, test_ratio: f64, seed: u64) -> Split {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let n = self.n_samples();

        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(&mut rng);

        let test_size = (test_ratio * n as f64) as usize;
        let (test_indices, train_indices) = indices.split_at(test_size);

        let train = self.subset(train_indices);
        let test = self.subset(test_indices);

        Split { train, test }
    }

    /// Create a subset of the dataset by indices
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            features: indices.iter().map(|&i| self.features[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
            feature_names: self.feature_names.clone(),
            essay_ids: indices.iter().map(|&i| self.essay_ids[i]).collect(),
        }
    }

    /// Bootstrap sample (random sample with replacement)
    pub fn bootstrap_sample(&self, seed: u64) -> Dataset {
        use rand::Rng;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let n = self.n_samples();

        let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
        self.subset(&indices)
    }
}
