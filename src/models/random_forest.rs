//! Random Forest regressor (bagged decision trees)

use super::decision_tree::{DecisionTree, TreeConfig};
use crate::data::Dataset;
use crate::error::{Error, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Random Forest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the forest
    pub n_trees: usize,
    /// Maximum depth of each tree
    pub max_depth: usize,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf
    pub min_samples_leaf: usize,
    /// Max features per split (n_features / 3 if None)
    pub max_features: Option<usize>,
    /// Bootstrap sampling
    pub bootstrap: bool,
    /// Random seed
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: None,
            bootstrap: true,
            seed: 42,
        }
    }
}

/// Random Forest regression model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    trees: Vec<DecisionTree>,
    feature_names: Vec<String>,
    feature_importances: Vec<f64>,
}

impl RandomForest {
    /// Create a new random forest
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            feature_names: Vec::new(),
            feature_importances: Vec::new(),
        }
    }

    /// Train the random forest.
    ///
    /// Tree construction is parallelized internally; each tree derives its
    /// own seed from the configured one, so results are reproducible
    /// regardless of thread scheduling.
    pub fn fit(&mut self, dataset: &Dataset) -> Result<()> {
        if dataset.n_samples() == 0 {
            return Err(Error::EmptyTrainingSet(
                "cannot fit a forest on zero samples".to_string(),
            ));
        }

        self.feature_names = dataset.feature_names.clone();
        let n_features = dataset.n_features();

        let max_features = self
            .config
            .max_features
            .unwrap_or_else(|| (n_features / 3).max(1));

        let trees: Vec<DecisionTree> = (0..self.config.n_trees)
            .into_par_iter()
            .map(|i| {
                let tree_config = TreeConfig {
                    max_depth: self.config.max_depth,
                    min_samples_split: self.config.min_samples_split,
                    min_samples_leaf: self.config.min_samples_leaf,
                    max_features: Some(max_features),
                    seed: self.config.seed.wrapping_add(i as u64),
                };

                let mut tree = DecisionTree::new(tree_config);

                if self.config.bootstrap {
                    let sample = dataset.bootstrap_sample(self.config.seed.wrapping_add(i as u64));
                    tree.fit(&sample);
                } else {
                    tree.fit(dataset);
                }

                tree
            })
            .collect();

        self.trees = trees;

        // Aggregate feature importances
        self.feature_importances = vec![0.0; n_features];
        for tree in &self.trees {
            for (i, &imp) in tree.feature_importances().iter().enumerate() {
                self.feature_importances[i] += imp;
            }
        }

        let sum: f64 = self.feature_importances.iter().sum();
        if sum > 0.0 {
            for imp in &mut self.feature_importances {
                *imp /= sum;
            }
        }

        Ok(())
    }

    /// Predict for a single sample (mean over trees)
    pub fn predict_one(&self, features: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }

        let sum: f64 = self.trees.iter().map(|t| t.predict_one(features)).sum();
        sum / self.trees.len() as f64
    }

    /// Predict for multiple samples
    pub fn predict(&self, dataset: &Dataset) -> Vec<f64> {
        dataset
            .features
            .par_iter()
            .map(|f| self.predict_one(f))
            .collect()
    }

    /// Number of features the forest was fitted on
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Number of trees
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Get feature importances
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    /// Get feature names with importances, sorted by importance
    pub fn feature_importance_ranking(&self) -> Vec<(&str, f64)> {
        let mut ranking: Vec<(&str, f64)> = self
            .feature_names
            .iter()
            .zip(self.feature_importances.iter())
            .map(|(n, &i)| (n.as_str(), i))
            .collect();

        ranking.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
        ranking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave_dataset() -> Dataset {
        let mut dataset = Dataset::new(vec!["x1".to_string(), "x2".to_string()]);
        for i in 0..200 {
            let x1 = (i as f64) / 20.0;
            let x2 = ((i as f64) / 10.0).sin();
            let y = x1 + x2 * 2.0;
            dataset.add_sample(vec![x1, x2], y, i as i64);
        }
        dataset
    }

    #[test]
    fn test_forest_regression() {
        let dataset = wave_dataset();

        let mut forest = RandomForest::new(ForestConfig {
            n_trees: 10,
            max_depth: 5,
            ..Default::default()
        });

        forest.fit(&dataset).unwrap();

        assert_eq!(forest.n_trees(), 10);
        assert_eq!(forest.n_features(), 2);
        assert_eq!(forest.feature_importances().len(), 2);
        assert_eq!(forest.predict(&dataset).len(), 200);
    }

    #[test]
    fn test_empty_training_set_fails() {
        let dataset = Dataset::new(vec!["x".to_string()]);
        let mut forest = RandomForest::new(ForestConfig::default());

        let err = forest.fit(&dataset).unwrap_err();
        assert!(matches!(err, Error::EmptyTrainingSet(_)));
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let dataset = wave_dataset();

        let config = ForestConfig {
            n_trees: 5,
            seed: 17,
            ..Default::default()
        };

        let mut a = RandomForest::new(config.clone());
        let mut b = RandomForest::new(config);
        a.fit(&dataset).unwrap();
        b.fit(&dataset).unwrap();

        assert_eq!(a.predict(&dataset), b.predict(&dataset));
    }

    #[test]
    fn test_exact_fit_without_bootstrap() {
        // Three samples with disjoint active features; with bootstrap off
        // and all features available every tree fits the data exactly
        let mut dataset = Dataset::new(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        dataset.add_sample(vec![1.0, 0.0, 0.0], 2.0, 1);
        dataset.add_sample(vec![0.0, 1.0, 0.0], 4.0, 2);
        dataset.add_sample(vec![0.0, 0.0, 1.0], 6.0, 3);

        let mut forest = RandomForest::new(ForestConfig {
            n_trees: 10,
            max_depth: 5,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: Some(3),
            bootstrap: false,
            ..Default::default()
        });
        forest.fit(&dataset).unwrap();

        assert!((forest.predict_one(&[1.0, 0.0, 0.0]) - 2.0).abs() < 1e-9);
        assert!((forest.predict_one(&[0.0, 0.0, 1.0]) - 6.0).abs() < 1e-9);
    }
}
