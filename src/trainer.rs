//! End-to-end training pipeline
//!
//! Loads the corpus, normalizes the essays, fits the TF-IDF feature space,
//! trains a Random Forest on the training split, evaluates on the held-out
//! split (MSE + quadratic-weighted kappa) and persists the artifact bundle.

use crate::artifact::ArtifactBundle;
use crate::data::{CorpusLoader, Dataset};
use crate::error::{Error, Result};
use crate::ml::Metrics;
use crate::models::{ForestConfig, RandomForest};
use crate::nlp::{Normalizer, TfidfVectorizer};
use ndarray::Array1;
use std::path::PathBuf;
use tracing::{info, warn};

/// Training pipeline configuration
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// TSV corpus path
    pub corpus_path: PathBuf,
    /// Destination for the artifact bundle
    pub artifact_path: PathBuf,
    /// Vocabulary cap for the TF-IDF feature space
    pub max_features: usize,
    /// Held-out evaluation fraction
    pub test_ratio: f64,
    /// Random seed for split and forest
    pub seed: u64,
    /// Number of trees
    pub n_trees: usize,
    /// Maximum tree depth
    pub max_depth: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from("training_set_rel3.tsv"),
            artifact_path: PathBuf::from("artifacts/model.json"),
            max_features: 5000,
            test_ratio: 0.2,
            seed: 42,
            n_trees: 100,
            max_depth: 10,
        }
    }
}

/// Summary of a completed training run
#[derive(Debug, Clone)]
pub struct TrainReport {
    /// Usable labeled essays in the corpus
    pub n_essays: usize,
    /// Fitted vocabulary size
    pub n_features: usize,
    /// Training subset size
    pub n_train: usize,
    /// Held-out subset size
    pub n_test: usize,
    /// Held-out MSE (None when the held-out set is empty)
    pub mse: Option<f64>,
    /// Held-out quadratic-weighted kappa (None when the held-out set is empty)
    pub kappa: Option<f64>,
}

/// Run the full training pipeline and persist the artifact bundle.
///
/// Nothing is written until training and evaluation succeed, and the final
/// write is atomic, so a failed run never leaves a partial bundle visible
/// to a scorer.
pub fn run_training(config: &TrainConfig) -> Result<TrainReport> {
    info!("Loading corpus from {:?}", config.corpus_path);
    let records = CorpusLoader::load_tsv(&config.corpus_path)?;

    if records.is_empty() {
        return Err(Error::EmptyCorpus(format!(
            "no usable labeled rows in {:?}",
            config.corpus_path
        )));
    }
    info!("Loaded {} labeled essays", records.len());

    // Normalize and vectorize
    let normalizer = Normalizer::new();
    let documents: Vec<Vec<String>> = records
        .iter()
        .map(|r| normalizer.normalize(&r.essay))
        .collect();

    let mut vectorizer = TfidfVectorizer::new(config.max_features);
    let vectors = vectorizer.fit_transform(&documents)?;
    info!("Fitted vocabulary: {} features", vectorizer.n_features());

    let labels: Vec<f64> = records.iter().map(|r| r.score.unwrap_or(0.0)).collect();
    let essay_ids: Vec<i64> = records.iter().map(|r| r.essay_id).collect();

    let dataset = Dataset::from_data(vectors, labels, vectorizer.terms().to_vec(), essay_ids);

    // Split, fit, evaluate
    let split = dataset.random_split(config.test_ratio, config.seed);
    info!(
        "Split: {} training / {} held-out",
        split.train.n_samples(),
        split.test.n_samples()
    );

    let mut model = RandomForest::new(ForestConfig {
        n_trees: config.n_trees,
        max_depth: config.max_depth,
        seed: config.seed,
        ..Default::default()
    });
    model.fit(&split.train)?;

    let (mse, kappa) = if split.test.n_samples() > 0 {
        let predictions = model.predict(&split.test);

        let mse = Metrics::mse(&split.test.labels_array(), &Array1::from_vec(predictions.clone()));

        let true_ratings: Vec<i64> = split.test.labels.iter().map(|l| l.round() as i64).collect();
        let pred_ratings = Metrics::round_to_ratings(&predictions);
        let kappa = Metrics::quadratic_weighted_kappa(&true_ratings, &pred_ratings);

        info!("Held-out MSE: {:.4}, quadratic-weighted kappa: {:.4}", mse, kappa);
        (Some(mse), Some(kappa))
    } else {
        warn!("Held-out set is empty, skipping evaluation");
        (None, None)
    };

    // Persist only after a successful run
    let bundle = ArtifactBundle::new(vectorizer, model);
    bundle.save(&config.artifact_path)?;

    Ok(TrainReport {
        n_essays: records.len(),
        n_features: bundle.vectorizer.n_features(),
        n_train: split.train.n_samples(),
        n_test: split.test.n_samples(),
        mse,
        kappa,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_toy_corpus(path: &std::path::Path, repeats: usize) {
        let mut file = std::fs::File::create(path).unwrap();
        writeln!(file, "essay_id\tessay_set\tessay\tdomain1_score").unwrap();

        let templates = [
            ("short choppy words nothing else here", 2),
            ("structured argument with clear evidence supporting every claim made", 4),
            ("eloquent sophisticated vocabulary demonstrating masterful command rhetorical flourish", 6),
        ];

        let mut id = 1;
        for _ in 0..repeats {
            for (text, score) in &templates {
                writeln!(file, "{}\t1\t{}\t{}", id, text, score).unwrap();
                id += 1;
            }
        }
    }

    #[test]
    fn test_training_pipeline_produces_bundle_and_metrics() {
        let dir = tempdir().unwrap();
        let corpus_path = dir.path().join("corpus.tsv");
        let artifact_path = dir.path().join("artifacts").join("model.json");
        write_toy_corpus(&corpus_path, 10);

        let config = TrainConfig {
            corpus_path: corpus_path.clone(),
            artifact_path: artifact_path.clone(),
            max_features: 100,
            test_ratio: 0.2,
            seed: 42,
            n_trees: 20,
            max_depth: 8,
        };

        let report = run_training(&config).unwrap();

        assert_eq!(report.n_essays, 30);
        assert_eq!(report.n_train, 24);
        assert_eq!(report.n_test, 6);
        assert!(artifact_path.exists());

        // Duplicated templates make the held-out set trivially predictable
        assert!(report.mse.unwrap() < 1.0);
        assert!(report.kappa.unwrap() > 0.5);
    }

    #[test]
    fn test_empty_corpus_fails_without_artifact() {
        let dir = tempdir().unwrap();
        let corpus_path = dir.path().join("corpus.tsv");
        let artifact_path = dir.path().join("model.json");

        std::fs::write(&corpus_path, "essay_id\tessay_set\tessay\tdomain1_score\n").unwrap();

        let config = TrainConfig {
            corpus_path,
            artifact_path: artifact_path.clone(),
            ..Default::default()
        };

        let err = run_training(&config).unwrap_err();
        assert!(matches!(err, Error::EmptyCorpus(_)));
        assert!(!artifact_path.exists());
    }
}
