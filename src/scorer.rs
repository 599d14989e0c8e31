//! Scoring of new essays against a persisted artifact bundle
//!
//! The handle owns the fitted feature space and the trained model as
//! immutable state loaded once; `score` is a pure function of the handle
//! and the input text, so concurrent scoring needs no locking.

use crate::artifact::ArtifactBundle;
use crate::error::{Error, Result};
use crate::models::RandomForest;
use crate::nlp::{Normalizer, TfidfVectorizer};
use std::path::Path;
use tracing::debug;

/// Immutable handle over the loaded feature space and model
#[derive(Debug, Clone)]
pub struct ScorerHandle {
    vectorizer: TfidfVectorizer,
    model: RandomForest,
    normalizer: Normalizer,
}

impl ScorerHandle {
    /// Load the persisted artifact bundle.
    ///
    /// Fails with `ArtifactMissing` when no bundle exists yet and
    /// `ArtifactCorrupt` when the bundle is unreadable or the
    /// vocabulary/model pairing is inconsistent.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bundle = ArtifactBundle::load(path)?;
        Ok(Self::from_bundle(bundle))
    }

    /// Build a handle from an in-memory bundle (consistency re-checked)
    pub fn from_bundle(bundle: ArtifactBundle) -> Self {
        Self {
            vectorizer: bundle.vectorizer,
            model: bundle.model,
            normalizer: Normalizer::new(),
        }
    }

    /// Score one essay, rounded to 2 decimal places.
    ///
    /// Runs normalize -> transform (fitted vocabulary only) -> predict.
    /// Empty or whitespace-only input is `InvalidInput`.
    pub fn score(&self, essay_text: &str) -> Result<f64> {
        if essay_text.trim().is_empty() {
            return Err(Error::InvalidInput("no essay text provided".to_string()));
        }

        let tokens = self.normalizer.normalize(essay_text);
        let features = self.vectorizer.transform(&tokens);
        let estimate = self.model.predict_one(&features);

        debug!("Scored essay: {} tokens -> {:.4}", tokens.len(), estimate);

        Ok((estimate * 100.0).round() / 100.0)
    }

    /// Transform an essay into its feature vector without predicting.
    ///
    /// Exposed so train/serve parity can be verified against the same
    /// vocabulary the model was fitted with.
    pub fn transform(&self, essay_text: &str) -> Vec<f64> {
        let tokens = self.normalizer.normalize(essay_text);
        self.vectorizer.transform(&tokens)
    }

    /// Feature-vector length of the loaded feature space
    pub fn n_features(&self) -> usize {
        self.vectorizer.n_features()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use crate::models::ForestConfig;

    fn toy_handle() -> ScorerHandle {
        let normalizer = Normalizer::new();
        let corpus: Vec<Vec<String>> = [
            "The cats sat on the mat purring softly",
            "Dogs barked loudly at the mail carrier",
        ]
        .iter()
        .map(|t| normalizer.normalize(t))
        .collect();

        let mut vectorizer = TfidfVectorizer::new(50);
        let vectors = vectorizer.fit_transform(&corpus).unwrap();

        let dataset = Dataset::from_data(
            vectors,
            vec![2.0, 4.0],
            vectorizer.terms().to_vec(),
            vec![1, 2],
        );

        let mut model = RandomForest::new(ForestConfig {
            n_trees: 5,
            min_samples_split: 2,
            min_samples_leaf: 1,
            bootstrap: false,
            ..Default::default()
        });
        model.fit(&dataset).unwrap();

        ScorerHandle::from_bundle(ArtifactBundle::new(vectorizer, model))
    }

    #[test]
    fn test_empty_essay_is_invalid_input() {
        let handle = toy_handle();

        let err = handle.score("").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = handle.score("   \n\t ").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_score_recovers_training_label() {
        // Without bootstrap every tree fits the two training essays
        // exactly, so the first one scores its own label
        let handle = toy_handle();
        let score = handle.score("The cats sat on the mat purring softly").unwrap();
        assert!((score - 2.0).abs() < 1e-9);
        assert_eq!(score, (score * 100.0).round() / 100.0);
    }

    #[test]
    fn test_unrecognized_vocabulary_still_scores() {
        // Every token out of vocabulary: the zero vector is valid input
        // and yields some finite estimate
        let handle = toy_handle();
        let score = handle.score("quasar nebula pulsar").unwrap();
        assert!(score.is_finite());
    }
}
