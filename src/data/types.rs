//! Core data types for the essay corpus

use serde::{Deserialize, Serialize};

/// A single essay row from the training corpus.
///
/// Immutable once loaded; the ground-truth score is only present for
/// rows that came with a human grade attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EssayRecord {
    /// Unique essay identifier
    pub essay_id: i64,
    /// Prompt/essay-set identifier
    pub essay_set: i64,
    /// Raw essay text
    pub essay: String,
    /// Human-assigned score (domain 1)
    pub score: Option<f64>,
}

impl EssayRecord {
    /// Create a labeled record
    pub fn labeled(essay_id: i64, essay_set: i64, essay: impl Into<String>, score: f64) -> Self {
        Self {
            essay_id,
            essay_set,
            essay: essay.into(),
            score: Some(score),
        }
    }

    /// Whether this row can be used for training
    pub fn is_trainable(&self) -> bool {
        self.score.is_some() && !self.essay.trim().is_empty()
    }
}
