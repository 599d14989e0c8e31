//! Error types for the essay scoring library

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or missing essay text
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No usable documents to fit the feature space on
    #[error("Empty corpus: {0}")]
    EmptyCorpus(String),

    /// No usable samples to fit the model on
    #[error("Empty training set: {0}")]
    EmptyTrainingSet(String),

    /// No trained artifact bundle available yet
    #[error("Artifact bundle missing: {0}")]
    ArtifactMissing(String),

    /// Artifact bundle unreadable or internally inconsistent
    #[error("Artifact bundle corrupt: {0}")]
    ArtifactCorrupt(String),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
