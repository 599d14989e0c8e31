//! Artifact bundle persistence
//!
//! The fitted feature space and the trained model are persisted as one
//! bundle and always loaded together. Loading one without the matching
//! other is an invalid state, so the pairing is cross-checked at load time.

use crate::error::{Error, Result};
use crate::models::RandomForest;
use crate::nlp::TfidfVectorizer;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use tracing::info;

/// The jointly persisted feature-space state and trained model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactBundle {
    /// Fitted TF-IDF state: vocabulary, idf weights, max_features
    pub vectorizer: TfidfVectorizer,
    /// Trained ensemble regressor
    pub model: RandomForest,
}

impl ArtifactBundle {
    pub fn new(vectorizer: TfidfVectorizer, model: RandomForest) -> Self {
        Self { vectorizer, model }
    }

    /// Persist the bundle atomically.
    ///
    /// Writes to a temporary file in the destination directory and commits
    /// with a rename, so a concurrent `load` never observes a half-written
    /// bundle and a failed run leaves no partial artifact behind.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::InvalidInput(format!("invalid artifact path {:?}", path)))?;
        let tmp_path = path.with_file_name(format!("{}.tmp", file_name));

        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, self)?;
            writer.flush()?;
        }

        fs::rename(&tmp_path, path)?;
        info!("Artifact bundle saved to {:?}", path);

        Ok(())
    }

    /// Load a persisted bundle and verify its internal consistency.
    ///
    /// A missing file is `ArtifactMissing`; unreadable bytes or a
    /// vocabulary/model feature-length mismatch are `ArtifactCorrupt`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                Error::ArtifactMissing(format!("no trained bundle at {:?}", path))
            }
            _ => Error::Io(e),
        })?;

        let bundle: ArtifactBundle = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::ArtifactCorrupt(format!("unreadable bundle at {:?}: {}", path, e)))?;

        bundle.verify()?;
        Ok(bundle)
    }

    /// Check that the feature space and the model agree on vector length
    pub fn verify(&self) -> Result<()> {
        let vocab_len = self.vectorizer.n_features();
        let model_len = self.model.n_features();

        if vocab_len != model_len {
            return Err(Error::ArtifactCorrupt(format!(
                "feature-space mismatch: vocabulary has {} features, model expects {}",
                vocab_len, model_len
            )));
        }

        Ok(())
    }
}
