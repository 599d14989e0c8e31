//! # Essay ML - Automated Essay Scoring
//!
//! This library learns a mapping from lexical features to human-assigned
//! essay scores and reproduces that mapping at inference time.
//!
//! ## Modules
//!
//! - `data` - Corpus loading and dataset structures
//! - `nlp` - Text normalization and TF-IDF feature extraction
//! - `models` - Decision Tree and Random Forest regressors
//! - `ml` - Evaluation metrics (MSE, quadratic-weighted kappa)
//! - `artifact` - Atomic persistence of the fitted feature space + model
//! - `trainer` - End-to-end training pipeline
//! - `scorer` - Loading the artifact bundle and scoring new essays
//!
//! The fitted vocabulary and idf weights are persisted together with the
//! trained model and reused verbatim when scoring, so the feature space
//! never drifts between training and serving.

pub mod artifact;
pub mod data;
pub mod error;
pub mod ml;
pub mod models;
pub mod nlp;
pub mod scorer;
pub mod trainer;

pub use artifact::ArtifactBundle;
pub use data::{CorpusLoader, Dataset, EssayRecord};
pub use error::{Error, Result};
pub use ml::Metrics;
pub use models::{DecisionTree, RandomForest};
pub use nlp::{Normalizer, TfidfVectorizer};
pub use scorer::ScorerHandle;
pub use trainer::{run_training, TrainConfig, TrainReport};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::artifact::ArtifactBundle;
    pub use crate::data::{CorpusLoader, Dataset, EssayRecord, Split};
    pub use crate::error::{Error, Result};
    pub use crate::ml::Metrics;
    pub use crate::models::{DecisionTree, ForestConfig, RandomForest, TreeConfig};
    pub use crate::nlp::{Normalizer, TfidfVectorizer};
    pub use crate::scorer::ScorerHandle;
    pub use crate::trainer::{run_training, TrainConfig, TrainReport};
}
