//! Data structures and corpus loading module
//!
//! Provides the raw essay record type, the TSV corpus loader and the
//! feature/label dataset used for training.

mod dataset;
mod loader;
mod types;

pub use dataset::{Dataset, Split};
pub use loader::CorpusLoader;
pub use types::EssayRecord;
