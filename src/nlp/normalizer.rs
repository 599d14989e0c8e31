//! Text normalization
//!
//! Turns raw essay text into a canonical token sequence. The steps run in a
//! fixed order, each feeding the next:
//!
//! 1. Remove every character outside the Latin alphabet and whitespace
//! 2. Lowercase the remainder
//! 3. Split into tokens on whitespace
//! 4. Drop English stopwords
//!
//! No stemming or lemmatization. The normalizer is stateless, so identical
//! input always yields the identical token sequence.

use crate::nlp::stopwords::is_stopword;
use regex::Regex;
use std::sync::LazyLock;

static NON_ALPHA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z\s]").unwrap());

/// Deterministic text normalizer
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize raw text into an ordered token sequence.
    ///
    /// An empty or all-stopword input normalizes to an empty sequence,
    /// which is valid input to the vectorizer, not an error.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let cleaned = NON_ALPHA.replace_all(text, "");
        let lowered = cleaned.to_lowercase();

        lowered
            .split_whitespace()
            .filter(|token| !is_stopword(token))
            .map(|token| token.to_string())
            .collect()
    }
}
