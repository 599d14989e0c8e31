//! TF-IDF vectorization
//!
//! Converts normalized token sequences into fixed-length numeric vectors.
//! The vocabulary and idf weights are fitted once over the training corpus
//! and then frozen: `transform` only ever reads the fitted state, so the
//! feature space at serving time is identical to the one used for training.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// TF-IDF vectorizer with a serializable fitted state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Vocabulary cap
    max_features: usize,
    /// Terms in index order (lexically sorted)
    terms: Vec<String>,
    /// Term -> feature index
    vocabulary: HashMap<String, usize>,
    /// Smoothed inverse document frequency per feature index
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Create an unfitted vectorizer with the given vocabulary cap
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features,
            terms: Vec::new(),
            vocabulary: HashMap::new(),
            idf: Vec::new(),
        }
    }

    /// Number of features (vocabulary size after fitting)
    pub fn n_features(&self) -> usize {
        self.terms.len()
    }

    /// Vocabulary cap this vectorizer was configured with
    pub fn max_features(&self) -> usize {
        self.max_features
    }

    /// Fitted terms in feature-index order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Fit the vocabulary and idf weights on a corpus, then transform it.
    ///
    /// Terms are ranked by corpus-wide frequency with ties broken by lexical
    /// order, capped at `max_features`, and assigned indices in lexical
    /// order, so fitting is fully deterministic.
    pub fn fit_transform(&mut self, corpus: &[Vec<String>]) -> Result<Vec<Vec<f64>>> {
        if corpus.is_empty() {
            return Err(Error::EmptyCorpus(
                "cannot fit TF-IDF on an empty corpus".to_string(),
            ));
        }

        // Corpus-wide term counts and document frequencies
        let mut term_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for document in corpus {
            for term in document {
                *term_counts.entry(term.clone()).or_insert(0) += 1;
            }
            let unique: HashSet<&String> = document.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
        }

        // Rank by frequency descending, lexical ascending on ties
        let mut ranked: Vec<(String, usize)> = term_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        // Feature indices follow lexical order of the selected terms
        self.terms = ranked.into_iter().map(|(term, _)| term).collect();
        self.terms.sort();

        self.vocabulary = self
            .terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        // Smoothed idf: ln((1 + n) / (1 + df)) + 1
        let n_docs = corpus.len() as f64;
        self.idf = self
            .terms
            .iter()
            .map(|term| {
                let df = *doc_freq.get(term).unwrap_or(&0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        Ok(corpus.iter().map(|doc| self.transform(doc)).collect())
    }

    /// Transform a document against the fitted vocabulary.
    ///
    /// Tokens outside the vocabulary contribute zero; the idf weights are
    /// never re-estimated here. The output length always equals
    /// `n_features`, including for documents with no recognized tokens.
    pub fn transform(&self, document: &[String]) -> Vec<f64> {
        let mut vector = vec![0.0; self.terms.len()];

        for term in document {
            if let Some(&idx) = self.vocabulary.get(term) {
                vector[idx] += 1.0;
            }
        }

        for (idx, weight) in vector.iter_mut().enumerate() {
            *weight *= self.idf[idx];
        }

        l2_normalize(&mut vector);
        vector
    }
}

/// L2 normalization in place; zero vectors stay zero
fn l2_normalize(vector: &mut [f64]) {
    let norm: f64 = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}
