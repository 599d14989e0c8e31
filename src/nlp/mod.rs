//! Natural language processing module
//!
//! Provides:
//! - Text normalization (cleaning, tokenization, stopword removal)
//! - TF-IDF vectorization with a persistable fitted state

mod normalizer;
mod stopwords;
mod vectorizer;

pub use normalizer::Normalizer;
pub use stopwords::is_stopword;
pub use vectorizer::TfidfVectorizer;
