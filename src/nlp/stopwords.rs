//! Fixed English stopword set
//!
//! Compiled into the binary so normalization never depends on a runtime
//! resource fetch. The list matches the standard NLTK English stopwords.

use std::collections::HashSet;
use std::sync::LazyLock;

/// English stopwords, lowercase
pub const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "youre", "youve",
    "youll", "youd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "shes", "her", "hers", "herself", "it", "its", "itself", "they", "them", "their",
    "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "thatll", "these",
    "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then",
    "once", "here", "there", "when", "where", "why", "how", "all", "any", "both", "each",
    "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same",
    "so", "than", "too", "very", "s", "t", "can", "will", "just", "don", "dont", "should",
    "shouldve", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "arent", "couldn",
    "couldnt", "didn", "didnt", "doesn", "doesnt", "hadn", "hadnt", "hasn", "hasnt", "haven",
    "havent", "isn", "isnt", "ma", "mightn", "mightnt", "mustn", "mustnt", "needn", "neednt",
    "shan", "shant", "shouldn", "shouldnt", "wasn", "wasnt", "weren", "werent", "won", "wont",
    "wouldn", "wouldnt",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Whether a lowercase token is an English stopword
pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_stopwords() {
        assert!(is_stopword("the"));
        assert!(is_stopword("and"));
        assert!(is_stopword("is"));
    }

    #[test]
    fn test_content_words_pass() {
        assert!(!is_stopword("cats"));
        assert!(!is_stopword("essay"));
    }

    #[test]
    fn test_list_is_lowercase_and_unique() {
        let set: HashSet<_> = STOPWORDS.iter().collect();
        assert_eq!(set.len(), STOPWORDS.len());
        assert!(STOPWORDS.iter().all(|w| *w == w.to_lowercase()));
    }
}
