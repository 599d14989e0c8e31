//! Corpus loading utilities
//!
//! Loads the tab-separated essay corpus. The source files are encoded as
//! ISO-8859-1 (a Latin-1 superset of ASCII), so the bytes are decoded
//! tolerantly instead of assuming UTF-8.

use crate::data::types::EssayRecord;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Loader for the tab-separated essay corpus
pub struct CorpusLoader;

impl CorpusLoader {
    /// Load labeled essay records from a TSV file.
    ///
    /// Expects at least the columns `essay_id`, `essay_set`, `essay` and
    /// `domain1_score`. Rows missing the essay text or the score are
    /// excluded from the result, not treated as errors.
    pub fn load_tsv<P: AsRef<Path>>(path: P) -> Result<Vec<EssayRecord>> {
        let bytes = fs::read(&path)?;
        let text = Self::decode_latin1_tolerant(&bytes);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let col = |name: &str| headers.iter().position(|h| h == name);

        let essay_id_col = col("essay_id");
        let essay_set_col = col("essay_set");
        let essay_col = col("essay").ok_or_else(|| {
            Error::EmptyCorpus(format!(
                "corpus {:?} has no 'essay' column",
                path.as_ref()
            ))
        })?;
        let score_col = col("domain1_score").ok_or_else(|| {
            Error::EmptyCorpus(format!(
                "corpus {:?} has no 'domain1_score' column",
                path.as_ref()
            ))
        })?;

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for (row_idx, result) in reader.records().enumerate() {
            let row = result?;

            let essay = row.get(essay_col).unwrap_or("").trim();
            let score = row.get(score_col).and_then(|s| s.trim().parse::<f64>().ok());

            let (essay, score) = match (essay.is_empty(), score) {
                (false, Some(score)) => (essay, score),
                _ => {
                    skipped += 1;
                    continue;
                }
            };

            let parse_id = |idx: Option<usize>| -> i64 {
                idx.and_then(|i| row.get(i))
                    .and_then(|s| s.trim().parse().ok())
                    .unwrap_or(row_idx as i64)
            };

            records.push(EssayRecord::labeled(
                parse_id(essay_id_col),
                parse_id(essay_set_col),
                essay,
                score,
            ));
        }

        if skipped > 0 {
            warn!("Skipped {} rows with missing essay or score", skipped);
        }
        debug!("Loaded {} labeled essays from {:?}", records.len(), path.as_ref());

        Ok(records)
    }

    /// Decode bytes as UTF-8 when valid, otherwise as ISO-8859-1.
    ///
    /// Latin-1 maps every byte to the Unicode code point of the same value,
    /// so the fallback never fails.
    fn decode_latin1_tolerant(bytes: &[u8]) -> String {
        match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => bytes.iter().map(|&b| b as char).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_corpus(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_basic_corpus() {
        let file = write_corpus(
            b"essay_id\tessay_set\tessay\tdomain1_score\n\
              1\t1\tThe cats sat quietly\t4\n\
              2\t1\tDogs barked loudly outside\t6\n",
        );

        let records = CorpusLoader::load_tsv(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].essay_id, 1);
        assert_eq!(records[0].score, Some(4.0));
        assert_eq!(records[1].essay, "Dogs barked loudly outside");
    }

    #[test]
    fn test_rows_missing_essay_or_score_are_excluded() {
        let file = write_corpus(
            b"essay_id\tessay_set\tessay\tdomain1_score\n\
              1\t1\tValid essay text\t3\n\
              2\t1\t\t5\n\
              3\t1\tNo score here\t\n\
              4\t1\tAnother valid essay\t2\n",
        );

        let records = CorpusLoader::load_tsv(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].essay_id, 1);
        assert_eq!(records[1].essay_id, 4);
    }

    #[test]
    fn test_tolerates_latin1_bytes() {
        // "café" with a Latin-1 encoded é (0xE9) - not valid UTF-8
        let file = write_corpus(
            b"essay_id\tessay_set\tessay\tdomain1_score\n\
              1\t1\tA caf\xe9 on the corner\t5\n",
        );

        let records = CorpusLoader::load_tsv(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].essay.contains('\u{e9}'));
    }

    #[test]
    fn test_missing_required_column_fails() {
        let file = write_corpus(b"essay_id\tessay\n1\tsome text\n");
        let err = CorpusLoader::load_tsv(file.path()).unwrap_err();
        assert!(matches!(err, Error::EmptyCorpus(_)));
    }
}
