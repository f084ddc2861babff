//! CSV corpus reader.
//!
//! One record per row. The text column becomes [`CorpusRecord::text`];
//! every other non-empty column is kept as an attribute. A `metadata`
//! column is stored as `other_info` so it does not shadow the record's
//! own metadata map.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};
use tracing::debug;
use vault_application::{CorpusError, CorpusRecord, CorpusSource};

pub struct CsvCorpus {
    path: PathBuf,
    text_column: String,
    seed: Option<u64>,
}

impl CsvCorpus {
    pub fn new(path: impl AsRef<Path>, text_column: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            text_column: text_column.into(),
            seed: None,
        }
    }

    /// Make query sampling reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn attribute_name(column: &str) -> &str {
        if column == "metadata" {
            "other_info"
        } else {
            column
        }
    }
}

impl CorpusSource for CsvCorpus {
    fn records(&self) -> Result<Vec<CorpusRecord>, CorpusError> {
        if !self.path.exists() {
            return Err(CorpusError::NotFound(self.path.display().to_string()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| CorpusError::ReadFailed(e.to_string()))?;
        let headers = reader
            .headers()
            .map_err(|e| CorpusError::ReadFailed(e.to_string()))?
            .clone();
        let text_index = headers
            .iter()
            .position(|h| h.trim() == self.text_column)
            .ok_or_else(|| CorpusError::MissingColumn(self.text_column.clone()))?;

        let mut records = Vec::new();
        for (line, row) in reader.records().enumerate() {
            let row =
                row.map_err(|e| CorpusError::ReadFailed(format!("row {}: {}", line + 1, e)))?;
            let Some(text) = row
                .get(text_index)
                .map(str::trim)
                .filter(|t| !t.is_empty())
            else {
                continue;
            };

            let mut record = CorpusRecord::new(text);
            for (i, (header, value)) in headers.iter().zip(row.iter()).enumerate() {
                if i != text_index && !value.trim().is_empty() {
                    record =
                        record.with_attribute(Self::attribute_name(header.trim()), value.trim());
                }
            }
            records.push(record);
        }

        debug!("Read {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn sample_queries(&self, count: usize) -> Result<Vec<String>, CorpusError> {
        let texts: Vec<String> = self.records()?.into_iter().map(|r| r.text).collect();
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(texts
            .choose_multiple(&mut rng, count.min(texts.len()))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const CSV: &str = "\
text,amount,label,metadata
Wire transfer to new beneficiary,9900.00,1,first time payee
Coffee shop purchase,4.50,0,
ATM withdrawal abroad,500.00,1,card present
Salary deposit,3200.00,0,recurring
";

    fn corpus(dir: &tempfile::TempDir, body: &str) -> CsvCorpus {
        let path = dir.path().join("financial_synthetic.csv");
        std::fs::write(&path, body).unwrap();
        CsvCorpus::new(path, "text")
    }

    #[test]
    fn test_records_keep_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let records = corpus(&dir, CSV).records().unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].text, "Wire transfer to new beneficiary");
        assert_eq!(records[0].attributes["amount"], "9900.00");
        assert_eq!(records[0].attributes["label"], "1");
        assert_eq!(records[0].attributes["other_info"], "first time payee");
        assert!(!records[1].attributes.contains_key("other_info"));
    }

    #[test]
    fn test_missing_file() {
        let corpus = CsvCorpus::new("/definitely/not/here.csv", "text");
        assert!(matches!(corpus.records(), Err(CorpusError::NotFound(_))));
    }

    #[test]
    fn test_missing_text_column() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = corpus(&dir, "description,amount\nx,1\n");
        assert_eq!(
            corpus.records().unwrap_err(),
            CorpusError::MissingColumn("text".to_string())
        );
    }

    #[test]
    fn test_sample_without_replacement() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = corpus(&dir, CSV).with_seed(7);

        let sample = corpus.sample_queries(10).unwrap();
        assert_eq!(sample.len(), 4);
        let distinct: HashSet<_> = sample.iter().collect();
        assert_eq!(distinct.len(), 4);
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = corpus(&dir, CSV).with_seed(42);
        assert_eq!(
            corpus.sample_queries(2).unwrap(),
            corpus.sample_queries(2).unwrap()
        );
    }
}
