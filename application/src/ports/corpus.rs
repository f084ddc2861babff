//! Corpus port
//!
//! Source of the records indexed by local backends and of the benchmark
//! queries.

use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur while reading the corpus
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorpusError {
    #[error("Corpus not found: {0}")]
    NotFound(String),

    #[error("Failed to read corpus: {0}")]
    ReadFailed(String),

    #[error("Corpus has no '{0}' column")]
    MissingColumn(String),
}

/// One corpus record: searchable text plus its other columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusRecord {
    pub text: String,
    pub attributes: BTreeMap<String, String>,
}

impl CorpusRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Readable corpus of records
pub trait CorpusSource: Send + Sync {
    /// All records, in file order
    fn records(&self) -> Result<Vec<CorpusRecord>, CorpusError>;

    /// Up to `count` distinct record texts, sampled at random
    fn sample_queries(&self, count: usize) -> Result<Vec<String>, CorpusError>;
}
