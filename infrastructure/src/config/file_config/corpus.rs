//! Corpus configuration from TOML (`[corpus]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCorpusConfig {
    /// CSV file of records
    pub path: String,
    /// Column holding the searchable text
    pub text_column: String,
}

impl Default for FileCorpusConfig {
    fn default() -> Self {
        Self {
            path: "data/financial_synthetic.csv".to_string(),
            text_column: "text".to_string(),
        }
    }
}
