//! Presentation-level configuration
//!
//! Configuration for terminal output and REPL behavior.

use std::path::PathBuf;

/// Output configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Show progress bars during benchmark runs
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// Apply the color setting process-wide
    pub fn apply(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Default)]
pub struct ReplConfig {
    /// Path to history file
    pub history_file: Option<String>,
}

impl ReplConfig {
    /// Explicit history file, else `<data dir>/vault-rag/history.txt`
    pub fn history_path(&self) -> Option<PathBuf> {
        match &self.history_file {
            Some(path) => Some(PathBuf::from(path)),
            None => dirs::data_dir().map(|p| p.join("vault-rag").join("history.txt")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_history_path_wins() {
        let config = ReplConfig {
            history_file: Some("/tmp/vault-history".to_string()),
        };
        assert_eq!(
            config.history_path(),
            Some(PathBuf::from("/tmp/vault-history"))
        );
    }

    #[test]
    fn test_default_history_path_under_data_dir() {
        let config = ReplConfig::default();
        if let Some(path) = config.history_path() {
            assert!(path.ends_with("vault-rag/history.txt"));
        }
    }
}
