//! Presentation layer for vault-rag
//!
//! This crate contains the CLI definition, console formatting, benchmark
//! progress reporters, the HTML dashboard and the interactive chat
//! interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod report;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::{BenchArgs, Cli, Command};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use report::HtmlDashboard;
