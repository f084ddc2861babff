//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for vault-rag
#[derive(Parser, Debug)]
#[command(name = "vault-rag")]
#[command(
    author,
    version,
    about = "Multi-backend retrieval benchmark and fraud-analyst chat"
)]
#[command(long_about = r#"
vault-rag sends every query to several similarity-search backends
(in-memory, disk-persisted, encrypted) and answers with the evidence of
the primary backend, recording the latency of each.

Configuration files are loaded from (in priority order):
1. --config <path>                     Explicit config file
2. ./vault-rag.toml or ./.vault-rag.toml  Project-level config
3. ~/.config/vault-rag/config.toml     Global config
Environment variables prefixed VAULT_RAG_ override all files
(use __ between nested keys, e.g. VAULT_RAG_RETRIEVAL__TOP_K=3).

Example:
  vault-rag chat
  vault-rag ask "Show me suspicious wire transfers over 10k"
  vault-rag bench --concurrency 10 --sample-size 200
  vault-rag index --output data/disk_index.json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write diagnostic logs to this file in addition to stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Start an interactive chat session (default)
    Chat,

    /// Handle a single message and print the JSON response
    Ask {
        /// The message to send
        message: String,
    },

    /// Run the retrieval benchmark and write the HTML dashboard
    Bench(BenchArgs),

    /// Build the disk-persisted index from the corpus
    Index {
        /// Where to write the index (defaults to `[backends.disk] path`)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Overrides for the `[benchmark]` section
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct BenchArgs {
    /// Number of concurrent workers in the timed phase
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Maximum number of timed queries
    #[arg(short = 'n', long)]
    pub sample_size: Option<usize>,

    /// Untimed queries run before the timer starts
    #[arg(short, long)]
    pub warmup: Option<usize>,

    /// Per-query deadline in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Where to write the HTML dashboard
    #[arg(short, long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Also write the raw report as JSON
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

impl Cli {
    /// The subcommand to run; `chat` when none was given
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Chat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_chat() {
        let cli = Cli::parse_from(["vault-rag"]);
        assert_eq!(cli.command(), Command::Chat);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.no_config);
    }

    #[test]
    fn test_ask_takes_message() {
        let cli = Cli::parse_from(["vault-rag", "ask", "any fraud today?"]);
        assert_eq!(
            cli.command(),
            Command::Ask {
                message: "any fraud today?".to_string()
            }
        );
    }

    #[test]
    fn test_bench_overrides() {
        let cli = Cli::parse_from([
            "vault-rag",
            "-vv",
            "bench",
            "--concurrency",
            "10",
            "-n",
            "200",
            "--report",
            "out.html",
        ]);
        assert_eq!(cli.verbose, 2);
        let Command::Bench(args) = cli.command() else {
            panic!("expected bench");
        };
        assert_eq!(args.concurrency, Some(10));
        assert_eq!(args.sample_size, Some(200));
        assert_eq!(args.warmup, None);
        assert_eq!(args.report, Some(PathBuf::from("out.html")));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["vault-rag", "index", "--no-config", "-o", "idx.json"]);
        assert!(cli.no_config);
        assert_eq!(
            cli.command(),
            Command::Index {
                output: Some(PathBuf::from("idx.json"))
            }
        );
    }
}
