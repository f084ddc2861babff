//! CLI entrypoint for vault-rag
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use vault_application::{
    BenchmarkProgress, ChatService, ChatSession, CorpusSource, NoProgress, RetrievalOrchestrator,
    RunBenchmarkUseCase,
};
use vault_infrastructure::{
    BackendFactory, ConfigLoader, CsvCorpus, DiskBackend, FileConfig, JsonlConversationLogger,
    OpenAiChatClient, build_embedder, build_index,
};
use vault_presentation::{
    BenchArgs, ChatRepl, Cli, Command, ConsoleFormatter, HtmlDashboard, OutputConfig,
    ProgressReporter, ReplConfig, SimpleProgress,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting vault-rag");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let command = cli.command();
    if let Command::Bench(args) = &command {
        apply_bench_overrides(&mut config, args);
    }

    let issues = config.validate();
    if !issues.is_empty() {
        eprint!("{}", ConsoleFormatter::format_issues(&issues));
        bail!("Invalid configuration ({} problems)", issues.len());
    }

    let output = OutputConfig {
        color: config.output.color,
        show_progress: config.output.show_progress && !cli.quiet,
    };
    output.apply();

    match command {
        Command::Index { output: path } => run_index(&config, path).await,
        Command::Ask { message } => {
            let (orchestrator, _) = build_orchestrator(&config).await?;
            let service = build_chat_service(&config, orchestrator)?;
            let response = service.handle_message(&message).await;
            println!("{}", ConsoleFormatter::format_json(&response));
            Ok(())
        }
        Command::Chat => {
            let (orchestrator, _) = build_orchestrator(&config).await?;
            let backends = orchestrator.backend_names();
            let primary = orchestrator.primary_name().to_string();
            let service = build_chat_service(&config, orchestrator)?;

            let repl = ChatRepl::new(Arc::new(service))
                .with_backends(backends, primary)
                .with_config(ReplConfig {
                    history_file: config.repl.history_file.clone(),
                });
            repl.run().await?;
            Ok(())
        }
        Command::Bench(args) => run_bench(&config, &output, cli.quiet, args.json).await,
    }
}

/// Initialize tracing: stderr by `-v` count (RUST_LOG wins), plus an
/// optional plain-text file layer.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("--log-file {} does not name a file", path.display()))?;
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

fn apply_bench_overrides(config: &mut FileConfig, args: &BenchArgs) {
    let bench = &mut config.benchmark;
    if let Some(concurrency) = args.concurrency {
        bench.concurrency = concurrency;
    }
    if let Some(size) = args.sample_size {
        bench.sample_size = size;
    }
    if let Some(warmup) = args.warmup {
        bench.warmup_queries = warmup;
    }
    if let Some(timeout) = args.timeout {
        bench.query_timeout_seconds = Some(timeout);
    }
    if let Some(report) = &args.report {
        bench.report_path = report.display().to_string();
    }
}

// === Dependency Injection ===

async fn build_orchestrator(
    config: &FileConfig,
) -> Result<(Arc<RetrievalOrchestrator>, Arc<CsvCorpus>)> {
    let embedder = build_embedder(&config.embedding).context("Failed to create embedder")?;
    let corpus = Arc::new(CsvCorpus::new(
        &config.corpus.path,
        config.corpus.text_column.clone(),
    ));

    let adapters = BackendFactory::new(&config.backends, embedder)
        .build_adapters(corpus.as_ref())
        .await;
    let orchestrator = RetrievalOrchestrator::new(adapters, config.retrieval.to_params())?;

    Ok((Arc::new(orchestrator), corpus))
}

fn build_chat_service(
    config: &FileConfig,
    orchestrator: Arc<RetrievalOrchestrator>,
) -> Result<ChatService> {
    let llm = &config.llm;
    let client = OpenAiChatClient::new(
        &llm.base_url,
        llm.resolve_api_key(),
        llm.router_model.clone(),
        llm.reply_model.clone(),
        Duration::from_secs(llm.timeout_seconds),
    )
    .with_context(|| format!("Failed to create chat client (set {})", llm.api_key_env))?
    .with_max_tokens(llm.max_tokens);
    let client = Arc::new(client);

    let mut session = ChatSession::new(
        orchestrator,
        client.clone(),
        client,
        &config.session.to_params(),
    );

    if let Some(path) = &config.logging.conversation_log {
        let logger = JsonlConversationLogger::open(path)
            .with_context(|| format!("Failed to open conversation log {}", path))?;
        info!("Conversation log: {}", logger.path().display());
        session = session.with_conversation_logger(Arc::new(logger));
    }

    Ok(ChatService::new(session))
}

async fn run_bench(
    config: &FileConfig,
    output: &OutputConfig,
    quiet: bool,
    json_path: Option<PathBuf>,
) -> Result<()> {
    let (orchestrator, corpus) = build_orchestrator(config).await?;
    let corpus: Arc<dyn CorpusSource> = corpus;
    let use_case = RunBenchmarkUseCase::new(orchestrator, corpus);
    let params = config.benchmark.to_params();

    let progress: Box<dyn BenchmarkProgress> = if quiet {
        Box::new(NoProgress)
    } else if output.show_progress {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let run = use_case.execute(&params, progress.as_ref()).await?;

    if !quiet {
        println!("{}", ConsoleFormatter::format_report(&run.report));
    }

    let report_path = &config.benchmark.report_path;
    HtmlDashboard::write(&run.report, report_path)
        .with_context(|| format!("Failed to write dashboard to {}", report_path))?;
    println!("Dashboard written to {}", report_path);

    if let Some(path) = json_path {
        std::fs::write(&path, ConsoleFormatter::format_json(&run.report))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Report JSON written to {}", path.display());
    }

    Ok(())
}

/// Embed the corpus and persist it where the disk backend loads from
async fn run_index(config: &FileConfig, output: Option<PathBuf>) -> Result<()> {
    let path = output.unwrap_or_else(|| PathBuf::from(&config.backends.disk.path));
    let embedder = build_embedder(&config.embedding).context("Failed to create embedder")?;
    let corpus = CsvCorpus::new(&config.corpus.path, config.corpus.text_column.clone());

    let records = corpus.records()?;
    info!("Embedding {} records", records.len());
    let index = build_index(&records, embedder.as_ref()).await?;

    DiskBackend::persist(&index, &path)
        .with_context(|| format!("Failed to write index to {}", path.display()))?;
    println!(
        "Indexed {} records ({} dimensions) into {}",
        records.len(),
        embedder.dimensions(),
        path.display()
    );
    Ok(())
}
