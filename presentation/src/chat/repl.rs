//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::config::ReplConfig;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use vault_application::ChatService;

/// What the loop should do after a slash command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandOutcome {
    Continue,
    Exit,
    ShowHistory,
}

/// Interactive fraud-analyst chat REPL
pub struct ChatRepl {
    service: Arc<ChatService>,
    backends: Vec<String>,
    primary: String,
    config: ReplConfig,
}

impl ChatRepl {
    pub fn new(service: Arc<ChatService>) -> Self {
        Self {
            service,
            backends: Vec::new(),
            primary: String::new(),
            config: ReplConfig::default(),
        }
    }

    /// Set the backend names shown in the banner
    pub fn with_backends(mut self, backends: Vec<String>, primary: impl Into<String>) -> Self {
        self.backends = backends;
        self.primary = primary.into();
        self
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline(">>> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        match self.handle_command(line) {
                            CommandOutcome::Exit => break,
                            CommandOutcome::ShowHistory => {
                                let turns = self.service.history_len().await;
                                println!("{} turns in this session (system preamble included)", turns);
                                println!();
                            }
                            CommandOutcome::Continue => {}
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    println!();
                    let response = self.service.handle_message(line).await;
                    println!("{}", ConsoleFormatter::format_response(&response));
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        vault-rag - Fraud Analyst Chat       │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        if !self.backends.is_empty() {
            println!("{}", self.backend_line());
            println!();
        }
        Self::print_help();
    }

    fn backend_line(&self) -> String {
        let names: Vec<String> = self
            .backends
            .iter()
            .map(|name| {
                if *name == self.primary {
                    format!("{} (primary)", name)
                } else {
                    name.clone()
                }
            })
            .collect();
        format!("Backends: {}", names.join(", "))
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /backends         - Show configured backends");
        println!("  /history          - Show conversation length");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }

    fn handle_command(&self, cmd: &str) -> CommandOutcome {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                CommandOutcome::Exit
            }
            "/help" | "/h" | "/?" => {
                println!();
                Self::print_help();
                CommandOutcome::Continue
            }
            "/backends" => {
                println!();
                println!("{}", self.backend_line());
                println!();
                CommandOutcome::Continue
            }
            "/history" => CommandOutcome::ShowHistory,
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                CommandOutcome::Continue
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use vault_application::{
        BackendAdapter, BackendError, ChatSession, ClassificationError, GatewayError,
        QueryClassifier, ReplyGenerator, RetrievalOrchestrator, RetrievalParams, SessionParams,
        VectorBackend,
    };
    use vault_domain::{BackendKind, ConversationTurn, RankedItem, RouteDecision};

    struct StubBackend;

    #[async_trait]
    impl VectorBackend for StubBackend {
        fn kind(&self) -> BackendKind {
            BackendKind::Encrypted
        }
        async fn similarity_search(
            &self,
            _text: &str,
            _top_k: usize,
        ) -> Result<Vec<RankedItem>, BackendError> {
            Ok(vec![])
        }
    }

    struct ChatOnly;

    #[async_trait]
    impl QueryClassifier for ChatOnly {
        async fn classify(&self, query: &str) -> Result<RouteDecision, ClassificationError> {
            Ok(RouteDecision::chat(query))
        }
    }

    #[async_trait]
    impl ReplyGenerator for ChatOnly {
        async fn generate_reply(&self, _history: &[ConversationTurn]) -> Result<String, GatewayError> {
            Ok("hello".to_string())
        }
    }

    fn repl() -> ChatRepl {
        let backend: Arc<dyn VectorBackend> = Arc::new(StubBackend);
        let adapters = vec![BackendAdapter::connect(
            "cyborg",
            BackendKind::Encrypted,
            Ok(backend),
        )];
        let orchestrator =
            RetrievalOrchestrator::new(adapters, RetrievalParams::default()).unwrap();
        let session = ChatSession::new(
            Arc::new(orchestrator),
            Arc::new(ChatOnly),
            Arc::new(ChatOnly),
            &SessionParams::default(),
        );
        ChatRepl::new(Arc::new(ChatService::new(session))).with_backends(
            vec!["faiss".to_string(), "cyborg".to_string()],
            "cyborg",
        )
    }

    #[test]
    fn test_backend_line_marks_primary() {
        assert_eq!(repl().backend_line(), "Backends: faiss, cyborg (primary)");
    }

    #[test]
    fn test_handle_command() {
        let repl = repl();
        assert_eq!(repl.handle_command("/q"), CommandOutcome::Exit);
        assert_eq!(repl.handle_command("/history"), CommandOutcome::ShowHistory);
        assert_eq!(repl.handle_command("/help"), CommandOutcome::Continue);
        assert_eq!(repl.handle_command("/nope"), CommandOutcome::Continue);
    }

    #[tokio::test]
    async fn test_service_grows_history() {
        let repl = repl();
        let response = repl.service.handle_message("hi there").await;
        assert_eq!(response.response, "hello");
        assert_eq!(repl.service.history_len().await, 3);
    }
}
