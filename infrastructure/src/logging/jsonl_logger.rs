//! JSONL transcript writer for chat sessions.
//!
//! Each [`ConversationEvent`] becomes one JSON line carrying its payload
//! plus `type`, `session` and `timestamp` fields. The file is opened in
//! append mode so transcripts of successive sessions accumulate.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use vault_application::{ConversationEvent, ConversationLogger};

/// Conversation logger that appends one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every event and
/// on `Drop`.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    session_id: String,
}

impl JsonlConversationLogger {
    /// Open (or create) the transcript at `path`, creating parent
    /// directories as needed.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            session_id: chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string(),
        })
    }

    /// Override the session identifier stamped on every line.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn record(&self, event: ConversationEvent) -> serde_json::Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let mut map = match event.payload {
            serde_json::Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), event.event_type.into());
        map.insert("session".to_string(), self.session_id.clone().into());
        map.insert("timestamp".to_string(), timestamp.into());
        serde_json::Value::Object(map)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(line) = serde_json::to_string(&self.record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_domain::{RankedItem, RetrievalMetrics, Route, RouteDecision};

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("chat.jsonl");
        let logger = JsonlConversationLogger::open(&path)
            .unwrap()
            .with_session_id("s-1");

        logger.log(ConversationEvent::route_decision(
            &RouteDecision::search("velocity checks", "Why was card 4411 declined?"),
            Route::Search,
        ));
        let mut metrics = RetrievalMetrics::new();
        metrics.record("faiss", 0.001);
        metrics.record("cyborg", 0.02);
        logger.log(ConversationEvent::retrieval(
            &metrics,
            &[RankedItem::new(0, "card 4411: 12 declines in 3 minutes")],
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "route_decision");
        assert_eq!(lines[0]["route"], "SEARCH");
        assert_eq!(lines[0]["session"], "s-1");
        assert!(lines[0]["timestamp"].is_string());
        assert_eq!(lines[1]["metrics"]["cyborg"], 0.02);
    }

    #[test]
    fn test_appends_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.jsonl");

        for session in ["a", "b"] {
            let logger = JsonlConversationLogger::open(&path)
                .unwrap()
                .with_session_id(session);
            logger.log(ConversationEvent::human_turn("hello"));
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["session"], "a");
        assert_eq!(lines[1]["session"], "b");
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.jsonl");
        let logger = JsonlConversationLogger::open(&path).unwrap();

        logger.log(ConversationEvent::new("note", serde_json::json!("plain")));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "note");
        assert_eq!(lines[0]["data"], "plain");
    }

    #[test]
    fn test_open_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        assert!(JsonlConversationLogger::open(blocker.join("chat.jsonl")).is_err());
    }
}
