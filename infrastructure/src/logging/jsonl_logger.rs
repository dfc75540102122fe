//! JSONL file writer for debate events.
//!
//! Each [`ConversationEvent`] becomes one JSON line carrying the payload
//! fields plus `type`, `seq` and `timestamp`.

use debate_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Append-only JSONL event log for one debate session.
///
/// Thread-safe via `Mutex<BufWriter<File>>`; every line is flushed as it is
/// written so a crashed session still leaves a readable log.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    seq: AtomicU64,
}

impl JsonlConversationLogger {
    /// Open the log at `path` for appending, creating it and its parent
    /// directories when missing. An existing log is never truncated.
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            seq: AtomicU64::new(0),
        })
    }

    /// Create `debate-<utc millis>-<pid>.conversation.jsonl` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> io::Result<Self> {
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
        Self::new(dir.as_ref().join(format!(
            "debate-{}-{}.conversation.jsonl",
            stamp,
            std::process::id()
        )))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(&self, event: ConversationEvent) -> Value {
        let mut map = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::from(event.event_type));
        map.insert(
            "seq".to_string(),
            Value::from(self.seq.fetch_add(1, Ordering::Relaxed)),
        );
        map.insert(
            "timestamp".to_string(),
            Value::from(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        );
        Value::Object(map)
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

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_events_are_tagged_with_type_and_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debate.conversation.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new(
            "turn_recorded",
            serde_json::json!({
                "index": 0,
                "speaker": "scientist",
                "text": "Trials catch harms early."
            }),
        ));
        logger.log(ConversationEvent::new(
            "verdict",
            serde_json::json!({"winner": "philosopher"}),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.get("timestamp").is_some()));
        assert_eq!(records[0]["seq"], 0);
        assert_eq!(records[1]["seq"], 1);
        assert_eq!(records[0]["type"], "turn_recorded");
        assert_eq!(records[0]["speaker"], "scientist");
        assert_eq!(records[1]["type"], "verdict");
        assert_eq!(records[1]["winner"], "philosopher");
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/run.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();
        assert_eq!(logger.path(), path.as_path());

        logger.log(ConversationEvent::new(
            "debate_aborted",
            serde_json::json!("timeout"),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records[0]["type"], "debate_aborted");
        assert_eq!(records[0]["data"], "timeout");
    }

    #[test]
    fn test_in_dir_names_file_after_session() {
        let dir = tempfile::tempdir().unwrap();
        let logger = JsonlConversationLogger::in_dir(dir.path()).unwrap();
        let name = logger.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("debate-"));
        assert!(name.ends_with(&format!("-{}.conversation.jsonl", std::process::id())));
        // millisecond resolution
        assert!(name.contains('.'), "{name}");
    }

    #[test]
    fn test_reopening_appends_instead_of_truncating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.conversation.jsonl");

        for winner in ["scientist", "philosopher"] {
            let logger = JsonlConversationLogger::new(&path).unwrap();
            logger.log(ConversationEvent::new(
                "verdict",
                serde_json::json!({ "winner": winner }),
            ));
        }

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["winner"], "scientist");
        assert_eq!(records[1]["winner"], "philosopher");
    }
}
