//! Command Event Logger
//!
//! One structured event per dispatched message, written through `tracing`
//! so the JSON file layer records it as NDJSON.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandEvent {
    /// Resolved command name, absent when nothing matched.
    pub command: Option<String>,
    /// Result classification, e.g. `success` or `unknown_command`.
    pub outcome: String,
    /// Raw message text.
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    /// Adapter the message arrived on.
    pub source: String,
    pub timestamp: DateTime<Utc>,
    pub event: CommandEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Redact and emit `event`. Returns the entry as logged.
    pub fn log_event(source: &str, mut event: CommandEvent) -> EventLogEntry {
        event.content = redact_sensitive_data(&event.content);

        let entry = EventLogEntry {
            source: source.to_string(),
            timestamp: Utc::now(),
            event,
        };

        let payload = serde_json::to_string(&entry).unwrap_or_default();
        info!(target: "command_events", event = %payload, "Command event");
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_is_redacted_before_logging() {
        let entry = EventLogger::log_event(
            "console",
            CommandEvent {
                command: Some("echo".into()),
                outcome: "success".into(),
                content: "!echo +1-555-123-4567".into(),
            },
        );
        assert_eq!(entry.source, "console");
        assert_eq!(entry.event.content, "!echo [REDACTED_PHONE]");
        assert_eq!(entry.event.outcome, "success");
    }

    #[test]
    fn entry_serializes_flat_fields() {
        let entry = EventLogger::log_event(
            "discord",
            CommandEvent { command: None, outcome: "not_a_command".into(), content: "hi".into() },
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["event"]["outcome"], "not_a_command");
        assert!(json["event"]["command"].is_null());
        assert!(json["timestamp"].is_string());
    }
}
