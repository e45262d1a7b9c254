//! Telemetry and structured logging components for Herald.
//!
//! Handles log redaction, JSON output with file rotation, and per-message command events.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{CommandEvent, EventLogEntry, EventLogger};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
