//! Log output destinations and the entry written to them

use crate::logging::{LogLevel, LoggingConfig};
use std::collections::BTreeMap;

/// Where log lines are written
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
}

/// A structured log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub level: LogLevel,
    pub message: String,
    /// Usually the module path
    pub target: String,
    pub fields: BTreeMap<String, serde_json::Value>,
    /// Source file and line number
    pub location: Option<(String, u32)>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: String, target: String) -> Self {
        Self {
            timestamp: chrono::Utc::now(),
            level,
            message,
            target,
            fields: BTreeMap::new(),
            location: None,
        }
    }

    /// Create a LogEntry from a standard log::Record
    pub fn from_log_record(record: &log::Record, config: &LoggingConfig) -> Self {
        let mut entry = Self::new(
            record.level().into(),
            record.args().to_string(),
            record.target().to_string(),
        );

        if let (Some(file), Some(line)) = (record.file(), record.line()) {
            entry.location = Some((file.to_string(), line));
        }

        config.context_fields.iter().fold(entry, |entry, (key, value)| {
            entry.with_field(key, serde_json::Value::String(value.clone()))
        })
    }

    /// Add a structured field to the log entry
    pub fn with_field(mut self, key: &str, value: serde_json::Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }
}
