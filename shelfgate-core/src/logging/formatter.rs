//! Log formatting options for different output styles

use crate::logging::destinations::LogEntry;
use serde_json::Value;

/// How log lines are rendered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// {"timestamp":"2026-01-15T10:30:00Z","level":"INFO","message":"...","target":"..."}
    Json,
    /// 2026-01-15 10:30:00.000 INFO  [shelfgate_core::rbac] Access denied ...
    Human,
    /// timestamp=... level=INFO target=... message="..."
    Logfmt,
}

impl LogFormat {
    pub fn format_entry(&self, entry: &LogEntry) -> String {
        match self {
            LogFormat::Json => format_json(entry),
            LogFormat::Human => format_human(entry),
            LogFormat::Logfmt => format_logfmt(entry),
        }
    }
}

fn level_name(entry: &LogEntry) -> String {
    format!("{:?}", entry.level).to_uppercase()
}

fn plain_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_json(entry: &LogEntry) -> String {
    let mut json = serde_json::Map::new();

    json.insert("timestamp".to_string(), Value::String(entry.timestamp.to_rfc3339()));
    json.insert("level".to_string(), Value::String(level_name(entry)));
    json.insert("message".to_string(), Value::String(entry.message.clone()));
    json.insert("target".to_string(), Value::String(entry.target.clone()));

    if let Some((file, line)) = &entry.location {
        json.insert("file".to_string(), Value::String(file.clone()));
        json.insert("line".to_string(), Value::from(*line));
    }

    for (key, value) in &entry.fields {
        json.insert(key.clone(), value.clone());
    }

    serde_json::to_string(&json).unwrap_or_else(|_| "Failed to serialize log entry".to_string())
}

fn format_human(entry: &LogEntry) -> String {
    let timestamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f");
    let mut message =
        format!("{} {:5} [{}] {}", timestamp, level_name(entry), entry.target, entry.message);

    for (key, value) in &entry.fields {
        message.push_str(&format!(" {}={}", key, plain_value(value)));
    }

    message
}

fn format_logfmt(entry: &LogEntry) -> String {
    let quote = |s: &str| format!("\"{}\"", s.replace('"', "\\\""));

    let mut parts = vec![
        format!("timestamp={}", entry.timestamp.to_rfc3339()),
        format!("level={}", level_name(entry)),
        format!("target={}", entry.target),
        format!("message={}", quote(&entry.message)),
    ];

    if let Some((file, line)) = &entry.location {
        parts.push(format!("file={}", quote(file)));
        parts.push(format!("line={}", line));
    }

    for (key, value) in &entry.fields {
        let rendered = match value {
            Value::Number(_) | Value::Bool(_) => value.to_string(),
            other => quote(&plain_value(other)),
        };
        parts.push(format!("{}={}", key, rendered));
    }

    parts.join(" ")
}
