//! Logging configuration

use crate::logging::{LogFormat, LogLevel, LogOutput, LoggingConfig as RuntimeLogging};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// "error", "warn", "info", "debug" or "trace"
    /// Env: SHELFGATE_LOG_LEVEL
    pub level: String,
    /// "human", "json" or "logfmt"
    /// Env: SHELFGATE_LOG_FORMAT
    pub format: String,
    /// "stdout" or "stderr"
    pub output: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "human".to_string(),
            output: "stderr".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(level) = env::var("SHELFGATE_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(format) = env::var("SHELFGATE_LOG_FORMAT") {
            self.format = format;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.to_runtime().map(|_| ())
    }

    /// Convert to the logger's own configuration
    pub fn to_runtime(&self) -> Result<RuntimeLogging> {
        let level = match self.level.to_lowercase().as_str() {
            "error" => LogLevel::Error,
            "warn" => LogLevel::Warn,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            other => bail!("Invalid log level: {}", other),
        };
        let format = match self.format.to_lowercase().as_str() {
            "human" => LogFormat::Human,
            "json" => LogFormat::Json,
            "logfmt" => LogFormat::Logfmt,
            other => bail!("Invalid log format: {}", other),
        };
        let output = match self.output.to_lowercase().as_str() {
            "stdout" => LogOutput::Stdout,
            "stderr" => LogOutput::Stderr,
            other => bail!("Invalid log output: {}", other),
        };

        Ok(RuntimeLogging::default().with_level(level).with_format(format).with_output(output))
    }
}
