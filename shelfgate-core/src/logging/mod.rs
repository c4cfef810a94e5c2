//! Shelfgate logging
//!
//! A small `log::Log` implementation configured declaratively. Library code
//! only ever uses the standard macros (`log::debug!`, `log::warn!`, ...);
//! binaries call [`init_logging`] once at startup.
//!
//! ```rust,ignore
//! use shelfgate_core::logging::{init_logging, LoggingConfig};
//!
//! init_logging(&LoggingConfig::development().with_context_field("service", "shelfgate"))?;
//! log::info!("Shelfgate starting");
//! ```

pub mod config;
pub mod destinations;
pub mod formatter;

pub use config::{LogLevel, LoggingConfig};
pub use destinations::{LogEntry, LogOutput};
pub use formatter::LogFormat;

use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

/// Install the Shelfgate logger as the global `log` backend
///
/// Safe to call more than once; only the first call takes effect. Fails only
/// if another logger was already installed by someone else.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let mut result = Ok(());
    INIT.call_once(|| {
        result = log::set_boxed_logger(Box::new(ShelfgateLogger::new(config.clone())))
            .map(|()| log::set_max_level(config.level.into()))
            .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e));
    });
    result
}

/// `log::Log` backend writing formatted entries to stdout or stderr
struct ShelfgateLogger {
    config: LoggingConfig,
}

impl ShelfgateLogger {
    fn new(config: LoggingConfig) -> Self {
        Self { config }
    }

    fn render(&self, record: &log::Record) -> String {
        let entry = LogEntry::from_log_record(record, &self.config);
        self.config.format.format_entry(&entry)
    }
}

impl log::Log for ShelfgateLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        LogLevel::from(metadata.level()) <= self.config.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.render(record);
        let _ = match self.config.output {
            LogOutput::Stdout => writeln!(std::io::stdout().lock(), "{}", line),
            LogOutput::Stderr => writeln!(std::io::stderr().lock(), "{}", line),
        };
    }

    fn flush(&self) {
        let _ = match self.config.output {
            LogOutput::Stdout => std::io::stdout().flush(),
            LogOutput::Stderr => std::io::stderr().flush(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn test_enabled_respects_level() {
        let logger = ShelfgateLogger::new(LoggingConfig::default().with_level(LogLevel::Warn));

        let warn = log::Metadata::builder().level(log::Level::Warn).target("t").build();
        let info = log::Metadata::builder().level(log::Level::Info).target("t").build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&info));
    }

    #[test]
    fn test_render_uses_configured_format() {
        let logger = ShelfgateLogger::new(LoggingConfig::production());
        let record = log::Record::builder()
            .args(format_args!("Access denied"))
            .level(log::Level::Info)
            .target("shelfgate_core::rbac")
            .build();

        let parsed: serde_json::Value = serde_json::from_str(&logger.render(&record)).unwrap();
        assert_eq!(parsed["message"], "Access denied");
        assert_eq!(parsed["level"], "INFO");
    }
}
