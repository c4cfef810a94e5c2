//! Configuration system for Shelfgate
//!
//! Values are resolved in the following order (highest priority wins):
//!
//! 1. **Environment Variables** (`SHELFGATE_*`)
//! 2. **Config File** (shelfgate.toml)
//! 3. **Defaults**
//!
//! The access policy itself is compiled in and is not configurable here; only
//! the redirect destinations and logging are.
//!
//! # Example
//!
//! ```no_run
//! use shelfgate_core::config::ShelfgateConfig;
//!
//! let config = ShelfgateConfig::load()?;
//! assert_eq!(config.routes.login_path, "/login");
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod logging;
pub mod routes;

pub use logging::LoggingConfig;
pub use routes::RoutesConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete Shelfgate configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfgateConfig {
    pub routes: RoutesConfig,
    pub logging: LoggingConfig,
}

impl ShelfgateConfig {
    /// Load from `shelfgate.toml` in the working directory, if present
    pub fn load() -> Result<Self> {
        Self::load_from("shelfgate.toml")
    }

    /// Defaults, then the file at `path` if it exists, then environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = Self::default();

        if path.exists() {
            let file_config = Self::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.merge(file_config);
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
        }

        config.apply_env_vars();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.as_ref().display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.routes.merge(other.routes);
        self.logging.merge(other.logging);
    }

    pub fn apply_env_vars(&mut self) {
        self.routes.apply_env_vars();
        self.logging.apply_env_vars();
    }

    pub fn validate(&self) -> Result<()> {
        self.routes.validate().context("Invalid [routes] section")?;
        self.logging.validate().context("Invalid [logging] section")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ShelfgateConfig::default();
        assert_eq!(config.routes.login_path, "/login");
        assert_eq!(config.routes.home_path, "/");
        assert_eq!(config.routes.return_param, "redirect");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ShelfgateConfig::from_toml(
            r#"
            [routes]
            login_path = "/auth/sign-in"
            "#,
        )
        .unwrap();
        assert_eq!(config.routes.login_path, "/auth/sign-in");
        assert_eq!(config.routes.home_path, "/");
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ShelfgateConfig::load_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.routes, RoutesConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelfgate.toml");
        std::fs::write(
            &path,
            r#"
            [routes]
            home_path = "/catalog"
            return_param = "next"

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        let config = ShelfgateConfig::load_from(&path).unwrap();
        assert_eq!(config.routes.home_path, "/catalog");
        assert_eq!(config.routes.return_param, "next");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shelfgate.toml");
        std::fs::write(&path, "[routes]\nhome_path = \"catalog\"\n").unwrap();
        assert!(ShelfgateConfig::load_from(&path).is_err());

        std::fs::write(&path, "[routes\n").unwrap();
        assert!(ShelfgateConfig::load_from(&path).is_err());
    }
}
