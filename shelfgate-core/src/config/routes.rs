//! Redirect destinations used by the route guard

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Where denied navigations are sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Login page for unauthenticated visitors
    /// Env: SHELFGATE_LOGIN_PATH
    /// Default: "/login"
    pub login_path: String,

    /// Public home page for signed-in users without a fallback
    /// Env: SHELFGATE_HOME_PATH
    /// Default: "/"
    pub home_path: String,

    /// Query parameter carrying the originally requested destination
    /// Env: SHELFGATE_RETURN_PARAM
    /// Default: "redirect"
    pub return_param: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            home_path: "/".to_string(),
            return_param: "redirect".to_string(),
        }
    }
}

impl RoutesConfig {
    pub fn merge(&mut self, other: Self) {
        self.login_path = other.login_path;
        self.home_path = other.home_path;
        self.return_param = other.return_param;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(path) = env::var("SHELFGATE_LOGIN_PATH") {
            self.login_path = path;
        }
        if let Ok(path) = env::var("SHELFGATE_HOME_PATH") {
            self.home_path = path;
        }
        if let Ok(param) = env::var("SHELFGATE_RETURN_PARAM") {
            self.return_param = param;
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, path) in [("login_path", &self.login_path), ("home_path", &self.home_path)] {
            if !path.starts_with('/') || path.starts_with("//") {
                bail!("Invalid {}: {:?} must be a same-site absolute path", name, path);
            }
        }

        if self.login_path == self.home_path {
            bail!("Invalid routes: login_path and home_path are both {:?}", self.login_path);
        }

        if self.return_param.is_empty()
            || !self.return_param.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            bail!("Invalid return_param: {:?}", self.return_param);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RoutesConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.home_path, "/");
    }

    #[test]
    fn test_rejects_external_paths() {
        let config =
            RoutesConfig { login_path: "//evil.example/login".to_string(), ..Default::default() };
        assert!(config.validate().is_err());

        let config =
            RoutesConfig { home_path: "https://example.org".to_string(), ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_return_param() {
        let config = RoutesConfig { return_param: "a b".to_string(), ..Default::default() };
        assert!(config.validate().is_err());
        let config = RoutesConfig { return_param: String::new(), ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_login_equal_home() {
        let config = RoutesConfig { home_path: "/login".to_string(), ..Default::default() };
        assert!(config.validate().is_err());
    }
}
