//! Shelfgate - Core
//!
//! Client-side access gating for the university library app: which routes and
//! menu entries a signed-in user may reach, given the free-text role string the
//! backend returns at login.
//!
//! # Overview
//!
//! The raw role is normalized once per session change, then every navigation
//! is evaluated against a static policy table. Denials are never errors: they
//! come back as redirects to the login page, a declared fallback, or home.
//!
//! ```rust,ignore
//! use shelfgate_core::prelude::*;
//!
//! let gate = Shelfgate::from_config(&ShelfgateConfig::load()?)?;
//! let mut cache = SessionCache::new();
//! cache.apply(SessionEvent::LoggedIn { user: serde_json::json!({ "role": "Moderator" }) });
//!
//! match gate.navigate(cache.session(), "/admin/users") {
//!     GuardOutcome::Render => { /* render page */ }
//!     GuardOutcome::Redirect { to, .. } => { /* navigate to `to` */ }
//! }
//! ```
//!
//! # Architecture
//!
//! - [`rbac`] - role normalization, policy table, evaluator, diagnostics
//! - [`http`] - route guard (render/redirect instructions)
//! - [`navigation`] - menu filtering
//! - [`session`] - normalized-role cache fed by session events
//! - [`config`] - TOML + environment configuration
//! - [`logging`] - `log` backend
//!
//! This is a convenience gate, not a security boundary: the backend re-checks
//! every privileged request.

pub mod config; // Configuration system with TOML support
pub mod gate;
pub mod http;
pub mod logging; // Declarative logging system with standard log crate integration
pub mod navigation;
pub mod patterns; // Destination path matching
pub mod rbac; // Role-Based Access Control system
pub mod session;

// Prelude module for convenient imports
pub mod prelude;

pub use gate::Shelfgate;
pub use rbac::{AccessDecision, AccessPolicy, NormalizedRole, Session};

/// Main result type for the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Shelfgate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Policy table failed validation
    #[error("Policy error: {0}")]
    Policy(#[from] rbac::PolicyError),
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0:#}")]
    Config(#[from] anyhow::Error),
}
