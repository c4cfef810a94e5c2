//! Shelfgate RBAC (Role-Based Access Control) Module
//!
//! Decides which destinations a signed-in library user may reach from the
//! single role string the backend returns at login.
//!
//! # Layers
//! - [`roles`]: raw role value → [`NormalizedRole`] (total, never fails)
//! - [`policy`]: static destination → allowed roles table
//! - [`evaluator`]: (session, destination) → [`AccessDecision`]
//! - [`diagnostics`]: access matrix and policy lint
//!
//! # Example
//! ```rust
//! use shelfgate_core::rbac::{AccessDecision, AccessEvaluator, AccessPolicy, Session};
//! use std::sync::Arc;
//!
//! let evaluator = AccessEvaluator::new(Arc::new(AccessPolicy::library()?));
//! let session = Session::from_raw(&serde_json::json!({ "role": "Moderator" }));
//!
//! assert_eq!(evaluator.evaluate(&session, "/admin/reviews"), AccessDecision::Allow);
//! assert_eq!(evaluator.evaluate(&session, "/admin/users"), AccessDecision::DenyRedirectHome);
//! # Ok::<(), shelfgate_core::rbac::PolicyError>(())
//! ```
//!
//! This is a client-side convenience gate. The backend re-checks every
//! privileged request on its own.

pub mod context;
pub mod diagnostics;
pub mod evaluator;
pub mod policy;
pub mod roles;

pub use context::{Session, UserSession};
pub use diagnostics::{lint, AccessMatrix, MatrixRow, PolicyWarning};
pub use evaluator::{AccessDecision, AccessEvaluator, AccessTrace, DecisionReason};
pub use policy::{AccessPolicy, AccessPolicyBuilder, PolicyEntry, PolicyError};
pub use roles::{normalize, normalize_str, NormalizedRole, RoleSet};
