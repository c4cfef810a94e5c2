//! Convenient imports
//!
//! ```rust,ignore
//! use shelfgate_core::prelude::*;
//! ```

pub use crate::config::{RoutesConfig, ShelfgateConfig};
pub use crate::gate::Shelfgate;
pub use crate::http::{GuardOutcome, RouteGuard};
pub use crate::navigation::{NavigationEntry, NavigationFilter, NavigationMenu};
pub use crate::rbac::{
    normalize, AccessDecision, AccessEvaluator, AccessPolicy, NormalizedRole, RoleSet, Session,
};
pub use crate::session::{SessionCache, SessionEvent};
