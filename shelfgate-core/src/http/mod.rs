//! Navigation-facing HTTP types
//!
//! - [`route_guard`] - render-time gate turning access decisions into
//!   render/redirect instructions (and `302` responses for server-side hosts)

pub mod route_guard;

pub use route_guard::{GuardOutcome, RouteGuard};
