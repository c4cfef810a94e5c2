//! Session state for access gating
//!
//! The authentication layer owns login and token handling; this module only
//! keeps the latest user record and the [`Session`](crate::rbac::Session)
//! derived from it, so the role is normalized once per change instead of on
//! every render.

mod cache;
mod events;

pub use cache::SessionCache;
pub use events::SessionEvent;
