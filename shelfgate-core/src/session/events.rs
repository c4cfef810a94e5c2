//! Session-change events emitted by the authentication layer

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Something changed the raw user record
///
/// Serialized form is tagged by `event_type`:
/// `{"event_type":"logged_in","user":{"username":"jdoe","role":"Student"}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Login completed with this user record
    LoggedIn { user: Value },
    LoggedOut,
    /// Session restored on page load; `None` if nothing was cached
    Restored {
        #[serde(default)]
        user: Option<Value>,
    },
    /// User record re-fetched while signed in
    ProfileRefreshed { user: Value },
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::LoggedIn { .. } => "logged_in",
            SessionEvent::LoggedOut => "logged_out",
            SessionEvent::Restored { .. } => "restored",
            SessionEvent::ProfileRefreshed { .. } => "profile_refreshed",
        }
    }
}
