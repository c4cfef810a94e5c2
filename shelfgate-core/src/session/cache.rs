//! Normalized-role cache
//!
//! Written once per session-change event, read on every navigation.

use super::events::SessionEvent;
use crate::rbac::Session;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Holds the raw user record and the session derived from it
#[derive(Debug, Clone, Default)]
pub struct SessionCache {
    record: Option<Value>,
    session: Session,
    updated_at: Option<DateTime<Utc>>,
    /// Number of events that changed the cached record
    revision: u64,
}

impl SessionCache {
    /// Start unauthenticated
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session snapshot
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Raw user record as last received
    pub fn record(&self) -> Option<&Value> {
        self.record.as_ref()
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply one event and return the resulting session
    pub fn apply(&mut self, event: SessionEvent) -> &Session {
        let name = event.name();
        match event {
            SessionEvent::LoggedIn { user } => self.store(Some(user), name),
            SessionEvent::LoggedOut => self.store(None, name),
            SessionEvent::Restored { user } => self.store(user, name),
            SessionEvent::ProfileRefreshed { user } => {
                if self.session.is_authenticated() {
                    self.store(Some(user), name);
                } else {
                    log::warn!("Ignoring profile refresh while signed out");
                }
            }
        }
        &self.session
    }

    fn store(&mut self, record: Option<Value>, cause: &str) {
        let session = record.as_ref().map(Session::from_raw).unwrap_or_default();

        if session.role() != self.session.role() {
            log::info!(
                "Session role changed on {}: {} -> {}",
                cause,
                self.session.label(),
                session.label()
            );
        }

        self.record = record;
        self.session = session;
        self.updated_at = Some(Utc::now());
        self.revision += 1;
    }
}
