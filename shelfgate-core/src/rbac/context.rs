//! Session context consumed by the evaluator

use super::roles::{normalize, NormalizedRole};
use serde_json::Value;

/// Signed-in user as far as access gating is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    /// Normalized once when the user record changes
    pub role: NormalizedRole,

    /// Only used for log lines
    pub username: Option<String>,
}

impl UserSession {
    pub fn new(role: NormalizedRole) -> Self {
        Self { role, username: None }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// Current authentication state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated(UserSession),
}

impl Session {
    /// Create an authenticated session for a role
    pub fn authenticated(role: NormalizedRole) -> Self {
        Session::Authenticated(UserSession::new(role))
    }

    /// Build a session from the raw user record the backend returned
    ///
    /// A JSON object is a user record; its `role` field is normalized (a
    /// missing field gives `Unknown`). Any other shape is treated as no
    /// session at all.
    pub fn from_raw(record: &Value) -> Self {
        let Value::Object(fields) = record else {
            return Session::Unauthenticated;
        };

        let role = fields.get("role").map(normalize).unwrap_or(NormalizedRole::Unknown);
        let username = fields
            .get("username")
            .or_else(|| fields.get("email"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Session::Authenticated(UserSession { role, username })
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    /// Role of the signed-in user, `None` when unauthenticated
    pub fn role(&self) -> Option<NormalizedRole> {
        match self {
            Session::Authenticated(user) => Some(user.role),
            Session::Unauthenticated => None,
        }
    }

    /// Short label for logs: the role name or "anonymous"
    pub fn label(&self) -> &'static str {
        self.role().map(|role| role.as_str()).unwrap_or("anonymous")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_raw_user_record() {
        let session = Session::from_raw(&json!({ "username": "jdoe", "role": "Librarian" }));
        assert_eq!(
            session,
            Session::Authenticated(UserSession {
                role: NormalizedRole::Librarian,
                username: Some("jdoe".to_string()),
            })
        );
    }

    #[test]
    fn test_from_raw_missing_role_is_unknown() {
        let session = Session::from_raw(&json!({ "email": "a@uni.edu" }));
        assert!(session.is_authenticated());
        assert_eq!(session.role(), Some(NormalizedRole::Unknown));
    }

    #[test]
    fn test_from_raw_non_string_role_is_unknown() {
        let session = Session::from_raw(&json!({ "role": 42 }));
        assert_eq!(session.role(), Some(NormalizedRole::Unknown));
    }

    #[test]
    fn test_from_raw_non_object_fails_closed() {
        for raw in [json!(null), json!("admin"), json!(1), json!([{ "role": "admin" }])] {
            assert_eq!(Session::from_raw(&raw), Session::Unauthenticated, "input: {}", raw);
        }
    }

    #[test]
    fn test_label() {
        assert_eq!(Session::Unauthenticated.label(), "anonymous");
        assert_eq!(Session::authenticated(NormalizedRole::Teacher).label(), "teacher");
    }
}
