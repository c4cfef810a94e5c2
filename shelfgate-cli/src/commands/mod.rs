pub mod check;
pub mod matrix;
pub mod menu;
pub mod validate;

use crate::ViewerArgs;
use serde_json::{json, Value};
use shelfgate_core::rbac::Session;

/// Session for the viewer described on the command line
///
/// `--role` is parsed as JSON first so `42`, `null` or `"Admin"` reach the
/// normalizer unchanged; anything that isn't JSON is taken as a bare string.
pub fn viewer_session(viewer: &ViewerArgs) -> Session {
    match &viewer.role {
        Some(raw) if !viewer.anonymous => {
            let role = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| json!(raw));
            Session::from_raw(&json!({ "username": "cli", "role": role }))
        }
        _ => Session::Unauthenticated,
    }
}
