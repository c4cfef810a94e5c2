//! End-to-end access scenarios for the library policy
//!
//! Each test starts from a raw role value as the backend would send it.

use serde_json::{json, Value};
use shelfgate_core::config::RoutesConfig;
use shelfgate_core::http::{GuardOutcome, RouteGuard};
use shelfgate_core::navigation::{NavigationFilter, NavigationMenu};
use shelfgate_core::rbac::{
    normalize, AccessDecision, AccessEvaluator, AccessPolicy, NormalizedRole, Session,
};
use std::sync::Arc;

fn evaluator() -> AccessEvaluator {
    AccessEvaluator::new(Arc::new(AccessPolicy::library().expect("library policy")))
}

fn signed_in(raw_role: Value) -> Session {
    Session::from_raw(&json!({ "username": "someone", "role": raw_role }))
}

#[test]
fn moderator_mixed_case_denied_user_admin() {
    assert_eq!(normalize(&json!("Moderator")), NormalizedRole::Moderator);
    let session = signed_in(json!("Moderator"));
    assert_eq!(evaluator().evaluate(&session, "/admin/users"), AccessDecision::DenyRedirectHome);
}

#[test]
fn moderator_allowed_reviews() {
    let session = signed_in(json!("moderator"));
    assert_eq!(evaluator().evaluate(&session, "/admin/reviews"), AccessDecision::Allow);
}

#[test]
fn moderator_denied_dashboard() {
    let session = signed_in(json!("moderator"));
    assert_eq!(evaluator().evaluate(&session, "/admin"), AccessDecision::DenyRedirectHome);
}

#[test]
fn anonymous_sent_to_login() {
    assert_eq!(
        evaluator().evaluate(&Session::Unauthenticated, "/admin/books"),
        AccessDecision::DenyRedirectLogin
    );
}

#[test]
fn numeric_role_can_browse_catalog() {
    assert_eq!(normalize(&json!(42)), NormalizedRole::Unknown);
    let session = signed_in(json!(42));
    assert_eq!(evaluator().evaluate(&session, "/books"), AccessDecision::Allow);
}

#[test]
fn moderator_menu_keeps_order() {
    let filter = NavigationFilter::new(evaluator());
    let session = signed_in(json!("moderator"));
    let entries = vec![
        "/admin".to_string(),
        "/admin/users".to_string(),
        "/admin/books".to_string(),
        "/admin/events".to_string(),
    ];
    assert_eq!(filter.retain_visible(&session, entries), vec!["/admin/books", "/admin/events"]);
}

#[test]
fn normalization_is_total_and_idempotent() {
    let inputs = [
        json!(null),
        json!(""),
        json!("ADMIN"),
        json!("Librarian"),
        json!("teacher"),
        json!("STUDENT"),
        json!("moderator"),
        json!("superuser"),
        json!(0),
        json!(-1.5),
        json!(false),
        json!([]),
        json!({}),
    ];
    for raw in inputs {
        let role = normalize(&raw);
        assert!(NormalizedRole::ALL.contains(&role));
        assert_eq!(normalize(&json!(role.to_string())), role, "input: {}", raw);
    }
}

#[test]
fn guarded_destinations_fail_closed() {
    let evaluator = evaluator();
    for (pattern, entry) in evaluator.policy().entries() {
        assert!(!entry.allowed_roles().is_empty());
        let destination = pattern.to_string().replace('*', "7");
        assert_eq!(
            evaluator.evaluate(&Session::Unauthenticated, &destination),
            AccessDecision::DenyRedirectLogin
        );
        assert_eq!(
            evaluator.evaluate_optional(None, &destination),
            AccessDecision::DenyRedirectLogin
        );
    }
}

#[test]
fn unknown_role_is_never_treated_as_logged_out() {
    let evaluator = evaluator();
    let session = signed_in(json!("superuser"));
    for (pattern, _) in evaluator.policy().entries() {
        let destination = pattern.to_string().replace('*', "7");
        assert_ne!(evaluator.evaluate(&session, &destination), AccessDecision::DenyRedirectLogin);
    }
}

#[test]
fn visible_menu_entries_always_render() {
    let evaluator = evaluator();
    let filter = NavigationFilter::new(evaluator.clone());
    let guard = RouteGuard::new(evaluator, RoutesConfig::default());

    let mut sessions = vec![Session::Unauthenticated];
    sessions.extend(NormalizedRole::ALL.into_iter().map(Session::authenticated));

    for menu in [NavigationMenu::admin_sidebar(), NavigationMenu::main_header()] {
        for session in &sessions {
            for entry in menu.visible_for(&filter, session) {
                assert_eq!(
                    guard.instruction(session, &entry.destination),
                    GuardOutcome::Render,
                    "{} in {} for {}",
                    entry.destination,
                    menu.name,
                    session.label()
                );
            }
        }
    }
}

#[test]
fn login_round_trip_returns_to_requested_page() {
    let guard = RouteGuard::new(evaluator(), RoutesConfig::default());

    let outcome = guard.instruction(&Session::Unauthenticated, "/my-borrows?status=overdue");
    let login_url = outcome.location().expect("redirect").to_string();
    assert!(login_url.starts_with("/login?redirect="));

    let (_, query) = login_url.split_once('?').expect("query");
    let back = guard.return_to(query);
    assert_eq!(back, "/my-borrows?status=overdue");

    let student = signed_in(json!("Student"));
    assert!(guard.instruction(&student, &back).is_render());
}

#[test]
fn record_without_role_is_signed_in_but_unprivileged() {
    let evaluator = evaluator();
    let session = Session::from_raw(&json!({ "username": "reader" }));
    assert_eq!(session.role(), Some(NormalizedRole::Unknown));
    assert_eq!(evaluator.evaluate(&session, "/admin/categories"), AccessDecision::DenyRedirectHome);
    assert_eq!(evaluator.evaluate(&session, "/bookmarks"), AccessDecision::Allow);
}
