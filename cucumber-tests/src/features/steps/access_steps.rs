use crate::features::world::ShelfgateWorld;
use cucumber::{given, then, when};
use serde_json::json;
use shelfgate_core::config::ShelfgateConfig;
use shelfgate_core::rbac::AccessDecision;
use shelfgate_core::session::SessionEvent;

// Background
#[given(expr = "the library access policy")]
async fn given_library_policy(world: &mut ShelfgateWorld) {
    assert_eq!(world.gate.policy().len(), 15);
}

#[given(expr = "the login page is {string} and home is {string}")]
async fn given_custom_routes(world: &mut ShelfgateWorld, login: String, home: String) {
    let mut config = ShelfgateConfig::default();
    config.routes.login_path = login;
    config.routes.home_path = home;
    world.reconfigure(config);
}

#[given(expr = "a user signed in with role {string}")]
async fn given_signed_in(world: &mut ShelfgateWorld, role: String) {
    world.sign_in(json!(role));
}

#[given(expr = "a user signed in with numeric role {int}")]
async fn given_signed_in_numeric(world: &mut ShelfgateWorld, role: i64) {
    world.sign_in(json!(role));
}

#[given(expr = "a user signed in without a role")]
async fn given_signed_in_without_role(world: &mut ShelfgateWorld) {
    world.cache.apply(SessionEvent::LoggedIn { user: json!({ "username": "reader" }) });
}

#[given(expr = "nobody is signed in")]
async fn given_anonymous(world: &mut ShelfgateWorld) {
    assert!(!world.cache.session().is_authenticated());
}

#[when(expr = "they navigate to {string}")]
async fn when_navigate(world: &mut ShelfgateWorld, destination: String) {
    world.navigate(&destination);
}

#[then(expr = "the page renders")]
async fn then_renders(world: &mut ShelfgateWorld) {
    assert_eq!(world.last_decision, Some(AccessDecision::Allow));
    assert!(world.outcome().is_render());
}

#[then(expr = "they are sent to the login page")]
async fn then_login(world: &mut ShelfgateWorld) {
    assert_eq!(world.last_decision, Some(AccessDecision::DenyRedirectLogin));
    let location = world.outcome().location().expect("redirect expected");
    assert!(
        location.starts_with(&world.config.routes.login_path),
        "unexpected login redirect {}",
        location
    );
}

#[then(expr = "they are sent home")]
async fn then_home(world: &mut ShelfgateWorld) {
    assert_eq!(world.last_decision, Some(AccessDecision::DenyRedirectHome));
    assert_eq!(world.outcome().location(), Some(world.config.routes.home_path.as_str()));
}

#[then(expr = "they are sent to {string}")]
async fn then_redirected_to(world: &mut ShelfgateWorld, location: String) {
    assert_eq!(world.outcome().location(), Some(location.as_str()));
}

#[then(expr = "signing in brings them back to {string}")]
async fn then_return_to(world: &mut ShelfgateWorld, destination: String) {
    let location = world.outcome().location().expect("redirect expected");
    let (_, query) = location.split_once('?').expect("login redirect without query");
    assert_eq!(world.gate.guard().return_to(query), destination);
}
