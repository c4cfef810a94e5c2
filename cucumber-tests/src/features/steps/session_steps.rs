use crate::features::world::ShelfgateWorld;
use cucumber::{then, when};
use serde_json::json;
use shelfgate_core::rbac::NormalizedRole;
use shelfgate_core::session::SessionEvent;

#[when(expr = "their profile is refreshed with role {string}")]
async fn when_profile_refreshed(world: &mut ShelfgateWorld, role: String) {
    world.cache.apply(SessionEvent::ProfileRefreshed {
        user: json!({ "username": "reader", "role": role }),
    });
}

#[when(expr = "they sign out")]
async fn when_sign_out(world: &mut ShelfgateWorld) {
    world.cache.apply(SessionEvent::LoggedOut);
}

#[then(expr = "their role is {string}")]
async fn then_role_is(world: &mut ShelfgateWorld, role: String) {
    let expected: NormalizedRole = role.parse().unwrap_or(NormalizedRole::Unknown);
    assert_eq!(world.cache.session().role(), Some(expected));
}

#[then(expr = "they are signed out")]
async fn then_signed_out(world: &mut ShelfgateWorld) {
    assert_eq!(world.cache.session().role(), None);
}
