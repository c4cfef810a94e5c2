use crate::features::world::{split_list, ShelfgateWorld};
use cucumber::{then, when};
use shelfgate_core::navigation::NavigationMenu;

#[when(expr = "the menu offers {string}")]
async fn when_menu_offers(world: &mut ShelfgateWorld, entries: String) {
    let entries = split_list(&entries);
    world.visible = world.gate.filter().retain_visible(world.cache.session(), entries);
}

#[when(expr = "the {word} menu is rendered")]
async fn when_menu_rendered(world: &mut ShelfgateWorld, name: String) {
    let menu = NavigationMenu::by_name(&name).expect("unknown menu");
    world.visible = world
        .gate
        .menu(&menu, world.cache.session())
        .into_iter()
        .map(|entry| entry.destination.clone())
        .collect();
}

#[then(expr = "they see {string}")]
async fn then_they_see(world: &mut ShelfgateWorld, expected: String) {
    assert_eq!(world.visible, split_list(&expected));
}

#[then(expr = "they see no entries")]
async fn then_they_see_nothing(world: &mut ShelfgateWorld) {
    assert!(world.visible.is_empty(), "visible: {:?}", world.visible);
}

#[then(expr = "every visible entry renders")]
async fn then_visible_entries_render(world: &mut ShelfgateWorld) {
    for destination in world.visible.clone() {
        world.navigate(&destination);
        assert!(world.outcome().is_render(), "{} is visible but redirects", destination);
    }
}
