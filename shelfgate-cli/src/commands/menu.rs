use std::fmt::Write;

use anyhow::anyhow;
use shelfgate_core::config::ShelfgateConfig;
use shelfgate_core::navigation::NavigationMenu;
use shelfgate_core::Shelfgate;

use super::viewer_session;
use crate::ViewerArgs;

/// Print the visible entries of a named menu, in menu order.
pub fn run(config: &ShelfgateConfig, viewer: &ViewerArgs, name: &str) -> anyhow::Result<String> {
    let menu = NavigationMenu::by_name(name)
        .ok_or_else(|| anyhow!("unknown menu \"{}\" (expected admin or header)", name))?;
    let gate = Shelfgate::from_config(config)?;
    let session = viewer_session(viewer);

    let visible = gate.menu(&menu, &session);
    let width = visible.iter().map(|entry| entry.label.len()).max().unwrap_or(0);

    let mut out = String::new();
    for entry in &visible {
        writeln!(out, "{:width$}  {}", entry.label, entry.destination, width = width)?;
    }
    if visible.is_empty() {
        writeln!(out, "(nothing visible for {})", session.label())?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(role: &str) -> ViewerArgs {
        ViewerArgs { role: Some(role.to_string()), anonymous: false }
    }

    #[test]
    fn moderator_admin_menu() {
        let out = run(&ShelfgateConfig::default(), &viewer("moderator"), "admin").unwrap();
        let destinations: Vec<&str> =
            out.lines().filter_map(|line| line.split_whitespace().last()).collect();
        assert_eq!(destinations, vec!["/admin/books", "/admin/events", "/admin/reviews"]);
    }

    #[test]
    fn student_sees_nothing_in_admin_menu() {
        let out = run(&ShelfgateConfig::default(), &viewer("student"), "admin").unwrap();
        assert_eq!(out, "(nothing visible for student)\n");
    }

    #[test]
    fn unknown_menu_is_an_error() {
        assert!(run(&ShelfgateConfig::default(), &viewer("admin"), "footer").is_err());
    }
}
