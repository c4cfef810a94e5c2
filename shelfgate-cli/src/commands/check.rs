use std::fmt::Write;

use shelfgate_core::config::ShelfgateConfig;
use shelfgate_core::Shelfgate;

use super::viewer_session;
use crate::ViewerArgs;

/// Explain the decision for one navigation.
pub fn run(config: &ShelfgateConfig, viewer: &ViewerArgs, destination: &str) -> anyhow::Result<String> {
    let gate = Shelfgate::from_config(config)?;
    let session = viewer_session(viewer);
    let trace = gate.guard().evaluator().explain(&session, destination);

    let mut out = String::new();
    writeln!(out, "viewer:      {}", session.label())?;
    writeln!(out, "destination: {}", trace.destination)?;
    writeln!(out, "matched:     {}", trace.matched.as_deref().unwrap_or("(public)"))?;
    writeln!(out, "reason:      {}", trace.reason)?;
    writeln!(out, "decision:    {}", trace.decision)?;
    if let Some(to) = gate.navigate(&session, destination).location() {
        writeln!(out, "redirect:    {}", to)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(role: Option<&str>, destination: &str) -> String {
        let viewer = ViewerArgs { role: role.map(str::to_string), anonymous: role.is_none() };
        run(&ShelfgateConfig::default(), &viewer, destination).unwrap()
    }

    #[test]
    fn moderator_denied_users() {
        let out = check(Some("Moderator"), "/admin/users");
        assert!(out.contains("matched:     /admin/users\n"));
        assert!(out.contains("decision:    deny -> home"));
        assert!(out.contains("redirect:    /\n"));
    }

    #[test]
    fn anonymous_redirect_keeps_destination() {
        let out = check(None, "/bookmarks");
        assert!(out.contains("redirect:    /login?redirect=%2Fbookmarks"));
    }

    #[test]
    fn public_page_has_no_redirect() {
        let out = check(Some("student"), "/books");
        assert!(out.contains("(public)"));
        assert!(!out.contains("redirect:"));
    }
}
