use std::fmt::Write;
use std::path::Path;

use anyhow::bail;
use shelfgate_core::config::ShelfgateConfig;
use shelfgate_core::navigation::NavigationMenu;
use shelfgate_core::rbac::lint;
use shelfgate_core::Shelfgate;

/// Report lint warnings; fail if a menu shows an entry the guard would refuse.
pub fn run(config: &ShelfgateConfig, path: &Path) -> anyhow::Result<String> {
    let gate = Shelfgate::from_config(config)?;

    let mut out = String::new();
    if path.exists() {
        writeln!(out, "config:   {} ok", path.display())?;
    } else {
        writeln!(out, "config:   defaults ({} not found)", path.display())?;
    }
    writeln!(out, "policy:   {} guarded destinations", gate.policy().len())?;

    for warning in lint(gate.policy()) {
        writeln!(out, "warning:  {}", warning)?;
    }

    let issues: Vec<_> = [NavigationMenu::admin_sidebar(), NavigationMenu::main_header()]
        .iter()
        .flat_map(|menu| menu.coherence(gate.filter(), gate.guard()))
        .collect();
    if !issues.is_empty() {
        for issue in &issues {
            log::error!(
                "Menu {} shows {} to {:?} but the guard redirects",
                issue.menu,
                issue.destination,
                issue.role
            );
        }
        bail!("{} menu entries are not reachable by their viewers", issues.len());
    }
    writeln!(out, "menus:    coherent")?;
    Ok(out)
}
