use shelfgate_core::config::ShelfgateConfig;
use shelfgate_core::rbac::AccessMatrix;
use shelfgate_core::Shelfgate;

/// Decision table for every policy key.
pub fn run(config: &ShelfgateConfig) -> anyhow::Result<String> {
    let gate = Shelfgate::from_config(config)?;
    Ok(AccessMatrix::for_policy(gate.guard().evaluator()).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_line_per_policy_key() {
        let out = run(&ShelfgateConfig::default()).unwrap();
        let mut lines = out.lines();
        assert!(lines.next().unwrap().starts_with("destination"));
        assert_eq!(lines.count(), 15);
        assert!(out.contains("-> /admin/books"));
    }
}
