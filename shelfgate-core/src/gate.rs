//! Wiring: one policy shared by the route guard and the navigation filter

use crate::config::ShelfgateConfig;
use crate::http::{GuardOutcome, RouteGuard};
use crate::navigation::{NavigationEntry, NavigationFilter, NavigationMenu};
use crate::rbac::{AccessDecision, AccessEvaluator, AccessPolicy, Session};
use crate::Result;
use std::sync::Arc;

/// Route guard and navigation filter over the same policy table
#[derive(Debug, Clone)]
pub struct Shelfgate {
    guard: RouteGuard,
    filter: NavigationFilter,
}

impl Shelfgate {
    /// Library policy with the configured redirect destinations
    pub fn from_config(config: &ShelfgateConfig) -> Result<Self> {
        let policy = AccessPolicy::library()?;
        Ok(Self::with_policy(policy, config))
    }

    pub fn with_policy(policy: AccessPolicy, config: &ShelfgateConfig) -> Self {
        let evaluator = AccessEvaluator::new(Arc::new(policy));
        log::info!(
            "Shelfgate ready: {} guarded destinations, login at {}",
            evaluator.policy().len(),
            config.routes.login_path
        );
        Self {
            guard: RouteGuard::new(evaluator.clone(), config.routes.clone()),
            filter: NavigationFilter::new(evaluator),
        }
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    pub fn filter(&self) -> &NavigationFilter {
        &self.filter
    }

    pub fn policy(&self) -> &AccessPolicy {
        self.guard.evaluator().policy()
    }

    pub fn decide(&self, session: &Session, destination: &str) -> AccessDecision {
        self.guard.decide(session, destination)
    }

    pub fn navigate(&self, session: &Session, destination: &str) -> GuardOutcome {
        self.guard.instruction(session, destination)
    }

    pub fn menu<'a>(&self, menu: &'a NavigationMenu, session: &Session) -> Vec<&'a NavigationEntry> {
        menu.visible_for(&self.filter, session)
    }
}
