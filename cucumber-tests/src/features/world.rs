use cucumber::World as CucumberWorld;
use serde_json::{json, Value};
use shelfgate_core::config::ShelfgateConfig;
use shelfgate_core::http::GuardOutcome;
use shelfgate_core::rbac::AccessDecision;
use shelfgate_core::session::{SessionCache, SessionEvent};
use shelfgate_core::Shelfgate;

/// Shared state for one scenario
#[derive(Debug, CucumberWorld)]
#[world(init = Self::new)]
pub struct ShelfgateWorld {
    pub config: ShelfgateConfig,
    pub gate: Shelfgate,
    pub cache: SessionCache,
    pub last_decision: Option<AccessDecision>,
    pub last_outcome: Option<GuardOutcome>,
    pub visible: Vec<String>,
}

impl ShelfgateWorld {
    pub fn new() -> Self {
        let config = ShelfgateConfig::default();
        let gate = Shelfgate::from_config(&config).expect("library policy must build");
        Self {
            config,
            gate,
            cache: SessionCache::new(),
            last_decision: None,
            last_outcome: None,
            visible: Vec::new(),
        }
    }

    /// Rebuild the gate after a configuration change
    pub fn reconfigure(&mut self, config: ShelfgateConfig) {
        self.gate = Shelfgate::from_config(&config).expect("library policy must build");
        self.config = config;
    }

    pub fn sign_in(&mut self, role: Value) {
        self.cache.apply(SessionEvent::LoggedIn {
            user: json!({ "username": "reader", "role": role }),
        });
    }

    /// Decide and record both the decision and the render instruction
    pub fn navigate(&mut self, destination: &str) {
        let session = self.cache.session();
        self.last_decision = Some(self.gate.decide(session, destination));
        self.last_outcome = Some(self.gate.navigate(session, destination));
    }

    pub fn outcome(&self) -> &GuardOutcome {
        self.last_outcome.as_ref().expect("no navigation attempted")
    }
}

impl Default for ShelfgateWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a `"a, b, c"` step argument into its items
pub fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
