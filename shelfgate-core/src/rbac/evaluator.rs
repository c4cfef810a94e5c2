//! Access evaluation
//!
//! Pure function of (session, destination) over an immutable policy. Every
//! anomaly ends up as one of the [`AccessDecision`] variants; nothing here can
//! fail.

use super::context::Session;
use super::policy::AccessPolicy;
use super::roles::NormalizedRole;
use std::fmt;
use std::sync::Arc;

/// Outcome of evaluating one navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// Not signed in and the destination is guarded
    DenyRedirectLogin,
    /// Signed in, wrong role, the entry names somewhere else to go
    DenyRedirectFallback(String),
    /// Signed in, wrong role, no fallback declared
    DenyRedirectHome,
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }
}

impl fmt::Display for AccessDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessDecision::Allow => f.write_str("allow"),
            AccessDecision::DenyRedirectLogin => f.write_str("deny -> login"),
            AccessDecision::DenyRedirectFallback(to) => write!(f, "deny -> {}", to),
            AccessDecision::DenyRedirectHome => f.write_str("deny -> home"),
        }
    }
}

/// Why a decision came out the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    /// No policy entry covers the destination
    PublicDestination,
    NotAuthenticated,
    RoleAllowed(NormalizedRole),
    RoleDenied(NormalizedRole),
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionReason::PublicDestination => f.write_str("destination is public"),
            DecisionReason::NotAuthenticated => f.write_str("not signed in"),
            DecisionReason::RoleAllowed(role) => write!(f, "role {} is allowed", role),
            DecisionReason::RoleDenied(role) => write!(f, "role {} is not allowed", role),
        }
    }
}

/// Decision plus the policy key it was derived from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTrace {
    pub destination: String,
    pub decision: AccessDecision,
    /// Policy key that matched, `None` for public destinations
    pub matched: Option<String>,
    pub reason: DecisionReason,
}

/// Evaluates sessions against a shared policy table
#[derive(Debug, Clone)]
pub struct AccessEvaluator {
    policy: Arc<AccessPolicy>,
}

impl AccessEvaluator {
    pub fn new(policy: Arc<AccessPolicy>) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// Decide whether `session` may reach `destination`
    pub fn evaluate(&self, session: &Session, destination: &str) -> AccessDecision {
        self.explain(session, destination).decision
    }

    /// Same as [`evaluate`](Self::evaluate); a missing session is unauthenticated
    pub fn evaluate_optional(&self, session: Option<&Session>, destination: &str) -> AccessDecision {
        self.evaluate(session.unwrap_or(&Session::Unauthenticated), destination)
    }

    /// Evaluate and keep the matched key and reason
    pub fn explain(&self, session: &Session, destination: &str) -> AccessTrace {
        let (matched, decision, reason) = match self.policy.lookup(destination) {
            None => (None, AccessDecision::Allow, DecisionReason::PublicDestination),
            Some((pattern, entry)) => {
                let (decision, reason) = match session.role() {
                    None => (AccessDecision::DenyRedirectLogin, DecisionReason::NotAuthenticated),
                    Some(role) if entry.allows(role) => {
                        (AccessDecision::Allow, DecisionReason::RoleAllowed(role))
                    }
                    Some(role) => {
                        let decision = match entry.fallback() {
                            Some(fallback) => {
                                AccessDecision::DenyRedirectFallback(fallback.to_string())
                            }
                            None => AccessDecision::DenyRedirectHome,
                        };
                        (decision, DecisionReason::RoleDenied(role))
                    }
                };
                (Some(pattern.to_string()), decision, reason)
            }
        };

        if !decision.is_allowed() {
            log::debug!(
                "Access denied: {} -> {} ({}, {})",
                session.label(),
                destination,
                reason,
                decision
            );
        }

        AccessTrace { destination: destination.to_string(), decision, matched, reason }
    }
}
