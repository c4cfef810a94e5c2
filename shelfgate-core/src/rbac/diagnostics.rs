//! Policy diagnostics: access matrix and lint

use super::context::Session;
use super::evaluator::{AccessDecision, AccessEvaluator};
use super::policy::AccessPolicy;
use super::roles::{NormalizedRole, RoleSet};
use std::fmt;

/// Something legal but probably unintended in a policy table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyWarning {
    /// Roles redirected to `fallback` are denied there too and bounce again
    FallbackDenied { destination: String, fallback: String, roles: RoleSet },
    /// The fallback has its own fallback, so a denial takes several redirects
    ChainedFallback { destination: String, fallback: String, next: String },
}

impl fmt::Display for PolicyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyWarning::FallbackDenied { destination, fallback, roles } => write!(
                f,
                "{}: fallback {} is also denied to [{}]",
                destination, fallback, roles
            ),
            PolicyWarning::ChainedFallback { destination, fallback, next } => write!(
                f,
                "{}: fallback {} redirects again to {}",
                destination, fallback, next
            ),
        }
    }
}

/// Check every fallback against the roles that would be sent there
pub fn lint(policy: &AccessPolicy) -> Vec<PolicyWarning> {
    let mut warnings = Vec::new();

    for (pattern, entry) in policy.entries() {
        let Some(fallback) = entry.fallback() else {
            continue;
        };
        let Some(target) = policy.policy_for(fallback) else {
            continue;
        };

        let bounced: RoleSet = NormalizedRole::ALL
            .into_iter()
            .filter(|role| !entry.allows(*role) && !target.allows(*role))
            .collect();
        if !bounced.is_empty() {
            warnings.push(PolicyWarning::FallbackDenied {
                destination: pattern.to_string(),
                fallback: fallback.to_string(),
                roles: bounced,
            });
        }

        if let Some(next) = target.fallback() {
            warnings.push(PolicyWarning::ChainedFallback {
                destination: pattern.to_string(),
                fallback: fallback.to_string(),
                next: next.to_string(),
            });
        }
    }

    for warning in &warnings {
        log::warn!("Policy lint: {}", warning);
    }
    warnings
}

/// One row of the matrix
#[derive(Debug, Clone)]
pub struct MatrixRow {
    pub destination: String,
    /// Decision for an unauthenticated visitor
    pub anonymous: AccessDecision,
    /// Decisions in [`NormalizedRole::ALL`] order
    pub by_role: Vec<AccessDecision>,
}

/// Decisions for every role across a list of destinations
#[derive(Debug, Clone)]
pub struct AccessMatrix {
    pub rows: Vec<MatrixRow>,
}

impl AccessMatrix {
    pub fn build<S: AsRef<str>>(evaluator: &AccessEvaluator, destinations: &[S]) -> Self {
        let rows = destinations
            .iter()
            .map(|destination| {
                let destination = destination.as_ref();
                MatrixRow {
                    destination: destination.to_string(),
                    anonymous: evaluator.evaluate(&Session::Unauthenticated, destination),
                    by_role: NormalizedRole::ALL
                        .into_iter()
                        .map(|role| evaluator.evaluate(&Session::authenticated(role), destination))
                        .collect(),
                }
            })
            .collect();
        Self { rows }
    }

    /// Matrix over every key of the evaluator's policy, in declaration order
    pub fn for_policy(evaluator: &AccessEvaluator) -> Self {
        let keys: Vec<String> =
            evaluator.policy().entries().map(|(pattern, _)| pattern.to_string()).collect();
        Self::build(evaluator, &keys)
    }

    pub fn row(&self, destination: &str) -> Option<&MatrixRow> {
        self.rows.iter().find(|row| row.destination == destination)
    }
}

fn cell(decision: &AccessDecision) -> String {
    match decision {
        AccessDecision::Allow => "yes".to_string(),
        AccessDecision::DenyRedirectLogin => "login".to_string(),
        AccessDecision::DenyRedirectHome => "home".to_string(),
        AccessDecision::DenyRedirectFallback(to) => format!("-> {}", to),
    }
}

impl fmt::Display for AccessMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.rows.iter().map(|row| row.destination.len()).max().unwrap_or(0).max(11);

        write!(f, "{:width$}  {:>9}", "destination", "anonymous", width = width)?;
        for role in NormalizedRole::ALL {
            write!(f, "  {:>9}", role.as_str())?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(f, "{:width$}  {:>9}", row.destination, cell(&row.anonymous), width = width)?;
            for decision in &row.by_role {
                write!(f, "  {:>9}", cell(decision))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
