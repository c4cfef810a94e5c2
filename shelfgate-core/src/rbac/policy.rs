//! Access policy table
//!
//! Maps each guarded destination to the roles allowed to reach it. The table
//! is built once and never mutated; a destination with no entry is public.

use super::roles::{NormalizedRole, RoleSet};
use crate::patterns::{canonical_path, PathPattern};
use std::collections::HashMap;

/// Errors raised while building a policy table
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Destination {destination} has an empty role set")]
    EmptyRoles { destination: String },
    #[error("Destination {destination} is declared more than once")]
    DuplicateDestination { destination: String },
    #[error("Invalid destination {destination}: must start with '/'")]
    InvalidDestination { destination: String },
    #[error("Destination {destination} declares itself as its fallback")]
    SelfFallback { destination: String },
}

/// Roles allowed to reach one destination, plus where to send everyone else
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyEntry {
    allowed_roles: RoleSet,
    fallback: Option<String>,
}

impl PolicyEntry {
    /// Roles allowed through. Never empty once the entry is in a table.
    pub fn allowed_roles(&self) -> RoleSet {
        self.allowed_roles
    }

    /// Destination for signed-in users whose role is not allowed
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    pub fn allows(&self, role: NormalizedRole) -> bool {
        self.allowed_roles.contains(role)
    }
}

/// Immutable destination → entry table
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    /// Declaration order, kept for reports
    entries: Vec<(PathPattern, PolicyEntry)>,
    exact: HashMap<String, usize>,
}

impl AccessPolicy {
    pub fn builder() -> AccessPolicyBuilder {
        AccessPolicyBuilder::default()
    }

    /// The library client's compiled-in policy
    pub fn library() -> Result<Self, PolicyError> {
        use NormalizedRole::*;

        let admin_only = RoleSet::from_roles(&[Admin]);
        let staff = RoleSet::from_roles(&[Admin, Librarian]);
        let content = RoleSet::from_roles(&[Admin, Librarian, Moderator]);
        let signed_in = RoleSet::authenticated();

        Self::builder()
            // Back-office
            .guard("/admin", staff)
            .guard("/admin/users", admin_only)
            .guard("/admin/users/*", admin_only)
            .guard("/admin/books", content)
            .guard("/admin/books/*", content)
            .guard("/admin/events", content)
            .guard("/admin/events/*", content)
            .guard_with_fallback("/admin/reviews", content, "/admin/books")
            .guard("/admin/borrows", staff)
            .guard("/admin/categories", staff)
            // Member area
            .guard("/profile", signed_in)
            .guard("/my-borrows", signed_in)
            .guard("/bookmarks", signed_in)
            .guard("/notifications", signed_in)
            .guard("/my-events", signed_in)
            .build()
    }

    /// Entry governing a destination, if any
    ///
    /// Exact keys win; otherwise the longest matching subtree pattern.
    pub fn policy_for(&self, destination: &str) -> Option<&PolicyEntry> {
        self.lookup(destination).map(|(_, entry)| entry)
    }

    /// Like [`policy_for`](Self::policy_for), also returning the matched key
    pub fn lookup(&self, destination: &str) -> Option<(&PathPattern, &PolicyEntry)> {
        let path = canonical_path(destination);

        if let Some(&idx) = self.exact.get(&*path) {
            let (pattern, entry) = &self.entries[idx];
            return Some((pattern, entry));
        }

        self.entries
            .iter()
            .filter(|(pattern, _)| !pattern.is_exact() && pattern.matches(&path))
            .max_by_key(|(pattern, _)| pattern.specificity())
            .map(|(pattern, entry)| (pattern, entry))
    }

    /// Whether the destination requires any role at all
    pub fn is_guarded(&self, destination: &str) -> bool {
        self.lookup(destination).is_some()
    }

    /// Entries in declaration order
    pub fn entries(&self) -> impl Iterator<Item = (&PathPattern, &PolicyEntry)> {
        self.entries.iter().map(|(pattern, entry)| (pattern, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder validating every entry before the table is frozen
#[derive(Debug, Default)]
pub struct AccessPolicyBuilder {
    pending: Vec<(String, RoleSet, Option<String>)>,
}

impl AccessPolicyBuilder {
    /// Guard a destination; denied signed-in users go home
    pub fn guard(mut self, destination: impl Into<String>, roles: RoleSet) -> Self {
        self.pending.push((destination.into(), roles, None));
        self
    }

    /// Guard a destination; denied signed-in users go to `fallback`
    pub fn guard_with_fallback(
        mut self,
        destination: impl Into<String>,
        roles: RoleSet,
        fallback: impl Into<String>,
    ) -> Self {
        self.pending.push((destination.into(), roles, Some(fallback.into())));
        self
    }

    pub fn build(self) -> Result<AccessPolicy, PolicyError> {
        let mut entries = Vec::with_capacity(self.pending.len());
        let mut exact = HashMap::new();
        let mut seen = std::collections::HashSet::new();

        for (destination, roles, fallback) in self.pending {
            if !destination.starts_with('/') {
                return Err(PolicyError::InvalidDestination { destination });
            }
            if roles.is_empty() {
                return Err(PolicyError::EmptyRoles { destination });
            }

            let pattern = PathPattern::parse(&destination);
            if !seen.insert(pattern.clone()) {
                return Err(PolicyError::DuplicateDestination { destination });
            }

            let fallback = match fallback {
                Some(target) if !target.starts_with('/') => {
                    return Err(PolicyError::InvalidDestination { destination: target });
                }
                Some(target) => {
                    let target = canonical_path(&target).into_owned();
                    if pattern.matches(&target) {
                        return Err(PolicyError::SelfFallback { destination });
                    }
                    Some(target)
                }
                None => None,
            };

            if let PathPattern::Exact(path) = &pattern {
                exact.insert(path.clone(), entries.len());
            }
            entries.push((pattern, PolicyEntry { allowed_roles: roles, fallback }));
        }

        log::debug!("Access policy built with {} entries", entries.len());
        Ok(AccessPolicy { entries, exact })
    }
}
