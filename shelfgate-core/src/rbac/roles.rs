//! Role normalization for RBAC
//!
//! The backend hands the client a free-text `role` field. Everything past this
//! module works on [`NormalizedRole`] and never sees the raw shape.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Closed set of roles the library client knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NormalizedRole {
    Admin,
    Moderator,
    Librarian,
    Teacher,
    Student,
    /// Signed in, but the role field was missing, mis-spelled or not a string
    Unknown,
}

impl NormalizedRole {
    /// Every role, in display order (`Unknown` last)
    pub const ALL: [NormalizedRole; 6] = [
        NormalizedRole::Admin,
        NormalizedRole::Moderator,
        NormalizedRole::Librarian,
        NormalizedRole::Teacher,
        NormalizedRole::Student,
        NormalizedRole::Unknown,
    ];

    /// Lower-case canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizedRole::Admin => "admin",
            NormalizedRole::Moderator => "moderator",
            NormalizedRole::Librarian => "librarian",
            NormalizedRole::Teacher => "teacher",
            NormalizedRole::Student => "student",
            NormalizedRole::Unknown => "unknown",
        }
    }

    /// Whether this is one of the five recognized roles
    pub fn is_known(&self) -> bool {
        !matches!(self, NormalizedRole::Unknown)
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for NormalizedRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NormalizedRole {
    type Err = std::convert::Infallible;

    /// Never fails: unrecognized spellings become `Unknown`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(normalize_str(s))
    }
}

/// Normalize a raw role value from a user record
///
/// Strings are ASCII case-folded and matched against the known role names.
/// Anything else (null, numbers, objects, arrays) is `Unknown`.
pub fn normalize(raw: &Value) -> NormalizedRole {
    match raw {
        Value::String(s) => normalize_str(s),
        _ => NormalizedRole::Unknown,
    }
}

/// Normalize a role that is already known to be a string
pub fn normalize_str(raw: &str) -> NormalizedRole {
    match raw.to_ascii_lowercase().as_str() {
        "admin" => NormalizedRole::Admin,
        "moderator" => NormalizedRole::Moderator,
        "librarian" => NormalizedRole::Librarian,
        "teacher" => NormalizedRole::Teacher,
        "student" => NormalizedRole::Student,
        _ => NormalizedRole::Unknown,
    }
}

/// Compact set of normalized roles
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Any signed-in user, including one whose role is `Unknown`
    pub fn authenticated() -> Self {
        Self::from_roles(&NormalizedRole::ALL)
    }

    pub fn from_roles(roles: &[NormalizedRole]) -> Self {
        roles.iter().fold(Self::empty(), |set, role| set.with(*role))
    }

    pub fn with(mut self, role: NormalizedRole) -> Self {
        self.0 |= role.bit();
        self
    }

    pub fn contains(&self, role: NormalizedRole) -> bool {
        self.0 & role.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in [`NormalizedRole::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = NormalizedRole> + '_ {
        NormalizedRole::ALL.into_iter().filter(move |role| self.contains(*role))
    }
}

impl FromIterator<NormalizedRole> for RoleSet {
    fn from_iter<I: IntoIterator<Item = NormalizedRole>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |set, role| set.with(role))
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::authenticated() {
            return f.write_str("any authenticated");
        }
        let names: Vec<&str> = self.iter().map(|r| r.as_str()).collect();
        f.write_str(&names.join(", "))
    }
}
