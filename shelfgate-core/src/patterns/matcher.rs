//! Destination path matching
//!
//! Supports exact paths and subtree wildcards ("/admin/books/*").

use std::borrow::Cow;
use std::fmt;

/// Strip query string, fragment and trailing slashes from a navigated path
///
/// `"/admin/users/?page=2#top"`, `"/admin//users//"` and `"/admin/users"`
/// name the same destination. Runs of `/` collapse to one. An empty input is
/// the site root.
pub fn canonical_path(raw: &str) -> Cow<'_, str> {
    let end = raw.find(|c: char| c == '?' || c == '#').unwrap_or(raw.len());
    let path = raw[..end].trim_end_matches('/');
    if path.is_empty() {
        return Cow::Borrowed("/");
    }
    if !path.contains("//") {
        return Cow::Borrowed(path);
    }

    let mut collapsed = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(c);
    }
    Cow::Owned(collapsed)
}

/// A policy key: either one exact path or every path below a prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathPattern {
    /// "/admin/users"
    Exact(String),
    /// "/admin/users/*", stored as the prefix including the trailing slash
    Subtree(String),
}

impl PathPattern {
    /// Parse a policy key; a trailing `/*` makes it a subtree pattern
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_suffix('*') {
            Some(prefix) if prefix.ends_with('/') => PathPattern::Subtree(prefix.to_string()),
            _ => PathPattern::Exact(canonical_path(pattern).into_owned()),
        }
    }

    /// Match a canonical path against this pattern
    ///
    /// A subtree pattern never matches its own root: "/admin/books/*" does
    /// not match "/admin/books".
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(exact) => exact == path,
            PathPattern::Subtree(prefix) => path.len() > prefix.len() && path.starts_with(prefix),
        }
    }

    /// Longer prefixes win when several subtree patterns match
    pub fn specificity(&self) -> usize {
        match self {
            PathPattern::Exact(exact) => exact.len(),
            PathPattern::Subtree(prefix) => prefix.len(),
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, PathPattern::Exact(_))
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathPattern::Exact(exact) => f.write_str(exact),
            PathPattern::Subtree(prefix) => write!(f, "{}*", prefix),
        }
    }
}
