//! Navigation filtering for menus and sidebars
//!
//! Hiding an entry is display-only: whether the route itself is reachable is
//! the route guard's call. Both read the same policy table, so a menu never
//! advertises a destination its viewer would be bounced from.

use crate::http::RouteGuard;
use crate::rbac::{AccessEvaluator, NormalizedRole, Session};

/// Anything that names a destination
pub trait Navigable {
    fn destination(&self) -> &str;
}

impl Navigable for str {
    fn destination(&self) -> &str {
        self
    }
}

impl Navigable for &str {
    fn destination(&self) -> &str {
        self
    }
}

impl Navigable for String {
    fn destination(&self) -> &str {
        self
    }
}

/// One menu item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntry {
    /// Stable identifier, e.g. for i18n lookups
    pub key: String,
    pub label: String,
    pub destination: String,
}

impl NavigationEntry {
    pub fn new(key: &str, label: &str, destination: &str) -> Self {
        Self { key: key.to_string(), label: label.to_string(), destination: destination.to_string() }
    }
}

impl Navigable for NavigationEntry {
    fn destination(&self) -> &str {
        &self.destination
    }
}

/// Filters entries down to the ones the session may open
#[derive(Debug, Clone)]
pub struct NavigationFilter {
    evaluator: AccessEvaluator,
}

impl NavigationFilter {
    pub fn new(evaluator: AccessEvaluator) -> Self {
        Self { evaluator }
    }

    /// Visible entries, in their original order, duplicates kept
    pub fn filter<'a, T: Navigable>(&self, session: &Session, entries: &'a [T]) -> Vec<&'a T> {
        entries
            .iter()
            .filter(|entry| self.is_visible(session, *entry))
            .collect()
    }

    /// Owned variant of [`filter`](Self::filter)
    pub fn retain_visible<T: Navigable>(&self, session: &Session, entries: Vec<T>) -> Vec<T> {
        entries.into_iter().filter(|entry| self.is_visible(session, entry)).collect()
    }

    pub fn is_visible<T: Navigable + ?Sized>(&self, session: &Session, entry: &T) -> bool {
        self.evaluator.evaluate(session, entry.destination()).is_allowed()
    }
}

/// Entry shown to a viewer that the route guard would not render for them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoherenceIssue {
    pub menu: &'static str,
    /// `None` for an unauthenticated viewer
    pub role: Option<NormalizedRole>,
    pub destination: String,
}

/// A named, ordered menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationMenu {
    pub name: &'static str,
    pub entries: Vec<NavigationEntry>,
}

impl NavigationMenu {
    /// Back-office sidebar
    pub fn admin_sidebar() -> Self {
        Self {
            name: "admin",
            entries: vec![
                NavigationEntry::new("dashboard", "Dashboard", "/admin"),
                NavigationEntry::new("users", "Users", "/admin/users"),
                NavigationEntry::new("books", "Books", "/admin/books"),
                NavigationEntry::new("borrows", "Borrows", "/admin/borrows"),
                NavigationEntry::new("categories", "Categories", "/admin/categories"),
                NavigationEntry::new("events", "Events", "/admin/events"),
                NavigationEntry::new("reviews", "Reviews", "/admin/reviews"),
            ],
        }
    }

    /// Site header shown on every public page
    pub fn main_header() -> Self {
        Self {
            name: "header",
            entries: vec![
                NavigationEntry::new("home", "Home", "/"),
                NavigationEntry::new("catalog", "Catalog", "/books"),
                NavigationEntry::new("events", "Events", "/events"),
                NavigationEntry::new("my_borrows", "My borrows", "/my-borrows"),
                NavigationEntry::new("bookmarks", "Bookmarks", "/bookmarks"),
                NavigationEntry::new("my_events", "My events", "/my-events"),
                NavigationEntry::new("notifications", "Notifications", "/notifications"),
                NavigationEntry::new("profile", "Profile", "/profile"),
                NavigationEntry::new("admin", "Back office", "/admin"),
            ],
        }
    }

    /// Look a menu up by name ("admin" or "header")
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "admin" => Some(Self::admin_sidebar()),
            "header" => Some(Self::main_header()),
            _ => None,
        }
    }

    pub fn visible_for<'a>(
        &'a self,
        filter: &NavigationFilter,
        session: &Session,
    ) -> Vec<&'a NavigationEntry> {
        filter.filter(session, &self.entries)
    }

    /// Entries some viewer can see but the guard would redirect away from
    ///
    /// Empty whenever the filter and the guard share one policy table.
    pub fn coherence(&self, filter: &NavigationFilter, guard: &RouteGuard) -> Vec<CoherenceIssue> {
        let mut viewers = vec![(None, Session::Unauthenticated)];
        viewers.extend(
            NormalizedRole::ALL.into_iter().map(|role| (Some(role), Session::authenticated(role))),
        );

        let mut issues = Vec::new();
        for (role, session) in &viewers {
            for entry in self.visible_for(filter, session) {
                if !guard.instruction(session, &entry.destination).is_render() {
                    issues.push(CoherenceIssue {
                        menu: self.name,
                        role: *role,
                        destination: entry.destination.clone(),
                    });
                }
            }
        }
        issues
    }
}
