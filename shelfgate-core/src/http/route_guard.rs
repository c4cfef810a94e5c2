//! Route Guard - render-time gate for protected destinations
//!
//! Turns an [`AccessDecision`] into what the navigation layer must do:
//! render the page or redirect somewhere else. A denied destination never
//! renders partial content.
//!
//! Example:
//! ```ignore
//! let guard = RouteGuard::new(evaluator, RoutesConfig::default());
//! match guard.instruction(cache.session(), "/admin/users?page=2") {
//!     GuardOutcome::Render => render_page(),
//!     GuardOutcome::Redirect { to, .. } => navigate(&to),
//! }
//! ```

use crate::config::RoutesConfig;
use crate::patterns::canonical_path;
use crate::rbac::{AccessDecision, AccessEvaluator, Session};
use bytes::Bytes;
use http_body_util::Full;
use ::http::{header, Response, StatusCode};

type Resp = Response<Full<Bytes>>;

/// What the navigation layer should do with the current navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the requested destination
    Render,
    /// Navigate elsewhere instead
    Redirect {
        to: String,
        /// Decision that caused the redirect
        decision: AccessDecision,
    },
}

impl GuardOutcome {
    pub fn is_render(&self) -> bool {
        matches!(self, GuardOutcome::Render)
    }

    /// Redirect target, if any
    pub fn location(&self) -> Option<&str> {
        match self {
            GuardOutcome::Render => None,
            GuardOutcome::Redirect { to, .. } => Some(to),
        }
    }

    /// `302 Found` for a redirect, `None` when the page should render
    ///
    /// For hosts that prerender or serve the client shell server-side. The
    /// target is escaped in the HTML fallback body.
    pub fn into_response(self) -> Result<Option<Resp>, ::http::Error> {
        let GuardOutcome::Redirect { to, .. } = self else {
            return Ok(None);
        };

        let response = Response::builder()
            .status(StatusCode::FOUND)
            .header(header::LOCATION, to.as_str())
            .header(header::CONTENT_TYPE, "text/html")
            .header(header::CACHE_CONTROL, "no-store")
            .body(Full::new(Bytes::from(format!(
                r#"<!DOCTYPE html>
<html><head><meta http-equiv="refresh" content="0;url={}"></head>
<body><p>Redirecting...</p></body></html>"#,
                escape_html(&to)
            ))))?;
        Ok(Some(response))
    }
}

/// Gate consulted on every navigation
#[derive(Debug, Clone)]
pub struct RouteGuard {
    evaluator: AccessEvaluator,
    routes: RoutesConfig,
}

impl RouteGuard {
    pub fn new(evaluator: AccessEvaluator, routes: RoutesConfig) -> Self {
        Self { evaluator, routes }
    }

    pub fn evaluator(&self) -> &AccessEvaluator {
        &self.evaluator
    }

    pub fn routes(&self) -> &RoutesConfig {
        &self.routes
    }

    /// Raw decision for `destination`
    pub fn decide(&self, session: &Session, destination: &str) -> AccessDecision {
        self.evaluator.evaluate(session, destination)
    }

    /// Render instruction for `destination`
    ///
    /// The login redirect carries the full requested destination (query
    /// string included) so the user lands back on it after signing in.
    pub fn instruction(&self, session: &Session, destination: &str) -> GuardOutcome {
        let decision = self.decide(session, destination);
        let to = match &decision {
            AccessDecision::Allow => return GuardOutcome::Render,
            AccessDecision::DenyRedirectLogin => self.login_redirect(destination),
            AccessDecision::DenyRedirectFallback(fallback) => fallback.clone(),
            AccessDecision::DenyRedirectHome => self.routes.home_path.clone(),
        };

        log::debug!("Route guard: {} -> {} redirected to {}", session.label(), destination, to);
        GuardOutcome::Redirect { to, decision }
    }

    /// Login URL remembering where the user was going
    pub fn login_redirect(&self, requested: &str) -> String {
        let separator = if self.routes.login_path.contains('?') { '&' } else { '?' };
        format!(
            "{}{}{}={}",
            self.routes.login_path,
            separator,
            self.routes.return_param,
            urlencoding::encode(requested)
        )
    }

    /// Destination to go to after a successful login
    ///
    /// `query` is the login page's query string (with or without the leading
    /// `?`). Only same-site absolute paths are honoured; anything else,
    /// including a return to the login page itself, goes home.
    pub fn return_to(&self, query: &str) -> String {
        let query = query.strip_prefix('?').unwrap_or(query);

        let requested = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == self.routes.return_param)
            .and_then(|(_, value)| urlencoding::decode(value).ok())
            .map(|value| value.into_owned());

        match requested {
            Some(path) if is_same_site(&path) && !self.is_login(&path) => path,
            Some(path) => {
                log::warn!("Ignoring unsafe return destination {:?}", path);
                self.routes.home_path.clone()
            }
            None => self.routes.home_path.clone(),
        }
    }

    fn is_login(&self, path: &str) -> bool {
        canonical_path(path) == canonical_path(&self.routes.login_path)
    }
}

/// Browsers drop tab, CR and LF from URLs, so "/\t/evil" would become
/// "//evil". Any control character or whitespace disqualifies the path.
fn is_same_site(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.starts_with("/\\")
        && !path.chars().any(|c| c.is_control() || c.is_whitespace())
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbac::{AccessPolicy, NormalizedRole};
    use std::sync::Arc;

    fn guard() -> RouteGuard {
        let evaluator = AccessEvaluator::new(Arc::new(AccessPolicy::library().unwrap()));
        RouteGuard::new(evaluator, RoutesConfig::default())
    }

    #[test]
    fn test_allowed_destination_renders() {
        let session = Session::authenticated(NormalizedRole::Admin);
        assert_eq!(guard().instruction(&session, "/admin/users"), GuardOutcome::Render);
        assert_eq!(guard().instruction(&Session::Unauthenticated, "/books"), GuardOutcome::Render);
    }

    #[test]
    fn test_unauthenticated_goes_to_login_with_return_path() {
        let outcome = guard().instruction(&Session::Unauthenticated, "/admin/books?page=2");
        assert_eq!(
            outcome,
            GuardOutcome::Redirect {
                to: "/login?redirect=%2Fadmin%2Fbooks%3Fpage%3D2".to_string(),
                decision: AccessDecision::DenyRedirectLogin,
            }
        );
    }

    #[test]
    fn test_denied_role_goes_to_fallback() {
        let session = Session::authenticated(NormalizedRole::Teacher);
        let outcome = guard().instruction(&session, "/admin/reviews");
        assert_eq!(outcome.location(), Some("/admin/books"));
    }

    #[test]
    fn test_denied_role_without_fallback_goes_home() {
        let session = Session::authenticated(NormalizedRole::Moderator);
        let outcome = guard().instruction(&session, "/admin/users");
        assert_eq!(
            outcome,
            GuardOutcome::Redirect { to: "/".to_string(), decision: AccessDecision::DenyRedirectHome }
        );
    }

    #[test]
    fn test_custom_routes() {
        let evaluator = AccessEvaluator::new(Arc::new(AccessPolicy::library().unwrap()));
        let routes = RoutesConfig {
            login_path: "/auth?mode=signin".to_string(),
            home_path: "/catalog".to_string(),
            return_param: "next".to_string(),
        };
        let guard = RouteGuard::new(evaluator, routes);

        assert_eq!(
            guard.instruction(&Session::Unauthenticated, "/profile").location(),
            Some("/auth?mode=signin&next=%2Fprofile")
        );
        assert_eq!(
            guard.instruction(&Session::authenticated(NormalizedRole::Student), "/admin").location(),
            Some("/catalog")
        );
    }

    #[test]
    fn test_return_to_round_trip() {
        let guard = guard();
        let login = guard.login_redirect("/admin/books?page=2");
        let query = login.split_once('?').map(|(_, q)| q).unwrap();
        assert_eq!(guard.return_to(query), "/admin/books?page=2");
    }

    #[test]
    fn test_return_to_rejects_open_redirects() {
        let guard = guard();
        assert_eq!(guard.return_to("?redirect=https%3A%2F%2Fevil.example"), "/");
        assert_eq!(guard.return_to("redirect=%2F%2Fevil.example"), "/");
        assert_eq!(guard.return_to("redirect=%2F%5Cevil.example"), "/");
        assert_eq!(guard.return_to("redirect=%2Flogin"), "/");
        assert_eq!(guard.return_to(""), "/");
        assert_eq!(guard.return_to("other=1"), "/");
    }

    #[test]
    fn test_return_to_rejects_control_characters() {
        let guard = guard();
        assert_eq!(guard.return_to("redirect=%2F%09%2Fevil.example"), "/");
        assert_eq!(guard.return_to("redirect=%2F%0A%2Fevil.example"), "/");
        assert_eq!(guard.return_to("redirect=%2F%0D%2Fevil.example"), "/");
        assert_eq!(guard.return_to("redirect=%2Fbooks%20new"), "/");
        assert_eq!(guard.return_to("redirect=%2Fbooks%2F12"), "/books/12");
    }

    #[test]
    fn test_redirect_response() {
        let session = Session::authenticated(NormalizedRole::Moderator);
        let response = guard().instruction(&session, "/admin").into_response().unwrap().unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

        assert!(GuardOutcome::Render.into_response().unwrap().is_none());
    }

    #[test]
    fn test_redirect_body_is_escaped() {
        assert_eq!(escape_html("/catalog?q=\"><script>"), "/catalog?q=&quot;&gt;&lt;script&gt;");
        assert_eq!(escape_html("/books?a=1&b='2'"), "/books?a=1&amp;b=&#x27;2&#x27;");

        let outcome = GuardOutcome::Redirect {
            to: "/catalog?q=<x>".to_string(),
            decision: AccessDecision::DenyRedirectHome,
        };
        let response = outcome.into_response().unwrap().unwrap();
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/catalog?q=<x>");
    }
}
