//! Navigation seam shared by the session holder and the access guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Session and guard logic only needs three things from the router: the
//! current path, the query string, and "go to X". `RouterNavigator` adapts
//! `leptos_router`; tests use an in-memory navigator.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

pub trait Navigator {
    /// Current path without query string.
    fn pathname(&self) -> String;

    /// Current query string without the leading `?`.
    fn query(&self) -> String;

    /// Push a new history entry.
    fn navigate(&self, to: &str);

    /// Replace the current history entry.
    fn replace(&self, to: &str) {
        self.navigate(to);
    }

    /// Path plus query, the form redirect targets are compared against.
    fn location(&self) -> String {
        join_location(&self.pathname(), &self.query())
    }

    fn query_param(&self, key: &str) -> Option<String> {
        query_param(&self.query(), key)
    }
}

/// Push `to` unless the browser is already there. Returns whether a
/// navigation was issued.
pub fn navigate_if_elsewhere(nav: &impl Navigator, to: &str) -> bool {
    if nav.location() == to {
        log::debug!("nav: already at {to}");
        return false;
    }
    nav.navigate(to);
    true
}

pub fn join_location(pathname: &str, query: &str) -> String {
    let query = query.trim_start_matches('?');
    if query.is_empty() { pathname.to_owned() } else { format!("{pathname}?{query}") }
}

pub fn query_param(query: &str, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// `/login?redirect=<encoded location>`.
pub fn login_redirect_path(requested: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(requested.as_bytes()).collect();
    format!("{LOGIN_PATH}?redirect={encoded}")
}

/// Where to land after a successful login. Only local paths are honoured,
/// and never the login page itself.
pub fn login_target(redirect: Option<&str>) -> String {
    match redirect.map(str::trim) {
        Some(target)
            if target.starts_with('/') && !target.starts_with("//") && !is_login_location(target) =>
        {
            target.to_owned()
        }
        _ => HOME_PATH.to_owned(),
    }
}

fn is_login_location(location: &str) -> bool {
    location == LOGIN_PATH || location.starts_with("/login?") || location.starts_with("/login/")
}

/// Navigator backed by the `leptos_router` context. Must be created inside
/// `<Router>`.
#[derive(Clone)]
pub struct RouterNavigator<F> {
    navigate: F,
    pathname: Memo<String>,
    search: Memo<String>,
}

impl RouterNavigator<()> {
    pub fn from_router() -> RouterNavigator<impl Fn(&str, NavigateOptions) + Clone + Send + Sync + 'static> {
        let location = use_location();
        RouterNavigator { navigate: use_navigate(), pathname: location.pathname, search: location.search }
    }
}

impl<F> Navigator for RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions),
{
    fn pathname(&self) -> String {
        self.pathname.get_untracked()
    }

    fn query(&self) -> String {
        self.search.get_untracked().trim_start_matches('?').to_owned()
    }

    fn navigate(&self, to: &str) {
        log::debug!("nav: push {to}");
        (self.navigate)(to, NavigateOptions::default());
    }

    fn replace(&self, to: &str) {
        log::debug!("nav: replace {to}");
        (self.navigate)(to, NavigateOptions { replace: true, ..NavigateOptions::default() });
    }
}
