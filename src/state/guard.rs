//! Route access decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! `components::access_guard` wraps pages with this logic. The guard is a UX
//! convenience; the backend authorizes every request on its own.
//!
//! DESIGN
//! ======
//! Per mount the guard moves `Loading -> Authorized`, or
//! `Loading -> Unauthenticated | Unauthorized -> redirecting`. `evaluate` is
//! a pure function of the session snapshot; `Redirector` owns the only side
//! effect and refuses to issue the same navigation twice, so reactive
//! re-runs cannot loop.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::net::types::{ROLE_ADMIN, ROLE_STUDENT, ROLE_TEACHER};
use crate::state::session::SessionState;
use crate::util::nav::{Navigator, UNAUTHORIZED_PATH, login_redirect_path};

/// Any signed-in user.
pub const ANY_ROLE: &[&str] = &[];
/// Content authors.
pub const STAFF: &[&str] = &[ROLE_ADMIN, ROLE_TEACHER];
pub const STUDENTS: &[&str] = &[ROLE_STUDENT];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session restore has not settled; nothing is known yet.
    Loading,
    Authorized,
    Unauthenticated { redirect_to: String },
    Unauthorized,
}

impl GuardOutcome {
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Unauthenticated { redirect_to } => Some(redirect_to),
            Self::Unauthorized => Some(UNAUTHORIZED_PATH),
            Self::Loading | Self::Authorized => None,
        }
    }

    pub fn renders_page(&self) -> bool {
        matches!(self, Self::Authorized)
    }

    /// Text shown instead of the page.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Loading => "Loading authentication status...",
            Self::Unauthenticated { .. } => "Redirecting to login...",
            Self::Unauthorized => "Access denied. Redirecting...",
            Self::Authorized => "",
        }
    }
}

/// Decide what a guarded route at `requested` (path plus query) shows.
/// An empty `roles` list admits any signed-in user.
pub fn evaluate(state: &SessionState, roles: &[&str], requested: &str) -> GuardOutcome {
    if state.is_loading() {
        return GuardOutcome::Loading;
    }
    let Some(user) = state.user().filter(|_| state.is_authenticated()) else {
        return GuardOutcome::Unauthenticated { redirect_to: login_redirect_path(requested) };
    };
    if roles.is_empty() || roles.iter().any(|role| user.has_role(role)) {
        GuardOutcome::Authorized
    } else {
        log::info!("guard: role {} not in {roles:?}", user.role.name);
        GuardOutcome::Unauthorized
    }
}

/// Issues guard redirects at most once per target.
#[derive(Clone, Debug, Default)]
pub struct Redirector {
    issued: Option<String>,
}

impl Redirector {
    /// Navigate (replacing history) if `outcome` calls for it, unless this
    /// redirect was already issued or the browser is already there. Returns
    /// whether a navigation was issued.
    pub fn enforce(&mut self, outcome: &GuardOutcome, nav: &impl Navigator) -> bool {
        let Some(target) = outcome.redirect_target() else {
            self.issued = None;
            return false;
        };
        if self.issued.as_deref() == Some(target) || nav.location() == target {
            return false;
        }
        log::debug!("guard: redirect to {target}");
        nav.replace(target);
        self.issued = Some(target.to_owned());
        true
    }
}
