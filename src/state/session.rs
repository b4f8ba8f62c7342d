//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `Session` is provided through Leptos context by `App`. Route guards read
//! its `state()` signal; login, register and logout pages call its async
//! operations; feature pages hand failed requests to `absorb` so an expired
//! token signs the user out.
//!
//! DESIGN
//! ======
//! `SessionState` fields are private: the user and token can only be set
//! together (`signed_in`) or cleared together (`anonymous`), which keeps
//! `is_authenticated` a pure function of the pair. Only the token is
//! persisted; the user is rebuilt from it by `restore` at start-up.
//!
//! ERROR HANDLING
//! ==============
//! Login and registration failures leave the session untouched and are
//! returned to the page. A rejected token during restore or revalidation
//! clears both the stored token and the session.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::transport::{BrowserTransport, Transport};
use crate::net::types::{Credentials, RegistrationPayload, User};
use crate::util::nav::{LOGIN_PATH, Navigator, login_target, navigate_if_elsewhere};
use crate::util::storage::{LocalTokenStore, TokenStore};

/// Where registration lands so the login page can show its banner.
pub const REGISTERED_PATH: &str = "/login?registered=true";

/// Snapshot of who is signed in. Starts out loading until `restore` runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    user: Option<User>,
    token: Option<String>,
    loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self { user: None, token: None, loading: true }
    }
}

impl SessionState {
    /// Settled with nobody signed in.
    pub fn anonymous() -> Self {
        Self { user: None, token: None, loading: false }
    }

    pub fn signed_in(user: User, token: String) -> Self {
        Self { user: Some(user), token: Some(token), loading: false }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        !self.loading && self.token.is_some() && self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// The session holder: reactive state plus the API client that feeds it.
#[derive(Clone)]
pub struct Session<T = BrowserTransport, S = LocalTokenStore> {
    state: RwSignal<SessionState>,
    api: ApiClient<T, S>,
    restore_started: Arc<AtomicBool>,
}

/// The session type provided to the component tree.
pub type AppSession = Session;

impl Session {
    pub fn browser(config: &ClientConfig) -> Self {
        Self::new(ApiClient::browser(config))
    }
}

impl<T: Transport, S: TokenStore> Session<T, S> {
    pub fn new(api: ApiClient<T, S>) -> Self {
        Self { state: RwSignal::new(SessionState::default()), api, restore_started: Arc::new(AtomicBool::new(false)) }
    }

    /// Reactive handle for guards and user-aware components.
    pub fn state(&self) -> RwSignal<SessionState> {
        self.state
    }

    pub fn api(&self) -> &ApiClient<T, S> {
        &self.api
    }

    /// Current state without subscribing.
    pub fn snapshot(&self) -> SessionState {
        self.state.get_untracked()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with_untracked(SessionState::is_authenticated)
    }

    /// Tracked read of the signed-in user, for views.
    pub fn current_user(&self) -> Option<User> {
        self.state.with(|s| s.user().cloned())
    }

    /// Rebuild the session from the stored token. Only the first call does
    /// anything.
    pub async fn restore(&self) {
        if self.restore_started.swap(true, Ordering::SeqCst) {
            log::debug!("session: restore already ran");
            return;
        }
        let Some(token) = self.api.tokens().load() else {
            log::info!("session: no stored token");
            self.state.set(SessionState::anonymous());
            return;
        };

        let result = self.api.whoami().await;
        if !self.state.with_untracked(SessionState::is_loading) {
            // A login finished while whoami was in flight; it wins.
            log::debug!("session: restore superseded");
            return;
        }
        match result {
            Ok(user) => {
                log::info!("session: restored {} ({})", user.username, user.role.name);
                self.state.set(SessionState::signed_in(user, token));
            }
            Err(e) => {
                log::warn!("session: stored token rejected: {e}");
                self.clear();
            }
        }
    }

    /// Revalidate the stored token against the backend. Only authentication
    /// failures sign the user out; other errors leave the session as is.
    pub async fn fetch_current_user(&self) -> Result<Option<User>, ApiError> {
        let Some(token) = self.api.tokens().load() else {
            self.clear();
            return Ok(None);
        };
        match self.api.whoami().await {
            Ok(user) => {
                self.state.set(SessionState::signed_in(user.clone(), token));
                Ok(Some(user))
            }
            Err(e) => {
                if e.is_auth_failure() {
                    log::warn!("session: token no longer valid: {e}");
                    self.clear();
                }
                Err(e)
            }
        }
    }

    /// Sign in, persist the token, then go to the `redirect` query target
    /// (or home).
    pub async fn login(&self, credentials: &Credentials, nav: &impl Navigator) -> Result<User, ApiError> {
        let auth = self.api.login(credentials).await?;
        self.api.tokens().save(&auth.access_token);
        log::info!("session: signed in as {}", auth.user.username);
        self.state.set(SessionState::signed_in(auth.user.clone(), auth.access_token));

        let target = login_target(nav.query_param("redirect").as_deref());
        navigate_if_elsewhere(nav, &target);
        Ok(auth.user)
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, payload: &RegistrationPayload, nav: &impl Navigator) -> Result<User, ApiError> {
        let user = self.api.register(payload).await?;
        log::info!("session: registered {}", user.username);
        navigate_if_elsewhere(nav, REGISTERED_PATH);
        Ok(user)
    }

    pub fn logout(&self, nav: &impl Navigator) {
        log::info!("session: signed out");
        self.clear();
        if nav.pathname() != LOGIN_PATH {
            nav.navigate(LOGIN_PATH);
        }
    }

    /// Drop a session the backend no longer accepts. The guard takes care
    /// of the redirect.
    pub fn expire(&self) {
        if self.api.tokens().load().is_none() && !self.is_authenticated() {
            return;
        }
        log::warn!("session: expired");
        self.clear();
    }

    /// Turn a failed request into inline text, expiring the session first
    /// when the token was rejected.
    pub fn absorb(&self, error: &ApiError) -> String {
        if error.is_auth_failure() {
            self.expire();
        }
        error.user_message()
    }

    fn clear(&self) {
        self.api.tokens().clear();
        self.state.set(SessionState::anonymous());
    }
}
