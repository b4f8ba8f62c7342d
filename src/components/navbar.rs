//! Top navigation bar.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads the session from context so links and the sign-in/out controls
//! follow authentication without a reload.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use leptos::prelude::*;

use crate::state::session::{AppSession, SessionState};
use crate::util::nav::RouterNavigator;

/// Which sign-in controls a view may show. Restore in progress is neither
/// signed in nor signed out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthControls {
    Pending,
    SignedIn,
    SignedOut,
}

impl AuthControls {
    pub fn of(state: &SessionState) -> Self {
        if state.is_loading() {
            Self::Pending
        } else if state.is_authenticated() {
            Self::SignedIn
        } else {
            Self::SignedOut
        }
    }

    /// Profile, logout and member-only links.
    pub fn shows_member_links(self) -> bool {
        self == Self::SignedIn
    }

    /// Login and register links.
    pub fn shows_sign_in_links(self) -> bool {
        self == Self::SignedOut
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let state = session.state();
    let nav = RouterNavigator::from_router();

    let controls = move || state.with(AuthControls::of);
    let signed_in = move || controls().shows_member_links();
    let username = move || state.with(|s| s.user().map(|u| u.username.clone()).unwrap_or_default());
    let role = move || state.with(|s| s.user().map(|u| u.role.name.clone()).unwrap_or_default());

    let on_logout = move |_| session.logout(&nav);

    view! {
        <nav class="navbar">
            <a class="navbar__brand" href="/">"Campus"</a>
            <a href="/books">"Library"</a>
            <a href="/news">"News"</a>
            <Show when=signed_in>
                <a href="/tasks">"Tasks"</a>
                <a href="/tests">"Tests"</a>
                <a href="/chatbot">"Assistant"</a>
                <a href="/notifications">"Notifications"</a>
            </Show>
            <span class="navbar__spacer"></span>
            <Show when=move || controls() == AuthControls::Pending>
                <span class="navbar__pending">"Loading..."</span>
            </Show>
            <Show when=move || controls().shows_sign_in_links()>
                <a href="/login">"Login"</a>
                <a href="/register">"Register"</a>
            </Show>
            <Show when=signed_in>
                <a class="navbar__self" href="/profile">
                    {username}
                    " ("
                    <span class="navbar__role">{role}</span>
                    ")"
                </a>
                <button class="btn navbar__logout" on:click=on_logout.clone()>
                    "Logout"
                </button>
            </Show>
        </nav>
    }
}
