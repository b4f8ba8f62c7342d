//! Login page: username + password against the backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public route. Accepts `?redirect=` (set by the access guard) and
//! `?registered=true` (set after sign-up). Signed-in visitors are sent on
//! to their target straight away.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::net::types::Credentials;
use crate::state::session::AppSession;
use crate::util::nav::{Navigator, RouterNavigator, login_target, navigate_if_elsewhere};
use crate::util::task::spawn_ui;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let state = session.state();
    let nav = RouterNavigator::from_router();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let registered = nav.query_param("registered").is_some_and(|v| v == "true");

    // Already signed in (e.g. back button after login): move on.
    let nav_effect = nav.clone();
    Effect::new(move || {
        if busy.get() || !state.with(|s| s.is_authenticated()) {
            return;
        }
        let target = login_target(nav_effect.query_param("redirect").as_deref());
        navigate_if_elsewhere(&nav_effect, &target);
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let credentials = match validate_login_input(&username.get(), &password.get()) {
            Ok(credentials) => credentials,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        let session = session.clone();
        let nav = nav.clone();
        spawn_ui(async move {
            match session.login(&credentials, &nav).await {
                Ok(_) => info.set(String::new()),
                Err(e) => info.set(format!("Login failed: {}", e.user_message())),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign in"</h1>
                <Show when=move || registered>
                    <p class="auth-message auth-message--success">
                        "Registration successful. Please log in."
                    </p>
                </Show>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="text"
                        placeholder="Username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <p class="auth-card__footer">"No account? " <a href="/register">"Register"</a></p>
            </div>
        </div>
    }
}

/// Trim the username and require both fields. The password is sent as
/// typed.
pub fn validate_login_input(username: &str, password: &str) -> Result<Credentials, &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter both username and password.");
    }
    Ok(Credentials { username: username.to_owned(), password: password.to_owned() })
}
