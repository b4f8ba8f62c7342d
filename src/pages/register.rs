//! Registration page.
//!
//! Registration never signs in; on success the session holder sends the
//! visitor to `/login?registered=true`.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;

use crate::net::types::{ROLE_STUDENT, ROLE_TEACHER, RegistrationPayload};
use crate::state::session::AppSession;
use crate::util::nav::{HOME_PATH, RouterNavigator, navigate_if_elsewhere};
use crate::util::task::spawn_ui;

/// Roles open to self-registration. Admin accounts are provisioned
/// server-side.
pub const REGISTRATION_ROLES: [(&str, &str); 2] = [(ROLE_STUDENT, "Student"), (ROLE_TEACHER, "Teacher")];

pub const MIN_PASSWORD_LEN: usize = 8;

/// Raw form values as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: String,
}

impl RegisterForm {
    /// Check fields in form order and build the payload. The confirmation is
    /// only compared, never sent.
    pub fn validate(&self) -> Result<RegistrationPayload, &'static str> {
        let username = self.username.trim();
        if username.is_empty() {
            return Err("Username is required");
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err("Email is required");
        }
        if !looks_like_email(email) {
            return Err("Invalid email address");
        }
        if self.password.is_empty() {
            return Err("Password is required");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err("Password must be at least 8 characters");
        }
        if self.confirm_password.is_empty() {
            return Err("Please confirm your password");
        }
        if self.confirm_password != self.password {
            return Err("Passwords do not match");
        }
        let role = self.role.trim();
        if role.is_empty() {
            return Err("Role is required");
        }
        Ok(RegistrationPayload {
            username: username.to_owned(),
            email: email.to_owned(),
            password: self.password.clone(),
            role: role.to_owned(),
        })
    }
}

/// `\S+@\S+`: no whitespace, and an `@` with something on both sides.
pub fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let last = email.len().saturating_sub(1);
    email.char_indices().any(|(i, c)| c == '@' && i > 0 && i < last)
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let state = session.state();
    let nav = RouterNavigator::from_router();

    let form = RwSignal::new(RegisterForm { role: ROLE_STUDENT.to_owned(), ..RegisterForm::default() });
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let nav_effect = nav.clone();
    Effect::new(move || {
        if !busy.get() && state.with(|s| s.is_authenticated()) {
            navigate_if_elsewhere(&nav_effect, HOME_PATH);
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let payload = match form.with(RegisterForm::validate) {
            Ok(payload) => payload,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        error.set(None);
        busy.set(true);

        let session = session.clone();
        let nav = nav.clone();
        spawn_ui(async move {
            if let Err(e) = session.register(&payload, &nav).await {
                error.set(Some(e.user_message()));
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create your account"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-label">
                        "Username"
                        <input
                            class="auth-input"
                            type="text"
                            prop:value=move || form.with(|f| f.username.clone())
                            on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                        />
                    </label>
                    <label class="auth-label">
                        "Email address"
                        <input
                            class="auth-input"
                            type="email"
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                        />
                    </label>
                    <label class="auth-label">
                        "Password"
                        <input
                            class="auth-input"
                            type="password"
                            prop:value=move || form.with(|f| f.password.clone())
                            on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                        />
                    </label>
                    <label class="auth-label">
                        "Confirm Password"
                        <input
                            class="auth-input"
                            type="password"
                            prop:value=move || form.with(|f| f.confirm_password.clone())
                            on:input=move |ev| form.update(|f| f.confirm_password = event_target_value(&ev))
                        />
                    </label>
                    <label class="auth-label">
                        "Role"
                        <select
                            class="auth-input"
                            prop:value=move || form.with(|f| f.role.clone())
                            on:change=move |ev| form.update(|f| f.role = event_target_value(&ev))
                        >
                            {REGISTRATION_ROLES
                                .into_iter()
                                .map(|(value, label)| view! { <option value=value>{label}</option> })
                                .collect_view()}
                        </select>
                    </label>
                    <Show when=move || error.get().is_some()>
                        <p class="auth-message auth-message--error">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Registering..." } else { "Register" }}
                    </button>
                </form>
                <p class="auth-card__footer">"Already have an account? " <a href="/login">"Sign in"</a></p>
            </div>
        </div>
    }
}
