//! Signed-in user's details and quiz history.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;

use crate::net::types::{QuizResult, User};
use crate::pages::quizzes::results_table;
use crate::pages::shared::{load_into, remote_view};
use crate::state::remote::Remote;
use crate::state::session::AppSession;

/// Role names are stored lowercase; show them capitalized.
pub fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let state = session.state();
    let results = RwSignal::new(Remote::<Vec<QuizResult>>::Loading);

    load_into(&session, results, |s| async move { s.api().my_results().await });

    let field = move |pick: fn(&User) -> String| {
        move || state.with(|s| s.user().map(pick).unwrap_or_default())
    };

    view! {
        <div class="feature-page feature-page--narrow">
            <h1>"Your Profile"</h1>
            <dl class="profile">
                <dt>"Username"</dt>
                <dd>{field(|u| u.username.clone())}</dd>
                <dt>"Email"</dt>
                <dd>{field(|u| u.email.clone().unwrap_or_default())}</dd>
                <dt>"Role"</dt>
                <dd>{field(|u| capitalize(&u.role.name))}</dd>
            </dl>
            <section class="results">
                <h2>"My Test Results"</h2>
                {remote_view(results, |rows: &Vec<QuizResult>| results_table(rows))}
            </section>
        </div>
    }
}
