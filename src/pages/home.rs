//! Public landing page.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::components::navbar::AuthControls;
use crate::state::session::{AppSession, SessionState};

pub fn greeting(state: &SessionState) -> String {
    match state.user() {
        Some(user) if state.is_authenticated() => format!("Welcome back, {}!", user.username),
        _ => "Welcome to Campus".to_owned(),
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let state = expect_context::<AppSession>().state();
    let controls = move || state.with(AuthControls::of);

    view! {
        <div class="home">
            <h1>{move || state.with(greeting)}</h1>
            <p>"Library, assignments, news and tests for students and teachers in one place."</p>
            <div class="home__links">
                <a class="btn" href="/books">"Browse the Library"</a>
                <a class="btn" href="/news">"Read the News"</a>
                <Show when=move || controls().shows_sign_in_links()>
                    <a class="btn btn--primary" href="/login">"Login"</a>
                </Show>
                <Show when=move || controls().shows_member_links()>
                    <a class="btn btn--primary" href="/tasks">"My Tasks"</a>
                </Show>
            </div>
        </div>
    }
}
