use leptos::prelude::*;

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    view! {
        <div class="feature-page feature-page--narrow">
            <h1>"Access Denied"</h1>
            <p>"You don't have permission to view this page."</p>
            <a href="/">"Go to Home"</a>
        </div>
    }
}
