//! Route wrapper that gates a page on the session and an optional role list.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected route in `app.rs` goes through `guarded`, which wraps the
//! page in `AccessGuard`. The decision logic lives in `state::guard`; this
//! module only wires it to the router and the session signal.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::state::guard::{GuardOutcome, Redirector, evaluate};
use crate::state::session::AppSession;
use crate::util::nav::{RouterNavigator, join_location};

/// Renders `children` once the session allows it; otherwise a placeholder
/// while loading or redirecting. Omitting `roles` admits any signed-in user.
#[component]
pub fn AccessGuard(#[prop(optional)] roles: &'static [&'static str], children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<AppSession>();
    let state = session.state();
    let location = use_location();
    let nav = RouterNavigator::from_router();

    let outcome = Memo::new(move |_| {
        let requested = join_location(&location.pathname.get(), &location.search.get());
        state.with(|s| evaluate(s, roles, &requested))
    });

    let redirector = StoredValue::new(Redirector::default());
    Effect::new(move || {
        let outcome = outcome.get();
        redirector.update_value(|r| {
            r.enforce(&outcome, &nav);
        });
    });

    view! {
        <Show
            when=move || outcome.with(GuardOutcome::renders_page)
            fallback=move || {
                view! {
                    <div class="guard-placeholder">
                        <p>{move || outcome.with(GuardOutcome::placeholder)}</p>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}

/// Route view for `page` behind `AccessGuard`, for use as `view=` in a
/// `<Route>`.
pub fn guarded<F, V>(page: F, roles: &'static [&'static str]) -> impl Fn() -> AnyView + Clone + Send + Sync + 'static
where
    F: Fn() -> V + Clone + Send + Sync + 'static,
    V: IntoView + 'static,
{
    move || {
        let page = page.clone();
        view! { <AccessGuard roles=roles>{page()}</AccessGuard> }.into_any()
    }
}
