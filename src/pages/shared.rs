//! Helpers shared by the feature pages: route ids, fetch-into-signal, and
//! form text normalization.

#[cfg(test)]
#[path = "shared_test.rs"]
mod shared_test;

use std::future::Future;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::net::error::ApiError;
use crate::net::resources::Resource;
use crate::net::types::{User, UserSummary};
use crate::state::remote::Remote;
use crate::state::session::AppSession;
use crate::util::dialog::confirm;
use crate::util::task::spawn_ui;

/// The numeric `:id` segment of the current route, if any.
pub fn use_route_id() -> Memo<Option<i64>> {
    let params = use_params_map();
    Memo::new(move |_| params.read().get("id").and_then(|raw| parse_id(&raw)))
}

pub fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok().filter(|id| *id > 0)
}

/// Run `fetch` against the session's client and publish the outcome.
/// Authentication failures expire the session on the way.
pub fn load_into<T, F, Fut>(session: &AppSession, target: RwSignal<Remote<T>>, fetch: F)
where
    T: Send + Sync + 'static,
    F: FnOnce(AppSession) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    target.set(Remote::Loading);
    let session = session.clone();
    spawn_ui(async move {
        let result = fetch(session.clone()).await.map_err(|e| session.absorb(&e));
        target.set(Remote::from_result(result));
    });
}

/// Render a `Remote` with shared loading and error text.
pub fn remote_view<T, V>(state: RwSignal<Remote<T>>, render: impl Fn(&T) -> V + Send + Sync + 'static) -> impl IntoView
where
    T: Send + Sync + 'static,
    V: IntoView + 'static,
{
    move || {
        state.with(|remote| match remote {
            Remote::Loading => view! { <p class="status">"Loading..."</p> }.into_any(),
            Remote::Failed(message) => view! { <p class="error">{message.clone()}</p> }.into_any(),
            Remote::Ready(value) => render(value).into_any(),
        })
    }
}

/// Confirm, delete `R` number `id`, then run `on_deleted`. Failures land in
/// `error`.
pub fn confirm_delete<R, F>(session: &AppSession, id: i64, noun: &'static str, error: RwSignal<Option<String>>, on_deleted: F)
where
    R: Resource + 'static,
    F: FnOnce() + 'static,
{
    if !confirm(&format!("Are you sure you want to delete this {noun}?")) {
        return;
    }
    let session = session.clone();
    spawn_ui(async move {
        match session.api().remove::<R>(id).await {
            Ok(ack) => {
                log::info!("deleted {noun} {id}: {}", ack.msg);
                error.set(None);
                on_deleted();
            }
            Err(e) => error.set(Some(session.absorb(&e))),
        }
    });
}

/// Edit rights for an item owned by `owner`: admins, or staff who created it.
pub fn check_can_manage(user: Option<&User>, owner: Option<&UserSummary>, noun: &str) -> Result<(), ApiError> {
    if user.is_some_and(|u| u.can_manage(owner)) {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!("You don't have permission to edit this {noun}.")))
    }
}

/// `check_can_manage` against the signed-in user.
pub fn ensure_can_manage(session: &AppSession, owner: Option<&UserSummary>, noun: &str) -> Result<(), ApiError> {
    session.state().with_untracked(|s| check_can_manage(s.user(), owner, noun))
}

/// Trimmed form text, `None` when blank.
pub fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Required form text, trimmed.
pub fn required_text(raw: &str, message: &'static str) -> Result<String, &'static str> {
    optional_text(raw).ok_or(message)
}

/// ISO timestamp as `YYYY-MM-DD HH:MM` for display.
pub fn display_timestamp(iso: &str) -> String {
    let (date, time) = iso.split_once('T').unwrap_or((iso, ""));
    let minutes: String = time.chars().take(5).collect();
    if minutes.is_empty() { date.to_owned() } else { format!("{date} {minutes}") }
}
