//! Notification inbox. Read state is kept locally; the backend has no
//! endpoint to persist it.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use leptos::prelude::*;

use crate::net::types::{Notification, NotificationId, NotificationKind};
use crate::pages::shared::{display_timestamp, load_into, remote_view};
use crate::state::remote::Remote;
use crate::state::session::AppSession;

pub fn kind_icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Task => "📝",
        NotificationKind::TestResult => "📊",
        NotificationKind::News => "📰",
        NotificationKind::General => "🔔",
    }
}

/// Returns whether anything changed.
pub fn mark_read(items: &mut [Notification], id: &NotificationId) -> bool {
    match items.iter_mut().find(|n| &n.id == id && !n.read) {
        Some(item) => {
            item.read = true;
            true
        }
        None => false,
    }
}

pub fn unread_count(items: &[Notification]) -> usize {
    items.iter().filter(|n| !n.read).count()
}

#[component]
pub fn NotificationsPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let items = RwSignal::new(Remote::<Vec<Notification>>::Loading);

    load_into(&session, items, |s| async move { s.api().notifications().await });

    let unread = move || items.with(|r| r.ready().map_or(0, |list| unread_count(list)));

    view! {
        <div class="feature-page feature-page--narrow">
            <header class="feature-page__header">
                <h1>"Your Notifications"</h1>
                <Show when=move || { unread() > 0 }>
                    <span class="badge">{move || format!("{} unread", unread())}</span>
                </Show>
            </header>
            {remote_view(items, move |list: &Vec<Notification>| {
                if list.is_empty() {
                    return view! { <p class="status">"You have no new notifications."</p> }.into_any();
                }
                list.iter()
                    .map(|n| {
                        let id = n.id.clone();
                        let class = if n.read { "inbox inbox--read" } else { "inbox" };
                        let on_read = move |_| {
                            items.update(|r| {
                                if let Remote::Ready(list) = r {
                                    mark_read(list, &id);
                                }
                            });
                        };
                        view! {
                            <article class=class>
                                <span class="inbox__icon">{kind_icon(n.kind)}</span>
                                <div class="inbox__body">
                                    <p>{n.message.clone()}</p>
                                    {n.created_at.as_deref().map(|at| view! {
                                        <p class="inbox__time">{display_timestamp(at)}</p>
                                    })}
                                    <div class="inbox__actions">
                                        {n.link.clone().map(|href| view! { <a href=href>"View Details"</a> })}
                                        {(!n.read).then(|| view! {
                                            <button class="btn btn--link" on:click=on_read>"Mark as read"</button>
                                        })}
                                    </div>
                                </div>
                            </article>
                        }
                    })
                    .collect_view()
                    .into_any()
            })}
        </div>
    }
}
