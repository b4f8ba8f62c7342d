//! News feed: public list and article, staff-only editor.

#[cfg(test)]
#[path = "news_test.rs"]
mod news_test;

use leptos::prelude::*;

use crate::net::types::{NewsItem, NewsPayload};
use crate::pages::shared::{
    confirm_delete, display_timestamp, ensure_can_manage, load_into, remote_view, required_text, use_route_id,
};
use crate::state::remote::Remote;
use crate::state::session::AppSession;
use crate::util::nav::{Navigator, RouterNavigator};
use crate::util::task::spawn_ui;

/// Characters of article body shown on the list page.
pub const EXCERPT_CHARS: usize = 200;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewsForm {
    pub title: String,
    pub content: String,
}

impl NewsForm {
    pub fn from_item(item: &NewsItem) -> Self {
        Self { title: item.title.clone(), content: item.content.clone() }
    }

    pub fn payload(&self) -> Result<NewsPayload, &'static str> {
        Ok(NewsPayload {
            title: required_text(&self.title, "Title is required")?,
            content: required_text(&self.content, "Content is required")?,
        })
    }
}

/// First `max` characters of `content`, with an ellipsis when cut.
pub fn excerpt(content: &str, max: usize) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() { format!("{}...", head.trim_end()) } else { head }
}

#[component]
pub fn NewsListPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let state = session.state();
    let news = RwSignal::new(Remote::<Vec<NewsItem>>::Loading);
    let action_error = RwSignal::new(None::<String>);

    load_into(&session, news, |s| async move { s.api().list::<NewsItem>().await });

    let is_staff = move || state.with(|s| s.user().is_some_and(|u| u.is_staff()));

    view! {
        <div class="feature-page">
            <header class="feature-page__header">
                <h1>"News"</h1>
                <Show when=is_staff>
                    <a class="btn btn--primary" href="/news/create">"+ Post News"</a>
                </Show>
            </header>
            <Show when=move || action_error.get().is_some()>
                <p class="error">{move || action_error.get().unwrap_or_default()}</p>
            </Show>
            {remote_view(news, move |items: &Vec<NewsItem>| {
                if items.is_empty() {
                    return view! { <p class="status">"No news yet."</p> }.into_any();
                }
                items
                    .iter()
                    .map(|item| {
                        let id = item.id;
                        let owner = item.author.clone();
                        let can_manage = move || state.with(|s| s.user().is_some_and(|u| u.can_manage(owner.as_ref())));
                        let session = session.clone();
                        let on_delete = move |_| {
                            confirm_delete::<NewsItem, _>(&session, id, "news item", action_error, move || {
                                news.update(|n| n.remove_where(|item| item.id == id));
                            });
                        };
                        let byline = match &item.author {
                            Some(author) => format!("{} · {}", author.username, display_timestamp(&item.created_at)),
                            None => display_timestamp(&item.created_at),
                        };
                        view! {
                            <article class="card">
                                <h2 class="card__title"><a href=format!("/news/{id}")>{item.title.clone()}</a></h2>
                                <p class="card__meta">{byline}</p>
                                <p class="card__body">{excerpt(&item.content, EXCERPT_CHARS)}</p>
                                <Show when=can_manage.clone()>
                                    <div class="card__actions">
                                        <a href=format!("/news/edit/{id}")>"Edit"</a>
                                        <button class="btn btn--danger" on:click=on_delete.clone()>"Delete"</button>
                                    </div>
                                </Show>
                            </article>
                        }
                    })
                    .collect_view()
                    .into_any()
            })}
        </div>
    }
}

#[component]
pub fn NewsDetailPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let state = session.state();
    let nav = RouterNavigator::from_router();
    let route_id = use_route_id();
    let item = RwSignal::new(Remote::<NewsItem>::Loading);
    let action_error = RwSignal::new(None::<String>);

    let session_load = session.clone();
    Effect::new(move || match route_id.get() {
        Some(id) => load_into(&session_load, item, move |s| async move { s.api().fetch::<NewsItem>(id).await }),
        None => item.set(Remote::Failed("News item not found.".to_owned())),
    });

    view! {
        <div class="feature-page">
            <Show when=move || action_error.get().is_some()>
                <p class="error">{move || action_error.get().unwrap_or_default()}</p>
            </Show>
            {remote_view(item, move |item: &NewsItem| {
                let id = item.id;
                let owner = item.author.clone();
                let can_manage = move || state.with(|s| s.user().is_some_and(|u| u.can_manage(owner.as_ref())));
                let session = session.clone();
                let nav = nav.clone();
                let on_delete = move |_| {
                    let nav = nav.clone();
                    confirm_delete::<NewsItem, _>(&session, id, "news item", action_error, move || nav.navigate("/news"));
                };
                let author = item.author.as_ref().map_or_else(|| "unknown".to_owned(), |a| a.username.clone());
                view! {
                    <article class="detail">
                        <h1>{item.title.clone()}</h1>
                        <p class="detail__meta">
                            {format!("Posted by {author} on {}", display_timestamp(&item.created_at))}
                        </p>
                        <div class="detail__body">{item.content.clone()}</div>
                        <div class="detail__actions">
                            <a href="/news">"← Back to News"</a>
                            <Show when=can_manage.clone()>
                                <a href=format!("/news/edit/{id}")>"Edit"</a>
                                <button class="btn btn--danger" on:click=on_delete.clone()>"Delete"</button>
                            </Show>
                        </div>
                    </article>
                }
            })}
        </div>
    }
}

/// Create (`/news/create`) or edit (`/news/edit/:id`).
#[component]
pub fn NewsEditorPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let nav = RouterNavigator::from_router();
    let route_id = use_route_id();
    let editing = RwSignal::new(Remote::<Option<NewsItem>>::Loading);
    let form = RwSignal::new(NewsForm::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let session_load = session.clone();
    Effect::new(move || match route_id.get() {
        Some(id) => load_into(&session_load, editing, move |s| async move {
            let item = s.api().fetch::<NewsItem>(id).await?;
            ensure_can_manage(&s, item.author.as_ref(), "news item")?;
            Ok(Some(item))
        }),
        None => editing.set(Remote::Ready(None)),
    });
    Effect::new(move || {
        if let Some(Some(item)) = editing.with(|e| e.ready().cloned()) {
            form.set(NewsForm::from_item(&item));
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let payload = match form.with(NewsForm::payload) {
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
        let id = route_id.get_untracked();
        spawn_ui(async move {
            let saved = match id {
                Some(id) => session.api().update::<NewsItem>(id, &payload).await,
                None => session.api().create::<NewsItem>(&payload).await,
            };
            match saved {
                Ok(item) => nav.navigate(&format!("/news/{}", item.id)),
                Err(e) => error.set(Some(session.absorb(&e))),
            }
            busy.set(false);
        });
    };

    let heading = move || if route_id.get().is_some() { "Edit News" } else { "Post News" };

    view! {
        <div class="feature-page">
            <h1>{heading}</h1>
            {remote_view(editing, move |_: &Option<NewsItem>| {
                let on_submit = on_submit.clone();
                view! {
                    <form class="editor" on:submit=on_submit>
                        <label>
                            "Title"
                            <input
                                type="text"
                                prop:value=move || form.with(|f| f.title.clone())
                                on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
                            />
                        </label>
                        <label>
                            "Content"
                            <textarea
                                rows="8"
                                prop:value=move || form.with(|f| f.content.clone())
                                on:input=move |ev| form.update(|f| f.content = event_target_value(&ev))
                            ></textarea>
                        </label>
                        <Show when=move || error.get().is_some()>
                            <p class="error">{move || error.get().unwrap_or_default()}</p>
                        </Show>
                        <div class="editor__actions">
                            <a href="/news">"Cancel"</a>
                            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                                {move || if busy.get() { "Publishing..." } else { "Publish" }}
                            </button>
                        </div>
                    </form>
                }
            })}
        </div>
    }
}
