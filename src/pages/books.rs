//! Library pages: public list and detail, staff-only editor.

#[cfg(test)]
#[path = "books_test.rs"]
mod books_test;

use leptos::prelude::*;

use crate::net::types::{Book, BookPayload};
use crate::pages::shared::{
    confirm_delete, ensure_can_manage, load_into, optional_text, remote_view, required_text, use_route_id,
};
use crate::state::remote::Remote;
use crate::state::session::AppSession;
use crate::util::nav::{Navigator, RouterNavigator};
use crate::util::task::spawn_ui;

/// Editor form values as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub file_url: String,
}

impl BookForm {
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone().unwrap_or_default(),
            file_url: book.file_url.clone().unwrap_or_default(),
        }
    }

    pub fn payload(&self) -> Result<BookPayload, &'static str> {
        Ok(BookPayload {
            title: required_text(&self.title, "Title is required")?,
            author: optional_text(&self.author),
            file_url: optional_text(&self.file_url),
        })
    }
}

#[component]
pub fn BookListPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let state = session.state();
    let books = RwSignal::new(Remote::<Vec<Book>>::Loading);
    let action_error = RwSignal::new(None::<String>);

    load_into(&session, books, |s| async move { s.api().list::<Book>().await });

    let is_staff = move || state.with(|s| s.user().is_some_and(|u| u.is_staff()));

    view! {
        <div class="feature-page">
            <header class="feature-page__header">
                <h1>"Library"</h1>
                <Show when=is_staff>
                    <a class="btn btn--primary" href="/books/create">"+ Add New Book"</a>
                </Show>
            </header>
            <Show when=move || action_error.get().is_some()>
                <p class="error">{move || action_error.get().unwrap_or_default()}</p>
            </Show>
            {remote_view(books, move |items: &Vec<Book>| {
                if items.is_empty() {
                    return view! { <p class="status">"No books in the library yet."</p> }.into_any();
                }
                items
                    .iter()
                    .map(|book| {
                        let id = book.id;
                        let owner = book.created_by.clone();
                        let can_manage = move || state.with(|s| s.user().is_some_and(|u| u.can_manage(owner.as_ref())));
                        let session = session.clone();
                        let on_delete = move |_| {
                            confirm_delete::<Book, _>(&session, id, "book", action_error, move || {
                                books.update(|b| b.remove_where(|item| item.id == id));
                            });
                        };
                        view! {
                            <article class="card">
                                <h2 class="card__title">{book.title.clone()}</h2>
                                <p class="card__meta">{book.author.clone().unwrap_or_else(|| "Unknown author".to_owned())}</p>
                                <div class="card__actions">
                                    <a href=format!("/books/{id}")>"View Details"</a>
                                    {book.file_url.clone().map(|url| view! {
                                        <a href=url target="_blank" rel="noopener noreferrer">"Download/View"</a>
                                    })}
                                    <Show when=can_manage.clone()>
                                        <a href=format!("/books/edit/{id}")>"Edit"</a>
                                        <button class="btn btn--danger" on:click=on_delete.clone()>"Delete"</button>
                                    </Show>
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

#[component]
pub fn BookDetailPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let state = session.state();
    let nav = RouterNavigator::from_router();
    let route_id = use_route_id();
    let book = RwSignal::new(Remote::<Book>::Loading);
    let action_error = RwSignal::new(None::<String>);

    let session_load = session.clone();
    Effect::new(move || match route_id.get() {
        Some(id) => load_into(&session_load, book, move |s| async move { s.api().fetch::<Book>(id).await }),
        None => book.set(Remote::Failed("Book not found.".to_owned())),
    });

    view! {
        <div class="feature-page">
            <Show when=move || action_error.get().is_some()>
                <p class="error">{move || action_error.get().unwrap_or_default()}</p>
            </Show>
            {remote_view(book, move |book: &Book| {
                let id = book.id;
                let owner = book.created_by.clone();
                let can_manage = move || state.with(|s| s.user().is_some_and(|u| u.can_manage(owner.as_ref())));
                let session = session.clone();
                let nav = nav.clone();
                let on_delete = move |_| {
                    let nav = nav.clone();
                    confirm_delete::<Book, _>(&session, id, "book", action_error, move || nav.navigate("/books"));
                };
                view! {
                    <article class="detail">
                        <h1>{book.title.clone()}</h1>
                        {book.author.clone().map(|author| view! { <p class="detail__meta">"By " {author}</p> })}
                        {book.file_url.clone().map(|url| view! {
                            <p>
                                <a href=url target="_blank" rel="noopener noreferrer">"Download / View File"</a>
                            </p>
                        })}
                        <div class="detail__actions">
                            <a href="/books">"← Back to Library"</a>
                            <Show when=can_manage.clone()>
                                <a href=format!("/books/edit/{id}")>"Edit"</a>
                                <button class="btn btn--danger" on:click=on_delete.clone()>"Delete"</button>
                            </Show>
                        </div>
                    </article>
                }
            })}
        </div>
    }
}

/// Create (`/books/create`) or edit (`/books/edit/:id`).
#[component]
pub fn BookEditorPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let nav = RouterNavigator::from_router();
    let route_id = use_route_id();
    let editing = RwSignal::new(Remote::<Option<Book>>::Loading);
    let form = RwSignal::new(BookForm::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let session_load = session.clone();
    Effect::new(move || match route_id.get() {
        Some(id) => load_into(&session_load, editing, move |s| async move {
            let book = s.api().fetch::<Book>(id).await?;
            ensure_can_manage(&s, book.created_by.as_ref(), "book")?;
            Ok(Some(book))
        }),
        None => editing.set(Remote::Ready(None)),
    });
    Effect::new(move || {
        if let Some(Some(book)) = editing.with(|e| e.ready().cloned()) {
            form.set(BookForm::from_book(&book));
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let payload = match form.with(BookForm::payload) {
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
                Some(id) => session.api().update::<Book>(id, &payload).await,
                None => session.api().create::<Book>(&payload).await,
            };
            match saved {
                Ok(book) => nav.navigate(&format!("/books/{}", book.id)),
                Err(e) => error.set(Some(session.absorb(&e))),
            }
            busy.set(false);
        });
    };

    let heading = move || if route_id.get().is_some() { "Edit Book" } else { "Add New Book" };

    view! {
        <div class="feature-page">
            <h1>{heading}</h1>
            {remote_view(editing, move |_: &Option<Book>| {
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
                            "Author"
                            <input
                                type="text"
                                prop:value=move || form.with(|f| f.author.clone())
                                on:input=move |ev| form.update(|f| f.author = event_target_value(&ev))
                            />
                        </label>
                        <label>
                            "File URL"
                            <input
                                type="text"
                                placeholder="Relative path or full URL"
                                prop:value=move || form.with(|f| f.file_url.clone())
                                on:input=move |ev| form.update(|f| f.file_url = event_target_value(&ev))
                            />
                        </label>
                        <Show when=move || error.get().is_some()>
                            <p class="error">{move || error.get().unwrap_or_default()}</p>
                        </Show>
                        <div class="editor__actions">
                            <a href="/books">"Cancel"</a>
                            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                                {move || if busy.get() { "Saving..." } else { "Save Book" }}
                            </button>
                        </div>
                    </form>
                }
            })}
        </div>
    }
}
