//! Assignment pages. Every route here sits behind the access guard.

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;

use leptos::prelude::*;

use crate::net::types::{Task, TaskPayload};
use crate::pages::shared::{
    confirm_delete, display_timestamp, ensure_can_manage, load_into, optional_text, remote_view, required_text,
    use_route_id,
};
use crate::state::remote::Remote;
use crate::state::session::AppSession;
use crate::util::nav::{Navigator, RouterNavigator};
use crate::util::task::spawn_ui;

/// Editor form values as typed. `due_date` holds the `datetime-local`
/// input value (`YYYY-MM-DDTHH:MM`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub due_date: String,
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            due_date: task.due_date.as_deref().map(due_date_to_input).unwrap_or_default(),
        }
    }

    /// A blank due date is sent as `null` so editing can clear it.
    pub fn payload(&self) -> Result<TaskPayload, &'static str> {
        Ok(TaskPayload {
            title: required_text(&self.title, "Title is required")?,
            description: optional_text(&self.description),
            due_date: due_date_from_input(&self.due_date)?,
        })
    }
}

/// `datetime-local` value to the backend's `YYYY-MM-DDTHH:MM:SS`.
pub fn due_date_from_input(raw: &str) -> Result<Option<String>, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let Some((date, time)) = raw.split_once('T') else {
        return Err("Due date must include a date and a time");
    };
    match time.len() {
        5 => Ok(Some(format!("{date}T{time}:00"))),
        8 => Ok(Some(raw.to_owned())),
        _ => Err("Due date must include a date and a time"),
    }
}

/// Backend timestamp to a `datetime-local` value (minute precision).
pub fn due_date_to_input(iso: &str) -> String {
    iso.chars().take(16).collect()
}

#[component]
pub fn TaskListPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let state = session.state();
    let tasks = RwSignal::new(Remote::<Vec<Task>>::Loading);
    let action_error = RwSignal::new(None::<String>);

    load_into(&session, tasks, |s| async move { s.api().list::<Task>().await });

    let is_staff = move || state.with(|s| s.user().is_some_and(|u| u.is_staff()));

    view! {
        <div class="feature-page">
            <header class="feature-page__header">
                <h1>"Tasks"</h1>
                <Show when=is_staff>
                    <a class="btn btn--primary" href="/tasks/create">"+ Add New Task"</a>
                </Show>
            </header>
            <Show when=move || action_error.get().is_some()>
                <p class="error">{move || action_error.get().unwrap_or_default()}</p>
            </Show>
            {remote_view(tasks, move |items: &Vec<Task>| {
                if items.is_empty() {
                    return view! { <p class="status">"No tasks found."</p> }.into_any();
                }
                items
                    .iter()
                    .map(|task| {
                        let id = task.id;
                        let owner = task.creator.clone();
                        let can_manage = move || state.with(|s| s.user().is_some_and(|u| u.can_manage(owner.as_ref())));
                        let session = session.clone();
                        let on_delete = move |_| {
                            confirm_delete::<Task, _>(&session, id, "task", action_error, move || {
                                tasks.update(|t| t.remove_where(|item| item.id == id));
                            });
                        };
                        let meta = match &task.due_date {
                            Some(due) => format!("Created: {} | Due: {}", display_timestamp(&task.created_at), display_timestamp(due)),
                            None => format!("Created: {}", display_timestamp(&task.created_at)),
                        };
                        view! {
                            <article class="card">
                                <h2 class="card__title">{task.title.clone()}</h2>
                                <p class="card__meta">{meta}</p>
                                <div class="card__actions">
                                    <a href=format!("/tasks/{id}")>"View Details →"</a>
                                    <Show when=can_manage.clone()>
                                        <a href=format!("/tasks/edit/{id}")>"Edit"</a>
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
pub fn TaskDetailPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let state = session.state();
    let nav = RouterNavigator::from_router();
    let route_id = use_route_id();
    let task = RwSignal::new(Remote::<Task>::Loading);
    let action_error = RwSignal::new(None::<String>);

    let session_load = session.clone();
    Effect::new(move || match route_id.get() {
        Some(id) => load_into(&session_load, task, move |s| async move { s.api().fetch::<Task>(id).await }),
        None => task.set(Remote::Failed("Invalid task ID.".to_owned())),
    });

    view! {
        <div class="feature-page">
            <Show when=move || action_error.get().is_some()>
                <p class="error">{move || action_error.get().unwrap_or_default()}</p>
            </Show>
            {remote_view(task, move |task: &Task| {
                let id = task.id;
                let owner = task.creator.clone();
                let can_manage = move || state.with(|s| s.user().is_some_and(|u| u.can_manage(owner.as_ref())));
                let session = session.clone();
                let nav = nav.clone();
                let on_delete = move |_| {
                    let nav = nav.clone();
                    confirm_delete::<Task, _>(&session, id, "task", action_error, move || nav.navigate("/tasks"));
                };
                let creator = task.creator.as_ref().map_or_else(|| "unknown".to_owned(), |c| c.username.clone());
                view! {
                    <article class="detail">
                        <h1>{task.title.clone()}</h1>
                        <p class="detail__meta">
                            {format!("Created by: {creator} on {}", display_timestamp(&task.created_at))}
                        </p>
                        {task.due_date.as_deref().map(|due| view! {
                            <p class="detail__meta detail__meta--due">{format!("Due Date: {}", display_timestamp(due))}</p>
                        })}
                        {task.description.clone().map(|text| view! { <p class="detail__body">{text}</p> })}
                        {(!task.assigned_to_users.is_empty()).then(|| {
                            let assigned = task.assigned_to_users.clone();
                            view! {
                                <section>
                                    <h2>"Assigned to"</h2>
                                    <ul>
                                        {assigned.into_iter().map(|u| view! { <li>{u.username}</li> }).collect_view()}
                                    </ul>
                                </section>
                            }
                        })}
                        <div class="detail__actions">
                            <a href="/tasks">"← Back to All Tasks"</a>
                            <Show when=can_manage.clone()>
                                <a href=format!("/tasks/edit/{id}")>"Edit"</a>
                                <button class="btn btn--danger" on:click=on_delete.clone()>"Delete"</button>
                            </Show>
                        </div>
                    </article>
                }
            })}
        </div>
    }
}

/// Create (`/tasks/create`) or edit (`/tasks/edit/:id`).
#[component]
pub fn TaskEditorPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let nav = RouterNavigator::from_router();
    let route_id = use_route_id();
    let editing = RwSignal::new(Remote::<Option<Task>>::Loading);
    let form = RwSignal::new(TaskForm::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let session_load = session.clone();
    Effect::new(move || match route_id.get() {
        Some(id) => load_into(&session_load, editing, move |s| async move {
            let task = s.api().fetch::<Task>(id).await?;
            ensure_can_manage(&s, task.creator.as_ref(), "task")?;
            Ok(Some(task))
        }),
        None => editing.set(Remote::Ready(None)),
    });
    Effect::new(move || {
        if let Some(Some(task)) = editing.with(|e| e.ready().cloned()) {
            form.set(TaskForm::from_task(&task));
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let payload = match form.with(TaskForm::payload) {
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
                Some(id) => session.api().update::<Task>(id, &payload).await,
                None => session.api().create::<Task>(&payload).await,
            };
            match saved {
                Ok(task) => nav.navigate(&format!("/tasks/{}", task.id)),
                Err(e) => error.set(Some(session.absorb(&e))),
            }
            busy.set(false);
        });
    };

    let heading = move || if route_id.get().is_some() { "Edit Task" } else { "Create New Task" };

    view! {
        <div class="feature-page">
            <h1>{heading}</h1>
            {remote_view(editing, move |_: &Option<Task>| {
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
                            "Description"
                            <textarea
                                rows="4"
                                prop:value=move || form.with(|f| f.description.clone())
                                on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                            ></textarea>
                        </label>
                        <label>
                            "Due Date"
                            <input
                                type="datetime-local"
                                prop:value=move || form.with(|f| f.due_date.clone())
                                on:input=move |ev| form.update(|f| f.due_date = event_target_value(&ev))
                            />
                        </label>
                        <Show when=move || error.get().is_some()>
                            <p class="error">{move || error.get().unwrap_or_default()}</p>
                        </Show>
                        <div class="editor__actions">
                            <a href="/tasks">"Cancel"</a>
                            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                                {move || if busy.get() { "Saving..." } else { "Save Task" }}
                            </button>
                        </div>
                    </form>
                }
            })}
        </div>
    }
}
