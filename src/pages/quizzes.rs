//! Quiz ("test") pages: list, details with results, and the staff editor
//! with question management.
//!
//! DESIGN
//! ======
//! The question editor takes options as a JSON object and multiple-choice
//! answers as a JSON array, matching what the backend stores. Parsing lives
//! in `QuestionForm::payload` so it can be tested without a browser.

#[cfg(test)]
#[path = "quizzes_test.rs"]
mod quizzes_test;

use std::collections::BTreeMap;

use leptos::prelude::*;

use crate::net::types::{
    Answer, Question, QuestionKind, QuestionPayload, Quiz, QuizPayload, QuizResult, ROLE_STUDENT,
};
use crate::pages::shared::{
    confirm_delete, display_timestamp, ensure_can_manage, load_into, optional_text, remote_view, required_text,
    use_route_id,
};
use crate::state::remote::Remote;
use crate::state::session::AppSession;
use crate::util::dialog::confirm;
use crate::util::nav::{Navigator, RouterNavigator};
use crate::util::task::spawn_ui;

// =============================================================================
// FORMS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizForm {
    pub title: String,
    pub description: String,
}

impl QuizForm {
    pub fn from_quiz(quiz: &Quiz) -> Self {
        Self { title: quiz.title.clone(), description: quiz.description.clone().unwrap_or_default() }
    }

    pub fn payload(&self) -> Result<QuizPayload, &'static str> {
        Ok(QuizPayload {
            title: required_text(&self.title, "Title is required")?,
            description: optional_text(&self.description),
        })
    }
}

pub const OPTIONS_REQUIRED: &str = "Options are required for choice-based questions.";
pub const OPTIONS_INVALID: &str = "Invalid JSON format for options.";
pub const MULTIPLE_ANSWER_INVALID: &str =
    "For multiple choice, correct answer must be a valid JSON array (e.g., [\"a\", \"c\"]).";

/// Question editor values as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionForm {
    pub content: String,
    pub kind: QuestionKind,
    /// JSON object of option key to text.
    pub options: String,
    /// Plain text, or a JSON array for multiple choice.
    pub correct_answer: String,
}

impl QuestionForm {
    pub fn from_question(question: &Question) -> Self {
        let options = question
            .options
            .as_ref()
            .and_then(|map| serde_json::to_string_pretty(map).ok())
            .unwrap_or_default();
        let correct_answer = match &question.correct_answer {
            Some(Answer::One(text)) => text.clone(),
            Some(Answer::Many(keys)) => serde_json::to_string(keys).unwrap_or_default(),
            None => String::new(),
        };
        Self { content: question.content.clone(), kind: question.question_type, options, correct_answer }
    }

    pub fn payload(&self) -> Result<QuestionPayload, String> {
        let content = required_text(&self.content, "Content is required")?;
        let options = if self.kind.has_options() { Some(parse_options(&self.options)?) } else { None };
        let correct_answer = match self.kind {
            QuestionKind::MultipleChoice => Answer::Many(parse_answer_list(&self.correct_answer)?),
            QuestionKind::SingleChoice | QuestionKind::TextInput => {
                Answer::One(required_text(&self.correct_answer, "Correct answer is required")?)
            }
        };
        Ok(QuestionPayload { content, options, correct_answer, question_type: self.kind })
    }
}

/// A JSON object of string keys to string labels, non-empty.
pub fn parse_options(raw: &str) -> Result<BTreeMap<String, String>, String> {
    if raw.trim().is_empty() {
        return Err(OPTIONS_REQUIRED.to_owned());
    }
    let options: BTreeMap<String, String> = serde_json::from_str(raw).map_err(|_| OPTIONS_INVALID.to_owned())?;
    if options.is_empty() {
        return Err(OPTIONS_REQUIRED.to_owned());
    }
    Ok(options)
}

pub fn parse_answer_list(raw: &str) -> Result<Vec<String>, String> {
    let keys: Vec<String> = serde_json::from_str(raw).map_err(|_| MULTIPLE_ANSWER_INVALID.to_owned())?;
    if keys.is_empty() {
        return Err(MULTIPLE_ANSWER_INVALID.to_owned());
    }
    Ok(keys)
}

/// Question editor state: which question is open (`None` id for a new one).
#[derive(Clone, Debug, PartialEq, Eq)]
struct QuestionDraft {
    id: Option<i64>,
    form: QuestionForm,
}

// =============================================================================
// LIST
// =============================================================================

#[component]
pub fn QuizListPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let state = session.state();
    let quizzes = RwSignal::new(Remote::<Vec<Quiz>>::Loading);
    let action_error = RwSignal::new(None::<String>);

    load_into(&session, quizzes, |s| async move { s.api().list::<Quiz>().await });

    let is_staff = move || state.with(|s| s.user().is_some_and(|u| u.is_staff()));

    view! {
        <div class="feature-page">
            <header class="feature-page__header">
                <h1>"Tests"</h1>
                <Show when=is_staff>
                    <a class="btn btn--primary" href="/tests/create">"+ Create Test"</a>
                </Show>
            </header>
            <Show when=move || action_error.get().is_some()>
                <p class="error">{move || action_error.get().unwrap_or_default()}</p>
            </Show>
            {remote_view(quizzes, move |items: &Vec<Quiz>| {
                if items.is_empty() {
                    return view! { <p class="status">"No tests available."</p> }.into_any();
                }
                items
                    .iter()
                    .map(|quiz| {
                        let id = quiz.id;
                        let owner = quiz.created_by.clone();
                        let can_manage = move || state.with(|s| s.user().is_some_and(|u| u.can_manage(owner.as_ref())));
                        let session = session.clone();
                        let on_delete = move |_| {
                            confirm_delete::<Quiz, _>(&session, id, "test", action_error, move || {
                                quizzes.update(|q| q.remove_where(|item| item.id == id));
                            });
                        };
                        view! {
                            <article class="card">
                                <h2 class="card__title">{quiz.title.clone()}</h2>
                                {quiz.description.clone().map(|d| view! { <p class="card__body">{d}</p> })}
                                <p class="card__meta">{format!("{} questions", quiz.questions.len())}</p>
                                <div class="card__actions">
                                    <a href=format!("/tests/details/{id}")>"View Details"</a>
                                    <Show when=can_manage.clone()>
                                        <a href=format!("/tests/edit/{id}")>"Edit"</a>
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

// =============================================================================
// DETAILS
// =============================================================================

#[component]
pub fn QuizDetailPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let state = session.state();
    let route_id = use_route_id();
    let quiz = RwSignal::new(Remote::<Quiz>::Loading);
    let results = RwSignal::new(Remote::<Vec<QuizResult>>::Loading);

    let session_load = session.clone();
    Effect::new(move || {
        let Some(id) = route_id.get() else {
            quiz.set(Remote::Failed("Test not found.".to_owned()));
            return;
        };
        load_into(&session_load, quiz, move |s| async move { s.api().fetch::<Quiz>(id).await });
        if session_load.state().with_untracked(|s| s.user().is_some_and(|u| u.is_staff())) {
            load_into(&session_load, results, move |s| async move { s.api().quiz_results(id).await });
        }
    });

    let is_student = move || state.with(|s| s.user().is_some_and(|u| u.has_role(ROLE_STUDENT)));
    let is_staff = move || state.with(|s| s.user().is_some_and(|u| u.is_staff()));

    view! {
        <div class="feature-page">
            {remote_view(quiz, move |quiz: &Quiz| {
                let id = quiz.id;
                let owner = quiz.created_by.clone();
                let can_manage = move || state.with(|s| s.user().is_some_and(|u| u.can_manage(owner.as_ref())));
                let preview: Vec<String> = quiz.questions.iter().map(|q| q.content.clone()).collect();
                let has_preview = !preview.is_empty();
                let author = quiz.created_by.as_ref().map_or_else(|| "unknown".to_owned(), |u| u.username.clone());
                view! {
                    <article class="detail">
                        <h1>{quiz.title.clone()}</h1>
                        <p class="detail__meta">
                            {format!("Created by {author} on {}", display_timestamp(&quiz.created_at))}
                        </p>
                        {quiz.description.clone().map(|d| view! { <p class="detail__body">{d}</p> })}
                        <ul class="detail__facts">
                            <li>{format!("Number of questions: {}", quiz.questions.len())}</li>
                        </ul>
                        <Show when=move || has_preview && !is_student()>
                            <section>
                                <h2>"Questions"</h2>
                                <ol>
                                    {preview.clone().into_iter().map(|text| view! { <li>{text}</li> }).collect_view()}
                                </ol>
                            </section>
                        </Show>
                        <div class="detail__actions">
                            <a href="/tests">"← Back to All Tests"</a>
                            <Show when=is_student>
                                <a class="btn btn--primary" href=format!("/tests/take/{id}")>"Start Test"</a>
                            </Show>
                            <Show when=can_manage.clone()>
                                <a class="btn" href=format!("/tests/edit/{id}")>"Manage Test & Questions"</a>
                            </Show>
                        </div>
                    </article>
                }
            })}
            <Show when=is_staff>
                <section class="results">
                    <h2>"Results"</h2>
                    {remote_view(results, |rows: &Vec<QuizResult>| results_table(rows))}
                </section>
            </Show>
        </div>
    }
}

/// Attempts as a table; shared with the profile page.
pub fn results_table(rows: &[QuizResult]) -> AnyView {
    if rows.is_empty() {
        return view! { <p class="status">"No results yet."</p> }.into_any();
    }
    let rows: Vec<QuizResult> = rows.to_vec();
    view! {
        <table class="results__table">
            <thead>
                <tr>
                    <th>"Test"</th>
                    <th>"Student"</th>
                    <th>"Score"</th>
                    <th>"%"</th>
                    <th>"Taken"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|r| {
                        let test = r.test.as_ref().map_or_else(|| format!("#{}", r.test_id), |t| t.title.clone());
                        let student = r.user.as_ref().map_or_else(|| format!("#{}", r.user_id), |u| u.username.clone());
                        let percent = r.percent().map_or_else(|| "-".to_owned(), |p| format!("{p}%"));
                        view! {
                            <tr>
                                <td>{test}</td>
                                <td>{student}</td>
                                <td>{r.score_label()}</td>
                                <td>{percent}</td>
                                <td>{display_timestamp(&r.taken_at)}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_any()
}

// =============================================================================
// EDITOR
// =============================================================================

/// Create (`/tests/create`) or edit (`/tests/edit/:id`). New quizzes open in
/// the editor after saving so questions can be added.
#[component]
pub fn QuizEditorPage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let nav = RouterNavigator::from_router();
    let route_id = use_route_id();
    let editing = RwSignal::new(Remote::<Option<Quiz>>::Loading);
    let form = RwSignal::new(QuizForm::default());
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let session_load = session.clone();
    Effect::new(move || match route_id.get() {
        Some(id) => load_into(&session_load, editing, move |s| async move {
            let quiz = s.api().fetch::<Quiz>(id).await?;
            ensure_can_manage(&s, quiz.created_by.as_ref(), "test")?;
            Ok(Some(quiz))
        }),
        None => editing.set(Remote::Ready(None)),
    });
    Effect::new(move || {
        if let Some(Some(quiz)) = editing.with(|e| e.ready().cloned()) {
            form.set(QuizForm::from_quiz(&quiz));
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let payload = match form.with(QuizForm::payload) {
            Ok(payload) => payload,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        error.set(None);
        notice.set(None);
        busy.set(true);
        let session = session.clone();
        let nav = nav.clone();
        let id = route_id.get_untracked();
        spawn_ui(async move {
            match id {
                Some(id) => match session.api().update::<Quiz>(id, &payload).await {
                    Ok(_) => notice.set(Some("Test details updated.".to_owned())),
                    Err(e) => error.set(Some(session.absorb(&e))),
                },
                None => match session.api().create::<Quiz>(&payload).await {
                    Ok(quiz) => nav.navigate(&format!("/tests/edit/{}", quiz.id)),
                    Err(e) => error.set(Some(session.absorb(&e))),
                },
            }
            busy.set(false);
        });
    };

    let heading = move || if route_id.get().is_some() { "Edit Test" } else { "Create Test" };

    view! {
        <div class="feature-page">
            <a href="/tests">"← Back to Tests List"</a>
            <h1>{heading}</h1>
            {remote_view(editing, move |quiz: &Option<Quiz>| {
                let on_submit = on_submit.clone();
                let quiz_id = quiz.as_ref().map(|q| q.id);
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
                                rows="3"
                                prop:value=move || form.with(|f| f.description.clone())
                                on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                            ></textarea>
                        </label>
                        <Show when=move || error.get().is_some()>
                            <p class="error">{move || error.get().unwrap_or_default()}</p>
                        </Show>
                        <Show when=move || notice.get().is_some()>
                            <p class="notice">{move || notice.get().unwrap_or_default()}</p>
                        </Show>
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Saving Test Details..." } else { "Save Test Details" }}
                        </button>
                    </form>
                    {quiz_id.map(|id| view! { <QuestionManager quiz_id=id/> })}
                }
            })}
        </div>
    }
}

/// Question list with an inline add/edit form.
#[component]
fn QuestionManager(quiz_id: i64) -> impl IntoView {
    let session = expect_context::<AppSession>();
    let questions = RwSignal::new(Remote::<Vec<Question>>::Loading);
    let draft = RwSignal::new(None::<QuestionDraft>);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let reload = {
        let session = session.clone();
        move || load_into(&session, questions, move |s| async move { s.api().questions(quiz_id).await })
    };
    reload();

    let on_save = {
        let session = session.clone();
        let reload = reload.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if busy.get() {
                return;
            }
            let Some(current) = draft.get() else {
                return;
            };
            let payload = match current.form.payload() {
                Ok(payload) => payload,
                Err(message) => {
                    error.set(Some(message));
                    return;
                }
            };
            error.set(None);
            busy.set(true);
            let session = session.clone();
            let reload = reload.clone();
            spawn_ui(async move {
                let saved = match current.id {
                    Some(question_id) => session.api().update_question(quiz_id, question_id, &payload).await,
                    None => session.api().add_question(quiz_id, &payload).await,
                };
                match saved {
                    Ok(_) => {
                        draft.set(None);
                        reload();
                    }
                    Err(e) => error.set(Some(session.absorb(&e))),
                }
                busy.set(false);
            });
        }
    };

    let on_delete = {
        let session = session.clone();
        let reload = reload.clone();
        move |question_id: i64| {
            if !confirm("Are you sure you want to delete this question?") {
                return;
            }
            let session = session.clone();
            let reload = reload.clone();
            spawn_ui(async move {
                match session.api().remove_question(quiz_id, question_id).await {
                    Ok(_) => reload(),
                    Err(e) => error.set(Some(session.absorb(&e))),
                }
            });
        }
    };

    let set_form = move |apply: fn(&mut QuestionForm, String), value: String| {
        draft.update(|d| {
            if let Some(d) = d {
                apply(&mut d.form, value);
            }
        });
    };
    let kind = move || draft.with(|d| d.as_ref().map(|d| d.form.kind).unwrap_or_default());

    view! {
        <section class="questions">
            <header class="feature-page__header">
                <h2>"Questions"</h2>
                <button
                    class="btn"
                    on:click=move |_| {
                        error.set(None);
                        draft.set(Some(QuestionDraft { id: None, form: QuestionForm::default() }));
                    }
                >
                    "Add New Question"
                </button>
            </header>
            {remote_view(questions, move |items: &Vec<Question>| {
                if items.is_empty() {
                    return view! { <p class="status">"No questions yet."</p> }.into_any();
                }
                view! {
                    <ol class="questions__list">
                        {items
                            .iter()
                            .map(|q| {
                                let id = q.id;
                                let edit_form = QuestionForm::from_question(q);
                                let on_delete = on_delete.clone();
                                view! {
                                    <li class="questions__item">
                                        <p>{q.content.clone()}</p>
                                        <p class="card__meta">{q.question_type.label()}</p>
                                        <button
                                            class="btn"
                                            on:click=move |_| {
                                                error.set(None);
                                                draft.set(Some(QuestionDraft { id: Some(id), form: edit_form.clone() }));
                                            }
                                        >
                                            "Edit"
                                        </button>
                                        <button class="btn btn--danger" on:click=move |_| on_delete(id)>
                                            "Delete"
                                        </button>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ol>
                }
                .into_any()
            })}
            <Show when=move || draft.with(Option::is_some)>
                <form class="editor editor--question" on:submit=on_save.clone()>
                    <h3>{move || if draft.with(|d| d.as_ref().is_some_and(|d| d.id.is_some())) { "Edit Question" } else { "Add Question" }}</h3>
                    <label>
                        "Content"
                        <textarea
                            rows="3"
                            prop:value=move || draft.with(|d| d.as_ref().map(|d| d.form.content.clone()).unwrap_or_default())
                            on:input=move |ev| set_form(|f, v| f.content = v, event_target_value(&ev))
                        ></textarea>
                    </label>
                    <label>
                        "Question Type"
                        <select
                            prop:value=move || kind().as_str()
                            on:change=move |ev| {
                                if let Some(k) = QuestionKind::parse(&event_target_value(&ev)) {
                                    draft.update(|d| {
                                        if let Some(d) = d {
                                            d.form.kind = k;
                                        }
                                    });
                                }
                            }
                        >
                            {QuestionKind::ALL
                                .into_iter()
                                .map(|k| view! { <option value=k.as_str()>{k.label()}</option> })
                                .collect_view()}
                        </select>
                    </label>
                    <Show when=move || kind().has_options()>
                        <label>
                            "Options (JSON, e.g. {\"a\": \"Option A\", \"b\": \"Option B\"})"
                            <textarea
                                rows="4"
                                prop:value=move || draft.with(|d| d.as_ref().map(|d| d.form.options.clone()).unwrap_or_default())
                                on:input=move |ev| set_form(|f, v| f.options = v, event_target_value(&ev))
                            ></textarea>
                        </label>
                    </Show>
                    <label>
                        {move || match kind() {
                            QuestionKind::MultipleChoice => "Correct Answer (JSON array of keys, e.g. [\"a\", \"c\"])",
                            QuestionKind::SingleChoice => "Correct Answer (option key)",
                            QuestionKind::TextInput => "Correct Answer (exact text)",
                        }}
                        <input
                            type="text"
                            prop:value=move || draft.with(|d| d.as_ref().map(|d| d.form.correct_answer.clone()).unwrap_or_default())
                            on:input=move |ev| set_form(|f, v| f.correct_answer = v, event_target_value(&ev))
                        />
                    </label>
                    <Show when=move || error.get().is_some()>
                        <p class="error">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <div class="editor__actions">
                        <button class="btn" type="button" on:click=move |_| draft.set(None)>"Cancel"</button>
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Saving..." } else { "Save Question" }}
                        </button>
                    </div>
                </form>
            </Show>
        </section>
    }
}
