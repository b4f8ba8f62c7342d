//! Students answer a quiz and see their score.

#[cfg(test)]
#[path = "quiz_take_test.rs"]
mod quiz_take_test;

use std::collections::BTreeMap;

use leptos::prelude::*;

use crate::net::types::{Answer, Question, QuestionKind, Quiz, QuizResult, Submission};
use crate::pages::shared::{load_into, remote_view, use_route_id};
use crate::state::remote::Remote;
use crate::state::session::AppSession;
use crate::util::task::spawn_ui;

pub const NO_ANSWERS: &str = "Please answer at least one question.";

/// Answers by question id, as the student enters them.
pub type AnswerSheet = BTreeMap<i64, Answer>;

/// Keep the non-blank answers for questions on this quiz.
pub fn build_submission(questions: &[Question], sheet: &AnswerSheet) -> Result<Submission, &'static str> {
    let answers: BTreeMap<String, Answer> = questions
        .iter()
        .filter_map(|q| sheet.get(&q.id).filter(|a| !a.is_blank()).map(|a| (q.id.to_string(), a.clone())))
        .collect();
    if answers.is_empty() {
        return Err(NO_ANSWERS);
    }
    Ok(Submission { answers })
}

/// Add or remove `key` from a multiple-choice answer, keeping selection order.
pub fn toggle_choice(sheet: &mut AnswerSheet, question_id: i64, key: &str, checked: bool) {
    let entry = sheet.entry(question_id).or_insert_with(|| Answer::Many(Vec::new()));
    if let Answer::One(_) = entry {
        *entry = Answer::Many(Vec::new());
    }
    if let Answer::Many(keys) = entry {
        keys.retain(|k| k != key);
        if checked {
            keys.push(key.to_owned());
        }
    }
}

pub fn is_chosen(sheet: &AnswerSheet, question_id: i64, key: &str) -> bool {
    match sheet.get(&question_id) {
        Some(Answer::One(value)) => value == key,
        Some(Answer::Many(keys)) => keys.iter().any(|k| k == key),
        None => false,
    }
}

/// "Your score: 3/4 (75%)".
pub fn score_message(result: &QuizResult) -> String {
    match result.percent() {
        Some(percent) => format!("Your score: {} ({percent}%)", result.score_label()),
        None => format!("Your score: {}", result.score_label()),
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Paper {
    quiz: Quiz,
    questions: Vec<Question>,
}

#[component]
pub fn QuizTakePage() -> impl IntoView {
    let session = expect_context::<AppSession>();
    let route_id = use_route_id();
    let paper = RwSignal::new(Remote::<Paper>::Loading);
    let sheet = RwSignal::new(AnswerSheet::new());
    let result = RwSignal::new(None::<QuizResult>);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let session_load = session.clone();
    Effect::new(move || match route_id.get() {
        Some(id) => load_into(&session_load, paper, move |s| async move {
            let quiz = s.api().fetch::<Quiz>(id).await?;
            let questions = s.api().questions(id).await?;
            Ok(Paper { quiz, questions })
        }),
        None => paper.set(Remote::Failed("Test not found.".to_owned())),
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let Some((quiz_id, submission)) = paper.with(|p| {
            p.ready().map(|p| (p.quiz.id, sheet.with(|s| build_submission(&p.questions, s))))
        }) else {
            return;
        };
        let submission = match submission {
            Ok(submission) => submission,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        error.set(None);
        busy.set(true);
        let session = session.clone();
        spawn_ui(async move {
            match session.api().submit_answers(quiz_id, &submission).await {
                Ok(graded) => {
                    log::info!("quiz {quiz_id} submitted: {}", graded.score_label());
                    result.set(Some(graded));
                }
                Err(e) => error.set(Some(session.absorb(&e))),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="feature-page feature-page--narrow">
            {remote_view(paper, move |paper: &Paper| {
                let on_submit = on_submit.clone();
                if paper.questions.is_empty() {
                    return view! { <p class="status">"Test or questions not available."</p> }.into_any();
                }
                let questions = paper.questions.clone();
                view! {
                    <header class="quiz__header">
                        <h1>{paper.quiz.title.clone()}</h1>
                        {paper.quiz.description.clone().map(|d| view! { <p>{d}</p> })}
                    </header>
                    <Show
                        when=move || result.with(Option::is_none)
                        fallback=move || {
                            let message = result.with(|r| r.as_ref().map(score_message).unwrap_or_default());
                            view! {
                                <section class="quiz__result">
                                    <h2>"Test submitted!"</h2>
                                    <p>{message}</p>
                                    <a href="/profile">"See all my results"</a>
                                    <a href="/tests">"Back to Tests"</a>
                                </section>
                            }
                        }
                    >
                        <form class="quiz" on:submit=on_submit.clone()>
                            {questions
                                .iter()
                                .enumerate()
                                .map(|(index, q)| question_view(index, q, sheet))
                                .collect_view()}
                            <Show when=move || error.get().is_some()>
                                <p class="error">{move || error.get().unwrap_or_default()}</p>
                            </Show>
                            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                                {move || if busy.get() { "Submitting..." } else { "Submit Answers" }}
                            </button>
                        </form>
                    </Show>
                }
                .into_any()
            })}
        </div>
    }
}

/// One fieldset per question. The view owns copies of what it shows so it
/// can outlive `question`.
fn question_view(index: usize, question: &Question, sheet: RwSignal<AnswerSheet>) -> impl IntoView + use<> {
    let id = question.id;
    let group = format!("q_{id}");
    let options: Vec<(String, String)> =
        question.options.clone().unwrap_or_default().into_iter().collect();

    let inputs = match question.question_type {
        QuestionKind::SingleChoice => options
            .into_iter()
            .map(|(key, label)| {
                let checked_key = key.clone();
                let chosen_key = key.clone();
                view! {
                    <label class="quiz__option">
                        <input
                            type="radio"
                            name=group.clone()
                            value=key
                            prop:checked=move || sheet.with(|s| is_chosen(s, id, &checked_key))
                            on:change=move |_| sheet.update(|s| {
                                s.insert(id, Answer::One(chosen_key.clone()));
                            })
                        />
                        <span>{label}</span>
                    </label>
                }
            })
            .collect_view()
            .into_any(),
        QuestionKind::MultipleChoice => options
            .into_iter()
            .map(|(key, label)| {
                let checked_key = key.clone();
                let toggled_key = key.clone();
                view! {
                    <label class="quiz__option">
                        <input
                            type="checkbox"
                            value=key
                            prop:checked=move || sheet.with(|s| is_chosen(s, id, &checked_key))
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                sheet.update(|s| toggle_choice(s, id, &toggled_key, checked));
                            }
                        />
                        <span>{label}</span>
                    </label>
                }
            })
            .collect_view()
            .into_any(),
        QuestionKind::TextInput => view! {
            <textarea
                rows="3"
                placeholder="Your answer here..."
                prop:value=move || sheet.with(|s| s.get(&id).map(ToString::to_string).unwrap_or_default())
                on:input=move |ev| sheet.update(|s| {
                    s.insert(id, Answer::One(event_target_value(&ev)));
                })
            ></textarea>
        }
        .into_any(),
    };

    view! {
        <fieldset class="quiz__question">
            <legend>{format!("{}. {}", index + 1, question.content)}</legend>
            {inputs}
        </fieldset>
    }
}
