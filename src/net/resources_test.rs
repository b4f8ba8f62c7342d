use std::collections::BTreeMap;

use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::transport::Method;
use crate::net::types::Answer;
use crate::test_support::{BASE_URL, MemoryTokens, ScriptedTransport, client};

fn book_json(id: i64, title: &str) -> serde_json::Value {
    json!({ "id": id, "title": title, "author": "Knuth", "file_url": null, "created_by": { "id": 1, "username": "alice" } })
}

// =============================================================================
// GENERIC CRUD
// =============================================================================

#[test]
fn list_reads_the_collection() {
    let transport = ScriptedTransport::default();
    transport.reply(200, json!([book_json(1, "TAOCP"), book_json(2, "SICP")]));
    let api = client(&transport, &MemoryTokens::default());

    let books = block_on(api.list::<Book>()).unwrap();

    assert_eq!(books.iter().map(|b| b.title.as_str()).collect::<Vec<_>>(), vec!["TAOCP", "SICP"]);
    assert_eq!(transport.sent()[0].url, format!("{BASE_URL}/books"));
}

#[test]
fn fetch_update_and_remove_use_item_path() {
    let transport = ScriptedTransport::default();
    transport
        .reply(200, json!({ "id": 7, "title": "Essay", "created_at": "2025-01-01T00:00:00" }))
        .reply(200, json!({ "id": 7, "title": "Essay v2", "created_at": "2025-01-01T00:00:00" }))
        .reply(200, json!({ "msg": "Task deleted" }));
    let api = client(&transport, &MemoryTokens::with("tok"));

    let task = block_on(api.fetch::<Task>(7)).unwrap();
    assert!(task.assigned_to_users.is_empty());

    let payload = TaskPayload { title: "Essay v2".to_owned(), description: None, due_date: None };
    let updated = block_on(api.update::<Task>(7, &payload)).unwrap();
    assert_eq!(updated.title, "Essay v2");

    let ack = block_on(api.remove::<Task>(7)).unwrap();
    assert_eq!(ack.msg, "Task deleted");

    let sent = transport.sent();
    assert_eq!(sent.iter().map(|r| r.method).collect::<Vec<_>>(), vec![Method::Get, Method::Put, Method::Delete]);
    assert!(sent.iter().all(|r| r.url == format!("{BASE_URL}/tasks/7")));
    assert_eq!(sent[1].body, Some(json!({ "title": "Essay v2", "due_date": null })));
}

#[test]
fn create_posts_payload_to_collection() {
    let transport = ScriptedTransport::default();
    transport.reply(201, json!({ "id": 3, "title": "Exam dates", "content": "Week 12", "created_at": "2025-02-01T09:00:00" }));
    let api = client(&transport, &MemoryTokens::with("tok"));

    let payload = NewsPayload { title: "Exam dates".to_owned(), content: "Week 12".to_owned() };
    let item = block_on(api.create::<NewsItem>(&payload)).unwrap();

    assert_eq!(item.id, 3);
    let sent = transport.sent();
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].url, format!("{BASE_URL}/news"));
}

#[test]
fn quizzes_live_under_tests() {
    assert_eq!(Quiz::COLLECTION, "/tests");
    assert_eq!(Quiz::item_path(4), "/tests/4");
}

#[test]
fn forbidden_delete_surfaces_backend_message() {
    let transport = ScriptedTransport::default();
    transport.reply(403, json!({ "msg": "Permission denied: Not the owner" }));
    let api = client(&transport, &MemoryTokens::with("tok"));

    let err = block_on(api.remove::<Book>(1)).unwrap_err();

    assert_eq!(err, ApiError::Forbidden("Permission denied: Not the owner".to_owned()));
    assert!(!err.is_auth_failure());
}

// =============================================================================
// QUIZ ENDPOINTS
// =============================================================================

#[test]
fn question_endpoints_nest_under_the_quiz() {
    let transport = ScriptedTransport::default();
    let question = json!({
        "id": 9, "test_id": 4, "content": "2+2?",
        "options": { "a": "3", "b": "4" }, "correct_answer": "b", "question_type": "single_choice"
    });
    transport.reply(201, question.clone()).reply(200, question).reply(200, json!({ "msg": "Question deleted" }));
    let api = client(&transport, &MemoryTokens::with("tok"));

    let payload = QuestionPayload {
        content: "2+2?".to_owned(),
        options: Some(BTreeMap::from([("a".to_owned(), "3".to_owned()), ("b".to_owned(), "4".to_owned())])),
        correct_answer: Answer::One("b".to_owned()),
        question_type: crate::net::types::QuestionKind::SingleChoice,
    };
    block_on(api.add_question(4, &payload)).unwrap();
    block_on(api.update_question(4, 9, &payload)).unwrap();
    block_on(api.remove_question(4, 9)).unwrap();

    let urls: Vec<String> = transport.sent().into_iter().map(|r| r.url).collect();
    assert_eq!(urls, vec![
        format!("{BASE_URL}/tests/4/questions"),
        format!("{BASE_URL}/tests/4/questions/9"),
        format!("{BASE_URL}/tests/4/questions/9"),
    ]);
}

#[test]
fn submit_answers_returns_graded_attempt() {
    let transport = ScriptedTransport::default();
    transport.reply(200, json!({ "id": 1, "user_id": 5, "test_id": 4, "score": 2, "max_score": 3, "taken_at": "2025-03-01T10:00:00" }));
    let api = client(&transport, &MemoryTokens::with("tok"));

    let submission = Submission {
        answers: BTreeMap::from([
            ("9".to_owned(), Answer::One("b".to_owned())),
            ("10".to_owned(), Answer::Many(vec!["a".to_owned(), "c".to_owned()])),
        ]),
    };
    let result = block_on(api.submit_answers(4, &submission)).unwrap();

    assert_eq!(result.score_label(), "2/3");
    let sent = transport.sent();
    assert_eq!(sent[0].url, format!("{BASE_URL}/tests/4/submit"));
    assert_eq!(sent[0].body, Some(json!({ "answers": { "10": ["a", "c"], "9": "b" } })));
}

#[test]
fn result_listings_hit_their_endpoints() {
    let transport = ScriptedTransport::default();
    transport.reply(200, json!([])).reply(200, json!([]));
    let api = client(&transport, &MemoryTokens::with("tok"));

    block_on(api.my_results()).unwrap();
    block_on(api.quiz_results(4)).unwrap();

    let urls: Vec<String> = transport.sent().into_iter().map(|r| r.url).collect();
    assert_eq!(urls, vec![format!("{BASE_URL}/test_results"), format!("{BASE_URL}/tests/4/results")]);
}

// =============================================================================
// NOTIFICATIONS & CHATBOT
// =============================================================================

#[test]
fn notifications_accept_mixed_id_shapes() {
    let transport = ScriptedTransport::default();
    transport.reply(200, json!([
        { "id": 1, "message": "New task", "type": "task", "link": "/tasks/1" },
        { "id": "news-2", "message": "News posted", "read": true, "type": "news" },
    ]));
    let api = client(&transport, &MemoryTokens::with("tok"));

    let items = block_on(api.notifications()).unwrap();

    assert_eq!(items.len(), 2);
    assert!(!items[0].read);
    assert_eq!(items[1].id.to_string(), "news-2");
}

#[test]
fn ask_chatbot_unwraps_reply() {
    let transport = ScriptedTransport::default();
    transport.reply(200, json!({ "reply": "Tasks are due Friday." }));
    let api = client(&transport, &MemoryTokens::with("tok"));

    let reply = block_on(api.ask_chatbot("When are tasks due?")).unwrap();

    assert_eq!(reply, "Tasks are due Friday.");
    let sent = transport.sent();
    assert_eq!(sent[0].url, format!("{BASE_URL}/chatbot/ask"));
    assert_eq!(sent[0].body, Some(json!({ "message": "When are tasks due?" })));
}

#[test]
fn chatbot_outage_keeps_reply_text() {
    let transport = ScriptedTransport::default();
    transport.reply(503, json!({ "reply": "The assistant is not configured." }));
    let api = client(&transport, &MemoryTokens::with("tok"));

    let err = block_on(api.ask_chatbot("hi")).unwrap_err();

    assert_eq!(err.user_message(), "The assistant is not configured.");
}
