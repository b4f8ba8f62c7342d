use super::*;

fn question(kind: QuestionKind, options: &str, answer: &str) -> QuestionForm {
    QuestionForm {
        content: "Pick the primes".to_owned(),
        kind,
        options: options.to_owned(),
        correct_answer: answer.to_owned(),
    }
}

// =============================================================================
// QuizForm
// =============================================================================

#[test]
fn quiz_payload_requires_title() {
    assert_eq!(QuizForm::default().payload(), Err("Title is required"));
}

#[test]
fn quiz_payload_drops_blank_description() {
    let form = QuizForm { title: " Midterm ".to_owned(), description: " ".to_owned() };
    assert_eq!(form.payload(), Ok(QuizPayload { title: "Midterm".to_owned(), description: None }));
}

// =============================================================================
// QuestionForm
// =============================================================================

#[test]
fn question_requires_content() {
    let form = QuestionForm { content: "  ".to_owned(), ..question(QuestionKind::TextInput, "", "Paris") };
    assert_eq!(form.payload(), Err("Content is required".to_owned()));
}

#[test]
fn text_input_sends_no_options() {
    let payload = question(QuestionKind::TextInput, "{\"a\": \"ignored\"}", " Paris ").payload().unwrap();
    assert_eq!(payload.options, None);
    assert_eq!(payload.correct_answer, Answer::One("Paris".to_owned()));
    assert_eq!(payload.question_type, QuestionKind::TextInput);
}

#[test]
fn choice_questions_need_options() {
    for raw in ["", "  ", "{}"] {
        let form = question(QuestionKind::SingleChoice, raw, "a");
        assert_eq!(form.payload(), Err(OPTIONS_REQUIRED.to_owned()), "options {raw:?}");
    }
}

#[test]
fn malformed_options_are_rejected() {
    let form = question(QuestionKind::SingleChoice, "{a: 1", "a");
    assert_eq!(form.payload(), Err(OPTIONS_INVALID.to_owned()));
    let form = question(QuestionKind::SingleChoice, "[\"a\", \"b\"]", "a");
    assert_eq!(form.payload(), Err(OPTIONS_INVALID.to_owned()));
}

#[test]
fn single_choice_keeps_answer_key() {
    let payload = question(QuestionKind::SingleChoice, "{\"a\": \"2\", \"b\": \"4\"}", "a").payload().unwrap();
    let options = payload.options.unwrap();
    assert_eq!(options.get("a").map(String::as_str), Some("2"));
    assert_eq!(payload.correct_answer, Answer::One("a".to_owned()));
}

#[test]
fn multiple_choice_answer_must_be_json_array() {
    let options = "{\"a\": \"2\", \"b\": \"4\", \"c\": \"5\"}";
    for raw in ["a, c", "\"a\"", "[]"] {
        let form = question(QuestionKind::MultipleChoice, options, raw);
        assert_eq!(form.payload(), Err(MULTIPLE_ANSWER_INVALID.to_owned()), "answer {raw:?}");
    }
    let payload = question(QuestionKind::MultipleChoice, options, "[\"a\", \"c\"]").payload().unwrap();
    assert_eq!(payload.correct_answer, Answer::Many(vec!["a".to_owned(), "c".to_owned()]));
}

#[test]
fn from_question_renders_answer_list_as_json() {
    let stored = Question {
        id: 4,
        test_id: 2,
        content: "Pick the primes".to_owned(),
        options: Some(BTreeMap::from([("a".to_owned(), "2".to_owned()), ("b".to_owned(), "4".to_owned())])),
        correct_answer: Some(Answer::Many(vec!["a".to_owned()])),
        question_type: QuestionKind::MultipleChoice,
    };

    let form = QuestionForm::from_question(&stored);

    assert_eq!(form.correct_answer, "[\"a\"]");
    assert_eq!(form.kind, QuestionKind::MultipleChoice);
    assert_eq!(parse_options(&form.options), Ok(stored.options.clone().unwrap()));
    assert_eq!(form.payload().unwrap().correct_answer, Answer::Many(vec!["a".to_owned()]));
}

#[test]
fn from_question_without_answer_leaves_field_blank() {
    let stored = Question {
        id: 1,
        test_id: 2,
        content: "Capital of France?".to_owned(),
        options: None,
        correct_answer: None,
        question_type: QuestionKind::TextInput,
    };
    let form = QuestionForm::from_question(&stored);
    assert_eq!(form.options, "");
    assert_eq!(form.correct_answer, "");
}
