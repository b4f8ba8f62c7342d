use super::*;

#[test]
fn due_date_gets_seconds_appended() {
    assert_eq!(due_date_from_input("2025-05-01T14:30"), Ok(Some("2025-05-01T14:30:00".to_owned())));
}

#[test]
fn due_date_with_seconds_is_kept() {
    assert_eq!(due_date_from_input("2025-05-01T14:30:15"), Ok(Some("2025-05-01T14:30:15".to_owned())));
}

#[test]
fn blank_due_date_is_null() {
    assert_eq!(due_date_from_input("  "), Ok(None));
}

#[test]
fn malformed_due_date_is_rejected() {
    assert_eq!(due_date_from_input("2025-05-01"), Err("Due date must include a date and a time"));
    assert_eq!(due_date_from_input("2025-05-01T1"), Err("Due date must include a date and a time"));
}

#[test]
fn due_date_to_input_truncates_to_minutes() {
    assert_eq!(due_date_to_input("2025-05-01T14:30:00"), "2025-05-01T14:30");
}

#[test]
fn payload_serializes_null_due_date() {
    let form = TaskForm { title: "Essay".to_owned(), description: " ".to_owned(), due_date: String::new() };
    let payload = form.payload().unwrap();
    assert_eq!(serde_json::to_value(payload).unwrap(), serde_json::json!({ "title": "Essay", "due_date": null }));
}

#[test]
fn payload_requires_title() {
    assert_eq!(TaskForm::default().payload(), Err("Title is required"));
}

#[test]
fn form_prefills_from_task() {
    let task = Task {
        id: 1,
        title: "Essay".to_owned(),
        description: Some("500 words".to_owned()),
        created_at: "2025-04-01T09:00:00".to_owned(),
        due_date: Some("2025-05-01T14:30:00".to_owned()),
        creator: None,
        assigned_to_users: Vec::new(),
    };
    let form = TaskForm::from_task(&task);
    assert_eq!(form.due_date, "2025-05-01T14:30");
    assert_eq!(form.payload().unwrap().due_date.as_deref(), Some("2025-05-01T14:30:00"));
}
