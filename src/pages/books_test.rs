use super::*;

fn book() -> Book {
    Book { id: 4, title: "SICP".to_owned(), author: None, file_url: Some("/files/sicp.pdf".to_owned()), created_by: None }
}

#[test]
fn payload_requires_title() {
    let form = BookForm { title: "   ".to_owned(), ..BookForm::default() };
    assert_eq!(form.payload(), Err("Title is required"));
}

#[test]
fn payload_drops_blank_optional_fields() {
    let form = BookForm { title: " TAOCP ".to_owned(), author: "  ".to_owned(), file_url: "https://x.test/a.pdf".to_owned() };
    assert_eq!(
        form.payload(),
        Ok(BookPayload { title: "TAOCP".to_owned(), author: None, file_url: Some("https://x.test/a.pdf".to_owned()) })
    );
}

#[test]
fn form_prefills_from_book() {
    let form = BookForm::from_book(&book());
    assert_eq!(form.title, "SICP");
    assert_eq!(form.author, "");
    assert_eq!(form.file_url, "/files/sicp.pdf");
}

#[test]
fn prefilled_form_round_trips_to_payload() {
    let payload = BookForm::from_book(&book()).payload().unwrap();
    assert_eq!(serde_json::to_value(payload).unwrap(), serde_json::json!({ "title": "SICP", "file_url": "/files/sicp.pdf" }));
}
