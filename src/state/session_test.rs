use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::test_support::{MemoryTokens, RecordingNavigator, ScriptedTransport, session, user, user_json};

fn alice() -> Credentials {
    Credentials { username: "alice".to_owned(), password: "secret".to_owned() }
}

fn login_reply(transport: &ScriptedTransport, token: &str, username: &str, role: &str) {
    let mut body = user_json(username, role);
    body["access_token"] = json!(token);
    transport.reply(200, body);
}

fn assert_invariant(state: &SessionState) {
    assert_eq!(state.is_authenticated(), !state.is_loading() && state.token().is_some() && state.user().is_some());
    assert_eq!(state.token().is_some(), state.user().is_some(), "user and token travel together");
}

// =============================================================================
// SessionState
// =============================================================================

#[test]
fn default_state_is_loading_and_not_authenticated() {
    let state = SessionState::default();
    assert!(state.is_loading());
    assert!(!state.is_authenticated());
    assert_invariant(&state);
}

#[test]
fn signed_in_state_is_authenticated() {
    let state = SessionState::signed_in(user("alice", "teacher"), "tok".to_owned());
    assert!(state.is_authenticated());
    assert_eq!(state.token(), Some("tok"));
    assert_eq!(state.user().map(|u| u.username.as_str()), Some("alice"));
}

#[test]
fn anonymous_state_is_settled() {
    let state = SessionState::anonymous();
    assert!(!state.is_loading());
    assert!(!state.is_authenticated());
}

// =============================================================================
// restore
// =============================================================================

#[test]
fn restore_without_token_settles_without_request() {
    let transport = ScriptedTransport::default();
    let session = session(&transport, &MemoryTokens::default());

    block_on(session.restore());

    assert_eq!(session.snapshot(), SessionState::anonymous());
    assert!(transport.sent().is_empty());
}

#[test]
fn restore_with_valid_token_signs_in() {
    let transport = ScriptedTransport::default();
    transport.reply(200, json!({ "logged_in_as": user_json("alice", "teacher") }));
    let tokens = MemoryTokens::with("tok123");
    let session = session(&transport, &tokens);

    block_on(session.restore());

    let state = session.snapshot();
    assert!(state.is_authenticated());
    assert_eq!(state.token(), Some("tok123"));
    assert_eq!(state.user().map(|u| u.role.name.as_str()), Some("teacher"));
    assert_invariant(&state);
}

#[test]
fn restore_with_rejected_token_clears_storage() {
    let transport = ScriptedTransport::default();
    transport.reply(401, json!({ "msg": "Token has expired" }));
    let tokens = MemoryTokens::with("stale");
    let session = session(&transport, &tokens);

    block_on(session.restore());

    assert_eq!(tokens.current(), None);
    assert_eq!(session.snapshot(), SessionState::anonymous());
}

#[test]
fn restore_treats_any_failure_as_signed_out() {
    let transport = ScriptedTransport::default();
    transport.fail(ApiError::Network("offline".to_owned()));
    let tokens = MemoryTokens::with("tok");
    let session = session(&transport, &tokens);

    block_on(session.restore());

    assert_eq!(tokens.current(), None);
    assert!(!session.snapshot().is_loading());
    assert!(!session.is_authenticated());
}

#[test]
fn restore_runs_once_per_session() {
    let transport = ScriptedTransport::default();
    transport.reply(200, json!({ "logged_in_as": user_json("alice", "teacher") }));
    let session = session(&transport, &MemoryTokens::with("tok"));

    block_on(session.restore());
    block_on(session.clone().restore());

    assert_eq!(transport.sent().len(), 1);
}

// =============================================================================
// login / register / logout
// =============================================================================

#[test]
fn login_stores_token_sets_user_and_goes_home() {
    let transport = ScriptedTransport::default();
    login_reply(&transport, "tok123", "alice", "teacher");
    let tokens = MemoryTokens::default();
    let session = session(&transport, &tokens);
    block_on(session.restore());
    let nav = RecordingNavigator::at("/login");

    let signed_in = block_on(session.login(&alice(), &nav)).unwrap();

    assert_eq!(signed_in.username, "alice");
    assert_eq!(tokens.current().as_deref(), Some("tok123"));
    let state = session.snapshot();
    assert!(state.is_authenticated());
    assert_eq!(state.token(), Some("tok123"));
    assert_invariant(&state);
    assert_eq!(nav.calls(), vec!["/".to_owned()]);
    assert_eq!(transport.sent()[0].body, Some(json!({ "username": "alice", "password": "secret" })));
}

#[test]
fn login_follows_redirect_query() {
    let transport = ScriptedTransport::default();
    login_reply(&transport, "tok123", "alice", "teacher");
    let session = session(&transport, &MemoryTokens::default());
    let nav = RecordingNavigator::at("/login?redirect=%2Ftasks");

    block_on(session.login(&alice(), &nav)).unwrap();

    assert_eq!(nav.calls(), vec!["/tasks".to_owned()]);
}

#[test]
fn login_ignores_external_redirect() {
    let transport = ScriptedTransport::default();
    login_reply(&transport, "tok123", "alice", "teacher");
    let session = session(&transport, &MemoryTokens::default());
    let nav = RecordingNavigator::at("/login?redirect=https%3A%2F%2Fevil.example");

    block_on(session.login(&alice(), &nav)).unwrap();

    assert_eq!(nav.calls(), vec!["/".to_owned()]);
}

#[test]
fn failed_login_leaves_session_untouched() {
    let transport = ScriptedTransport::default();
    transport.reply(401, json!({ "msg": "Bad username or password" }));
    let tokens = MemoryTokens::default();
    let session = session(&transport, &tokens);
    block_on(session.restore());
    let before = session.snapshot();
    let nav = RecordingNavigator::at("/login");

    let err = block_on(session.login(&alice(), &nav)).unwrap_err();

    assert_eq!(err.user_message(), "Bad username or password");
    assert_eq!(session.snapshot(), before);
    assert_eq!(tokens.current(), None);
    assert!(nav.calls().is_empty());
}

#[test]
fn register_does_not_sign_in() {
    let transport = ScriptedTransport::default();
    transport.reply(201, user_json("bob", "student"));
    let tokens = MemoryTokens::default();
    let session = session(&transport, &tokens);
    block_on(session.restore());
    let nav = RecordingNavigator::at("/register");

    let payload = RegistrationPayload {
        username: "bob".to_owned(),
        email: "bob@example.com".to_owned(),
        password: "password1".to_owned(),
        role: "student".to_owned(),
    };
    block_on(session.register(&payload, &nav)).unwrap();

    assert!(!session.is_authenticated());
    assert_eq!(tokens.current(), None);
    assert_eq!(nav.calls(), vec![REGISTERED_PATH.to_owned()]);
}

#[test]
fn failed_register_propagates_without_navigation() {
    let transport = ScriptedTransport::default();
    transport.reply(400, json!({ "msg": "Username already exists" }));
    let session = session(&transport, &MemoryTokens::default());
    let nav = RecordingNavigator::at("/register");

    let payload = RegistrationPayload {
        username: "bob".to_owned(),
        email: "bob@example.com".to_owned(),
        password: "password1".to_owned(),
        role: "student".to_owned(),
    };
    let err = block_on(session.register(&payload, &nav)).unwrap_err();

    assert_eq!(err, ApiError::Invalid("Username already exists".to_owned()));
    assert!(nav.calls().is_empty());
}

#[test]
fn logout_clears_and_navigates_to_login() {
    let transport = ScriptedTransport::default();
    transport.reply(200, json!({ "logged_in_as": user_json("alice", "teacher") }));
    let tokens = MemoryTokens::with("tok123");
    let session = session(&transport, &tokens);
    block_on(session.restore());
    let nav = RecordingNavigator::at("/tasks");

    session.logout(&nav);

    assert_eq!(session.snapshot(), SessionState::anonymous());
    assert_eq!(tokens.current(), None);
    assert_eq!(nav.calls(), vec![LOGIN_PATH.to_owned()]);
}

#[test]
fn logout_on_login_page_does_not_navigate() {
    let session = session(&ScriptedTransport::default(), &MemoryTokens::with("tok"));
    let nav = RecordingNavigator::at("/login?redirect=%2Ftasks");

    session.logout(&nav);

    assert!(nav.calls().is_empty());
    assert!(!session.is_authenticated());
}

// =============================================================================
// fetch_current_user / expire / absorb
// =============================================================================

#[test]
fn fetch_current_user_keeps_session_on_server_error() {
    let transport = ScriptedTransport::default();
    transport
        .reply(200, json!({ "logged_in_as": user_json("alice", "teacher") }))
        .reply(500, json!({ "msg": "boom" }));
    let tokens = MemoryTokens::with("tok");
    let session = session(&transport, &tokens);
    block_on(session.restore());

    let err = block_on(session.fetch_current_user()).unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(session.is_authenticated());
    assert_eq!(tokens.current().as_deref(), Some("tok"));
}

#[test]
fn fetch_current_user_clears_on_auth_failure() {
    let transport = ScriptedTransport::default();
    transport
        .reply(200, json!({ "logged_in_as": user_json("alice", "teacher") }))
        .reply(422, json!({ "msg": "Signature verification failed" }));
    let tokens = MemoryTokens::with("tok");
    let session = session(&transport, &tokens);
    block_on(session.restore());

    assert!(block_on(session.fetch_current_user()).is_err());

    assert!(!session.is_authenticated());
    assert_eq!(tokens.current(), None);
}

#[test]
fn fetch_current_user_without_token_signs_out() {
    let transport = ScriptedTransport::default();
    let session = session(&transport, &MemoryTokens::default());

    assert_eq!(block_on(session.fetch_current_user()), Ok(None));

    assert_eq!(session.snapshot(), SessionState::anonymous());
    assert!(transport.sent().is_empty());
}

#[test]
fn absorb_expires_session_on_auth_failure() {
    let transport = ScriptedTransport::default();
    transport.reply(200, json!({ "logged_in_as": user_json("alice", "student") }));
    let tokens = MemoryTokens::with("tok");
    let session = session(&transport, &tokens);
    block_on(session.restore());

    let message = session.absorb(&ApiError::Unauthenticated("Token has expired".to_owned()));

    assert_eq!(message, "Token has expired");
    assert!(!session.is_authenticated());
    assert_eq!(tokens.current(), None);
    assert_invariant(&session.snapshot());
}

#[test]
fn absorb_keeps_session_for_other_errors() {
    let transport = ScriptedTransport::default();
    transport.reply(200, json!({ "logged_in_as": user_json("alice", "student") }));
    let session = session(&transport, &MemoryTokens::with("tok"));
    block_on(session.restore());

    let message = session.absorb(&ApiError::Forbidden("Permission denied".to_owned()));

    assert_eq!(message, "Permission denied");
    assert!(session.is_authenticated());
}
