use super::*;
use crate::test_support::{RecordingNavigator, user};

fn signed_in(role: &str) -> SessionState {
    SessionState::signed_in(user("alice", role), "tok".to_owned())
}

// =============================================================
// evaluate
// =============================================================

#[test]
fn loading_never_renders_or_redirects() {
    let outcome = evaluate(&SessionState::default(), STAFF, "/books/create");
    assert_eq!(outcome, GuardOutcome::Loading);
    assert!(!outcome.renders_page());
    assert_eq!(outcome.redirect_target(), None);
    assert_eq!(outcome.placeholder(), "Loading authentication status...");
}

#[test]
fn anonymous_visit_redirects_to_login_with_origin() {
    let outcome = evaluate(&SessionState::anonymous(), ANY_ROLE, "/tasks");
    assert_eq!(outcome, GuardOutcome::Unauthenticated { redirect_to: "/login?redirect=%2Ftasks".to_owned() });
    assert_eq!(outcome.placeholder(), "Redirecting to login...");
}

#[test]
fn origin_query_is_kept_in_redirect() {
    let outcome = evaluate(&SessionState::anonymous(), ANY_ROLE, "/tests/details/3?tab=results");
    assert_eq!(outcome.redirect_target(), Some("/login?redirect=%2Ftests%2Fdetails%2F3%3Ftab%3Dresults"));
}

#[test]
fn empty_role_list_admits_any_user() {
    assert_eq!(evaluate(&signed_in("student"), ANY_ROLE, "/tasks"), GuardOutcome::Authorized);
    assert_eq!(evaluate(&signed_in("admin"), ANY_ROLE, "/tasks"), GuardOutcome::Authorized);
}

#[test]
fn student_on_staff_page_is_unauthorized() {
    let outcome = evaluate(&signed_in("student"), STAFF, "/books/create");
    assert_eq!(outcome, GuardOutcome::Unauthorized);
    assert_eq!(outcome.redirect_target(), Some("/unauthorized"));
    assert_eq!(outcome.placeholder(), "Access denied. Redirecting...");
}

#[test]
fn staff_roles_match_admins_and_teachers() {
    assert!(evaluate(&signed_in("teacher"), STAFF, "/news/create").renders_page());
    assert!(evaluate(&signed_in("admin"), STAFF, "/news/create").renders_page());
    assert_eq!(evaluate(&signed_in("teacher"), STUDENTS, "/tests/take/1"), GuardOutcome::Unauthorized);
}

// =============================================================
// Redirector
// =============================================================

#[test]
fn anonymous_visit_issues_exactly_one_redirect() {
    // Router still on /tasks while the navigation is pending.
    let nav = RecordingNavigator::pending_at("/tasks");
    let mut redirector = Redirector::default();
    let outcome = evaluate(&SessionState::anonymous(), ANY_ROLE, &nav.location());

    assert!(redirector.enforce(&outcome, &nav));
    assert!(!redirector.enforce(&outcome, &nav));
    assert!(!redirector.enforce(&outcome, &nav));

    assert_eq!(nav.calls(), vec!["/login?redirect=%2Ftasks".to_owned()]);
}

#[test]
fn loading_then_settled_redirects_once() {
    let nav = RecordingNavigator::pending_at("/tasks");
    let mut redirector = Redirector::default();

    assert!(!redirector.enforce(&evaluate(&SessionState::default(), ANY_ROLE, "/tasks"), &nav));
    assert!(nav.calls().is_empty());

    let settled = evaluate(&SessionState::anonymous(), ANY_ROLE, "/tasks");
    redirector.enforce(&settled, &nav);
    redirector.enforce(&settled, &nav);

    assert_eq!(nav.calls().len(), 1);
}

#[test]
fn no_redirect_when_already_at_target() {
    let nav = RecordingNavigator::at("/unauthorized");
    let mut redirector = Redirector::default();

    assert!(!redirector.enforce(&GuardOutcome::Unauthorized, &nav));
    assert!(nav.calls().is_empty());
}

#[test]
fn student_on_staff_page_redirects_to_unauthorized() {
    let nav = RecordingNavigator::at("/tasks/create");
    let mut redirector = Redirector::default();
    let outcome = evaluate(&signed_in("student"), STAFF, &nav.location());

    redirector.enforce(&outcome, &nav);

    assert_eq!(nav.calls(), vec!["/unauthorized".to_owned()]);
}

#[test]
fn authorized_outcome_never_navigates() {
    let nav = RecordingNavigator::at("/tasks");
    let mut redirector = Redirector::default();

    assert!(!redirector.enforce(&evaluate(&signed_in("student"), ANY_ROLE, "/tasks"), &nav));
    assert!(nav.calls().is_empty());
}
