//! Wire DTOs for the backend REST API.
//!
//! DESIGN
//! ======
//! Field names follow the JSON the backend emits (its "tests" are called
//! quizzes here to avoid clashing with Rust test vocabulary). Optional or
//! role-dependent fields default rather than fail so one payload shape
//! serves every role.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_TEACHER: &str = "teacher";
pub const ROLE_STUDENT: &str = "student";

// =============================================================================
// USERS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
}

/// The signed-in user as returned by login and whoami.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
}

impl User {
    pub fn has_role(&self, name: &str) -> bool {
        self.role.name == name
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    /// Teachers and admins may author content.
    pub fn is_staff(&self) -> bool {
        self.is_admin() || self.has_role(ROLE_TEACHER)
    }

    /// Whether edit/delete controls should be offered for an item created by
    /// `owner`. Mirrors the backend rule: admins, or staff who created it.
    pub fn can_manage(&self, owner: Option<&UserSummary>) -> bool {
        self.is_admin() || (self.is_staff() && owner.is_some_and(|o| o.id == self.id))
    }
}

/// Author/creator reference nested inside other resources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegistrationPayload {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// `POST /login` body: the token alongside the user fields.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(flatten)]
    pub user: User,
}

/// `GET /protected` body.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct WhoAmI {
    pub logged_in_as: User,
}

/// Plain acknowledgement such as `{"msg": "Book deleted"}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub msg: String,
}

// =============================================================================
// LIBRARY, TASKS, NEWS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub created_by: Option<UserSummary>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BookPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub creator: Option<UserSummary>,
    #[serde(default)]
    pub assigned_to_users: Vec<UserSummary>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TaskPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `YYYY-MM-DDTHH:MM:SS`; `null` clears the due date.
    pub due_date: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: String,
    #[serde(default)]
    pub author: Option<UserSummary>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NewsPayload {
    pub title: String,
    pub content: String,
}

// =============================================================================
// QUIZZES
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    #[default]
    SingleChoice,
    MultipleChoice,
    TextInput,
}

impl QuestionKind {
    pub const ALL: [Self; 3] = [Self::SingleChoice, Self::MultipleChoice, Self::TextInput];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SingleChoice => "single_choice",
            Self::MultipleChoice => "multiple_choice",
            Self::TextInput => "text_input",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SingleChoice => "Single choice",
            Self::MultipleChoice => "Multiple choice",
            Self::TextInput => "Text input",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == raw)
    }

    pub fn has_options(self) -> bool {
        !matches!(self, Self::TextInput)
    }
}

/// A single answer or a set of option keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    One(String),
    Many(Vec<String>),
}

impl Answer {
    /// True when nothing meaningful was entered or selected.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::One(text) => text.trim().is_empty(),
            Self::Many(keys) => keys.is_empty(),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One(text) => f.write_str(text),
            Self::Many(keys) => f.write_str(&keys.join(", ")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub test_id: i64,
    pub content: String,
    #[serde(default)]
    pub options: Option<BTreeMap<String, String>>,
    /// Stripped by the backend for students.
    #[serde(default)]
    pub correct_answer: Option<Answer>,
    #[serde(default)]
    pub question_type: QuestionKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionPayload {
    pub content: String,
    pub options: Option<BTreeMap<String, String>>,
    pub correct_answer: Answer,
    pub question_type: QuestionKind,
}

/// A quiz; the backend calls these "tests".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub created_by: Option<UserSummary>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QuizPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Answers keyed by question id rendered as a string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub answers: BTreeMap<String, Answer>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A graded attempt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: i64,
    pub user_id: i64,
    pub test_id: i64,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub max_score: Option<i64>,
    pub taken_at: String,
    #[serde(default)]
    pub answers_submitted: Option<serde_json::Value>,
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde(default)]
    pub test: Option<QuizSummary>,
}

impl QuizResult {
    /// Score as a whole percentage, when both numbers are known and the quiz
    /// had questions.
    pub fn percent(&self) -> Option<i64> {
        match (self.score, self.max_score) {
            (Some(score), Some(max)) if max > 0 => Some((score * 100 + max / 2) / max),
            _ => None,
        }
    }

    /// `score/max` text, `-` for unknown parts.
    pub fn score_label(&self) -> String {
        let part = |v: Option<i64>| v.map_or_else(|| "-".to_owned(), |n| n.to_string());
        format!("{}/{}", part(self.score), part(self.max_score))
    }
}

// =============================================================================
// NOTIFICATIONS & CHAT
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotificationId {
    Number(i64),
    Text(String),
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Task,
    TestResult,
    News,
    #[default]
    #[serde(other)]
    General,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}
