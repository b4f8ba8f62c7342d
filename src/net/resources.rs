//! Typed CRUD endpoints for the feature areas.
//!
//! DESIGN
//! ======
//! Books, tasks, news and quizzes share one REST shape
//! (`/{collection}` and `/{collection}/{id}`), so they go through the
//! `Resource` trait. Quiz questions, submissions, results, notifications
//! and the chatbot have bespoke endpoints below.

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api::ApiClient;
use super::error::ApiError;
use super::transport::Transport;
use super::types::{
    Ack, Book, BookPayload, ChatReply, ChatRequest, NewsItem, NewsPayload, Notification, Question, QuestionPayload,
    Quiz, QuizPayload, QuizResult, Submission, Task, TaskPayload,
};
use crate::util::storage::TokenStore;

/// A collection exposed as `GET/POST {COLLECTION}` and
/// `GET/PUT/DELETE {COLLECTION}/{id}`.
pub trait Resource: DeserializeOwned {
    const COLLECTION: &'static str;
    type Payload: Serialize;

    fn item_path(id: i64) -> String {
        format!("{}/{id}", Self::COLLECTION)
    }
}

impl Resource for Book {
    const COLLECTION: &'static str = "/books";
    type Payload = BookPayload;
}

impl Resource for Task {
    const COLLECTION: &'static str = "/tasks";
    type Payload = TaskPayload;
}

impl Resource for NewsItem {
    const COLLECTION: &'static str = "/news";
    type Payload = NewsPayload;
}

impl Resource for Quiz {
    const COLLECTION: &'static str = "/tests";
    type Payload = QuizPayload;
}

fn questions_path(quiz_id: i64) -> String {
    format!("{}/questions", Quiz::item_path(quiz_id))
}

fn question_path(quiz_id: i64, question_id: i64) -> String {
    format!("{}/{question_id}", questions_path(quiz_id))
}

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        self.get(R::COLLECTION).await
    }

    pub async fn fetch<R: Resource>(&self, id: i64) -> Result<R, ApiError> {
        self.get(&R::item_path(id)).await
    }

    pub async fn create<R: Resource>(&self, payload: &R::Payload) -> Result<R, ApiError> {
        self.post(R::COLLECTION, payload).await
    }

    pub async fn update<R: Resource>(&self, id: i64, payload: &R::Payload) -> Result<R, ApiError> {
        self.put(&R::item_path(id), payload).await
    }

    pub async fn remove<R: Resource>(&self, id: i64) -> Result<Ack, ApiError> {
        self.delete(&R::item_path(id)).await
    }

    // =========================================================================
    // QUIZZES
    // =========================================================================

    /// Questions of a quiz. Students get them without answer keys.
    pub async fn questions(&self, quiz_id: i64) -> Result<Vec<Question>, ApiError> {
        self.get(&questions_path(quiz_id)).await
    }

    pub async fn add_question(&self, quiz_id: i64, payload: &QuestionPayload) -> Result<Question, ApiError> {
        self.post(&questions_path(quiz_id), payload).await
    }

    pub async fn update_question(
        &self,
        quiz_id: i64,
        question_id: i64,
        payload: &QuestionPayload,
    ) -> Result<Question, ApiError> {
        self.put(&question_path(quiz_id, question_id), payload).await
    }

    pub async fn remove_question(&self, quiz_id: i64, question_id: i64) -> Result<Ack, ApiError> {
        self.delete(&question_path(quiz_id, question_id)).await
    }

    /// Submit answers; the backend grades them and returns the attempt.
    pub async fn submit_answers(&self, quiz_id: i64, submission: &Submission) -> Result<QuizResult, ApiError> {
        self.post(&format!("{}/submit", Quiz::item_path(quiz_id)), submission).await
    }

    /// Attempts visible to the current user (their own, or all for staff).
    pub async fn my_results(&self) -> Result<Vec<QuizResult>, ApiError> {
        self.get("/test_results").await
    }

    /// Every attempt at one quiz. Staff only.
    pub async fn quiz_results(&self, quiz_id: i64) -> Result<Vec<QuizResult>, ApiError> {
        self.get(&format!("{}/results", Quiz::item_path(quiz_id))).await
    }

    // =========================================================================
    // NOTIFICATIONS & CHATBOT
    // =========================================================================

    pub async fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.get("/notifications").await
    }

    pub async fn ask_chatbot(&self, message: &str) -> Result<String, ApiError> {
        let reply: ChatReply = self.post("/chatbot/ask", &ChatRequest { message: message.to_owned() }).await?;
        Ok(reply.reply)
    }
}
