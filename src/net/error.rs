//! Typed failures for backend calls.
//!
//! ERROR HANDLING
//! ==============
//! The gateway never interprets status codes beyond classifying them. The
//! session holder reacts to authentication failures; everything else is
//! rendered inline by the page that made the call.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

/// Errors produced by API client operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// Missing, expired or malformed bearer token (401, or 422 from the JWT layer).
    #[error("{0}")]
    Unauthenticated(String),

    /// Valid session without the privileges the endpoint requires (403).
    #[error("{0}")]
    Forbidden(String),

    /// Rejected input, either by the backend (400) or before submission.
    #[error("{0}")]
    Invalid(String),

    /// The requested resource does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// The request body could not be serialized.
    #[error("could not encode request: {0}")]
    Encode(String),

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Error bodies carry their text under one of these keys depending on the
/// endpoint (`msg` for most routes, `reply` for the chatbot).
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    reply: Option<String>,
}

impl ApiError {
    /// Classify a non-success response.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = backend_message(body);
        match status {
            401 | 422 => Self::Unauthenticated(message.unwrap_or_else(|| "Your session has expired. Please log in again.".to_owned())),
            403 => Self::Forbidden(message.unwrap_or_else(|| "Permission denied.".to_owned())),
            400 => Self::Invalid(message.unwrap_or_else(|| "The request was rejected.".to_owned())),
            404 => Self::NotFound(message.unwrap_or_else(|| "Not found.".to_owned())),
            _ => Self::Server { status, message: message.unwrap_or_else(|| "Unexpected server error.".to_owned()) },
        }
    }

    /// Whether the stored token should be discarded.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthenticated(_))
    }

    /// HTTP status behind this error, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthenticated(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::Invalid(_) => Some(400),
            Self::NotFound(_) => Some(404),
            Self::Server { status, .. } => Some(*status),
            Self::Network(_) | Self::Encode(_) | Self::Decode(_) => None,
        }
    }

    /// Human-readable text for inline display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Could not reach the server. Check your connection and try again.".to_owned(),
            Self::Encode(_) => "The form could not be sent.".to_owned(),
            Self::Decode(_) => "The server sent an unexpected response.".to_owned(),
            Self::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

fn backend_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed.msg.or(parsed.message).or(parsed.reply).map(|m| m.trim().to_owned()).filter(|m| !m.is_empty())
}
