//! In-memory doubles for the transport, token store and navigator seams.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::transport::{ApiRequest, ApiResponse, Transport};
use crate::net::types::{Role, User};
use crate::state::session::Session;
use crate::util::nav::Navigator;
use crate::util::storage::TokenStore;

pub const BASE_URL: &str = "http://backend.test/api";

#[derive(Clone, Default)]
pub struct MemoryTokens(Rc<RefCell<Option<String>>>);

impl MemoryTokens {
    pub fn with(token: &str) -> Self {
        Self(Rc::new(RefCell::new(Some(token.to_owned()))))
    }

    pub fn current(&self) -> Option<String> {
        self.0.borrow().clone()
    }
}

impl TokenStore for MemoryTokens {
    fn load(&self) -> Option<String> {
        self.current()
    }

    fn save(&self, token: &str) {
        *self.0.borrow_mut() = Some(token.to_owned());
    }

    fn clear(&self) {
        *self.0.borrow_mut() = None;
    }
}

/// Answers requests from a queue and records what was sent.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    replies: Rc<RefCell<VecDeque<Result<ApiResponse, ApiError>>>>,
    sent: Rc<RefCell<Vec<ApiRequest>>>,
}

impl ScriptedTransport {
    pub fn reply(&self, status: u16, body: serde_json::Value) -> &Self {
        self.replies.borrow_mut().push_back(Ok(ApiResponse { status, body: body.to_string() }));
        self
    }

    pub fn fail(&self, error: ApiError) -> &Self {
        self.replies.borrow_mut().push_back(Err(error));
        self
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.sent.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted reply".to_owned())))
    }
}

/// Records navigations and, like a real router, moves to the new location.
#[derive(Default)]
pub struct RecordingNavigator {
    pathname: RefCell<String>,
    query: RefCell<String>,
    calls: RefCell<Vec<String>>,
    frozen: bool,
}

impl RecordingNavigator {
    pub fn at(location: &str) -> Self {
        let nav = Self::default();
        nav.move_to(location);
        nav
    }

    /// A navigator whose location never changes, like a router with a
    /// navigation still in flight.
    pub fn pending_at(location: &str) -> Self {
        Self { frozen: true, ..Self::at(location) }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn move_to(&self, location: &str) {
        let (path, query) = location.split_once('?').unwrap_or((location, ""));
        *self.pathname.borrow_mut() = path.to_owned();
        *self.query.borrow_mut() = query.to_owned();
    }
}

impl Navigator for RecordingNavigator {
    fn pathname(&self) -> String {
        self.pathname.borrow().clone()
    }

    fn query(&self) -> String {
        self.query.borrow().clone()
    }

    fn navigate(&self, to: &str) {
        self.calls.borrow_mut().push(to.to_owned());
        if !self.frozen {
            self.move_to(to);
        }
    }
}

pub fn user(username: &str, role: &str) -> User {
    User {
        id: 1,
        username: username.to_owned(),
        email: Some(format!("{username}@example.com")),
        role: Role { id: 2, name: role.to_owned() },
    }
}

pub fn user_json(username: &str, role: &str) -> serde_json::Value {
    serde_json::to_value(user(username, role)).unwrap()
}

pub fn client(transport: &ScriptedTransport, tokens: &MemoryTokens) -> ApiClient<ScriptedTransport, MemoryTokens> {
    ApiClient::new(BASE_URL, transport.clone(), tokens.clone())
}

pub fn session(transport: &ScriptedTransport, tokens: &MemoryTokens) -> Session<ScriptedTransport, MemoryTokens> {
    leptos::reactive::owner::Owner::new().set();
    Session::new(client(transport, tokens))
}
