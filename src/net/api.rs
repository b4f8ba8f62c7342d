//! REST gateway to the campus backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every backend call in the client goes through `ApiClient`. It joins paths
//! onto the configured base URL, attaches the stored bearer token to each
//! request, encodes/decodes JSON, and classifies non-2xx responses into
//! `ApiError`. It never clears the session itself.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::transport::{ApiRequest, BrowserTransport, Method, Transport};
use super::types::{AuthResponse, Credentials, RegistrationPayload, User, WhoAmI};
use crate::config::ClientConfig;
use crate::util::storage::{LocalTokenStore, TokenStore};

#[derive(Debug, Clone)]
pub struct ApiClient<T = BrowserTransport, S = LocalTokenStore> {
    base_url: String,
    transport: T,
    tokens: S,
}

impl ApiClient {
    /// Client for the running browser, per `config`.
    pub fn browser(config: &ClientConfig) -> Self {
        Self::new(config.api_base_url.clone(), BrowserTransport, LocalTokenStore::new(config.token_key.clone()))
    }
}

impl<T: Transport, S: TokenStore> ApiClient<T, S> {
    pub fn new(base_url: impl Into<String>, transport: T, tokens: S) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_owned(), transport, tokens }
    }

    pub fn tokens(&self) -> &S {
        &self.tokens
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.execute(Method::Get, path, None).await
    }

    pub async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        self.execute(Method::Post, path, Some(encode(body)?)).await
    }

    pub async fn put<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        self.execute(Method::Put, path, Some(encode(body)?)).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.execute(Method::Delete, path, None).await
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<R, ApiError> {
        let request = ApiRequest { method, url: self.url(path), bearer: self.tokens.load(), body };
        log::debug!("api: {} {} (auth: {})", method.as_str(), request.url, request.bearer.is_some());

        let response = self.transport.send(request).await.inspect_err(|e| {
            log::warn!("api: {} {path} failed: {e}", method.as_str());
        })?;
        if !response.is_success() {
            let err = ApiError::from_status(response.status, &response.body);
            log::warn!("api: {} {path} -> {}: {err}", method.as_str(), response.status);
            return Err(err);
        }
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    /// `POST /login`.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.post("/login", credentials).await
    }

    /// `POST /register`. Returns the created user; does not sign in.
    pub async fn register(&self, payload: &RegistrationPayload) -> Result<User, ApiError> {
        self.post("/register", payload).await
    }

    /// `GET /protected`: the user the stored token belongs to.
    pub async fn whoami(&self) -> Result<User, ApiError> {
        let body: WhoAmI = self.get("/protected").await?;
        Ok(body.logged_in_as)
    }
}

fn encode<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))
}
