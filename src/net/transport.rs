//! HTTP transport seam between the API client and the browser.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds: `BrowserTransport` fails every request with a network
//! error, since these endpoints are only meaningful in the browser. Tests
//! substitute their own `Transport`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use super::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully resolved outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Bearer token to attach, read from storage when the request was built.
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// Raw response: status plus the unparsed body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns whatever the server answered. Only
/// failures to obtain a response are errors here; status handling belongs to
/// `ApiClient`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// `Authorization` header value for a token.
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Transport backed by the browser `fetch` API.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTransport;

impl Transport for BrowserTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;

            let mut builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
                Method::Put => Request::put(&request.url),
                Method::Delete => Request::delete(&request.url),
            }
            .header("Accept", "application/json");
            if let Some(token) = &request.bearer {
                builder = builder.header("Authorization", &bearer_header(token));
            }

            let sent = match &request.body {
                Some(body) => builder.json(body).map_err(|e| ApiError::Network(e.to_string()))?.send().await,
                None => builder.send().await,
            };
            let resp = sent.map_err(|e| ApiError::Network(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
            Ok(ApiResponse { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(ApiError::Network("not available outside the browser".to_owned()))
        }
    }
}
