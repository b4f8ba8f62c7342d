//! Client configuration baked in at build time.
//!
//! SYSTEM CONTEXT
//! ==============
//! A WASM bundle has no process environment at runtime, so the backend base
//! URL and the token storage key are read with `option_env!` when the crate
//! is compiled and validated once when `App` mounts.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";
pub const DEFAULT_TOKEN_KEY: &str = "authToken";

/// Errors produced while validating configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The API base URL is neither absolute http(s) nor a same-origin path.
    #[error("invalid CAMPUS_API_URL '{0}': expected http(s)://... or /path")]
    InvalidApiUrl(String),

    /// The token storage key is blank.
    #[error("CAMPUS_TOKEN_KEY must not be blank")]
    BlankTokenKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash.
    pub api_base_url: String,
    /// `localStorage` key holding the bearer token.
    pub token_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_base_url: DEFAULT_API_URL.to_owned(), token_key: DEFAULT_TOKEN_KEY.to_owned() }
    }
}

impl ClientConfig {
    /// Build config from the compile-time environment.
    ///
    /// Optional:
    /// - `CAMPUS_API_URL`: default `http://127.0.0.1:5000/api`
    /// - `CAMPUS_TOKEN_KEY`: default `authToken`
    ///
    /// Invalid values are logged and replaced by the defaults.
    pub fn from_build_env() -> Self {
        match Self::from_values(option_env!("CAMPUS_API_URL"), option_env!("CAMPUS_TOKEN_KEY")) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("config: {e}; falling back to defaults");
                Self::default()
            }
        }
    }

    /// Validate and normalise raw configuration values. Empty values count
    /// as unset.
    pub fn from_values(api_url: Option<&str>, token_key: Option<&str>) -> Result<Self, ConfigError> {
        let api_base_url = parse_api_url(api_url)?;
        let token_key = match token_key {
            None | Some("") => DEFAULT_TOKEN_KEY.to_owned(),
            Some(raw) if raw.trim().is_empty() => return Err(ConfigError::BlankTokenKey),
            Some(raw) => raw.trim().to_owned(),
        };
        Ok(Self { api_base_url, token_key })
    }
}

fn parse_api_url(raw: Option<&str>) -> Result<String, ConfigError> {
    let value = raw.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(DEFAULT_API_URL);
    let absolute = value.starts_with("http://") || value.starts_with("https://");
    let same_origin = value.starts_with('/') && !value.starts_with("//");
    if !absolute && !same_origin {
        return Err(ConfigError::InvalidApiUrl(value.to_owned()));
    }
    Ok(value.trim_end_matches('/').to_owned())
}
