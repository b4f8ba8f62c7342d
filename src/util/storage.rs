//! Durable bearer-token storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token is the only state that survives a reload. `LocalTokenStore`
//! centralizes the csr-only `localStorage` glue; native builds see an empty
//! store so session restore always takes the "no token" path there.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

/// Read/write access to the persisted bearer token.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Token store backed by `window.localStorage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalTokenStore {
    key: String,
}

impl LocalTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            let raw = local_storage()?.get_item(&self.key).ok().flatten()?;
            normalize_token(&raw)
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn save(&self, token: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = local_storage() else {
                log::warn!("storage: localStorage unavailable; token not persisted");
                return;
            };
            if storage.set_item(&self.key, token).is_err() {
                log::warn!("storage: failed to persist token under {}", self.key);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = local_storage() else {
                log::warn!("storage: localStorage unavailable; token not cleared");
                return;
            };
            report_removal(&self.key, storage.remove_item(&self.key));
        }
    }
}

/// Log a failed token removal; a token left behind restores the session on
/// the next reload. Returns whether the removal succeeded.
#[cfg_attr(not(feature = "csr"), allow(dead_code))]
fn report_removal<E: std::fmt::Debug>(key: &str, result: Result<(), E>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("storage: failed to clear token under {key}: {e:?}");
            false
        }
    }
}

/// Treat blank stored values as absent.
pub fn normalize_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
