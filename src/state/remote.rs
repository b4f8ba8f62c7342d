//! Load state for data a page fetches from the backend.
//!
//! DESIGN
//! ======
//! Pages keep a `RwSignal<Remote<T>>` per fetched list or item, mirroring the
//! `items`/`loading`/`error` triple without allowing contradictory combos.

#[cfg(test)]
#[path = "remote_test.rs"]
mod remote_test;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Remote<T> {
    #[default]
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Remote<T> {
    pub fn from_result(result: Result<T, String>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(message) => Self::Failed(message),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Remote<Vec<T>> {
    /// Drop one item from a loaded list, e.g. after a successful delete.
    pub fn remove_where(&mut self, pred: impl Fn(&T) -> bool) {
        if let Self::Ready(items) = self {
            items.retain(|item| !pred(item));
        }
    }
}
