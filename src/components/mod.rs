//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read shared session state from Leptos context; pages compose
//! them.

pub mod access_guard;
pub mod navbar;
