//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, routing,
//! task spawning) from page and component logic.

pub mod dialog;
pub mod nav;
pub mod storage;
pub mod task;
