//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` is the single app-wide state container; `guard` holds the route
//! access decisions derived from it; `remote` is the per-page load state
//! for fetched data.

pub mod guard;
pub mod remote;
pub mod session;
