//! Networking modules for the backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` is the browser HTTP seam, `api` owns URL joining, bearer
//! attachment and status mapping, `resources` adds typed endpoints per
//! feature area, and `types` defines the wire schema.

pub mod api;
pub mod error;
pub mod resources;
pub mod transport;
pub mod types;
