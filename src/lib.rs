//! # campus
//!
//! Leptos + WASM client for the campus learning portal: library, tasks,
//! news, quizzes, an assistant chat and notifications on top of the
//! portal's REST backend.
//!
//! The session, API gateway and route guard are plain Rust behind small
//! traits (`Transport`, `TokenStore`, `Navigator`) so they are tested
//! natively; the browser implementations are compiled with the `csr`
//! feature.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

/// WASM entry point: logging, panic hook, then mount.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
