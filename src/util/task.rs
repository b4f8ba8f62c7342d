//! Fire-and-forget async work from event handlers.

use std::future::Future;

/// Run `fut` on the browser's microtask queue. Native builds have no
/// executor for UI work, so the future is dropped unpolled there.
pub fn spawn_ui<F>(fut: F)
where
    F: Future<Output = ()> + 'static,
{
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(fut);
    #[cfg(not(feature = "csr"))]
    drop(fut);
}
