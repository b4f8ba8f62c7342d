//! Blocking browser confirmation prompt.

/// Ask the user to confirm a destructive action. Native builds have no one
/// to ask and always confirm.
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window().and_then(|w| w.confirm_with_message(message).ok()).unwrap_or(false)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = message;
        true
    }
}
