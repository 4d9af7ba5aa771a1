//! Error-channel inspection
//!
//! The client pattern-matches on the unauthenticated family of error codes to
//! trigger navigation to the login view. Every other error is left for the
//! rendering layer to present.

use serde_json::Value;

/// Error codes that mean the caller has no valid session
const UNAUTHENTICATED_CODES: &[&str] = &["NOT_AUTHENTICATED", "INVALID_TOKEN", "TOKEN_EXPIRED"];

/// Navigation the error channel asks the host UI to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// The session is gone; send the user to the login view
    RedirectToLogin,
}

/// Inspect an API error body for the unauthenticated signal.
///
/// Expects the server's error envelope `{"error": {"code", "message", ...}}`
/// but falls back to matching the message text, so a proxy that rewrites the
/// body does not silently swallow the signal.
pub fn inspect_error(body: &Value) -> Option<SessionAction> {
    let detail = body.get("error").unwrap_or(body);

    if let Some(code) = detail.get("code").and_then(Value::as_str) {
        if UNAUTHENTICATED_CODES.contains(&code) {
            return Some(SessionAction::RedirectToLogin);
        }
    }

    if let Some(message) = detail.get("message").and_then(Value::as_str) {
        if message.to_lowercase().contains("not authenticated") {
            return Some(SessionAction::RedirectToLogin);
        }
    }

    None
}
