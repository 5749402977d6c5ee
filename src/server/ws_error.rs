/// Centralized helpers for WebSocket error frames.
///
/// Use these helpers to ensure all error messages are consistent, explicit, and include a code and context.
use serde_json::json;

/// Formats a WebSocket error message as a JSON string.
///
/// # Arguments
/// - `code`: Unique error code (e.g. "INVALID_INTENT").
/// - `message`: Human-readable error message (in English).
/// - `context`: Optional context (e.g. the parse error, the session id).
pub fn ws_error_message(code: &str, message: &str, context: Option<&str>) -> String {
    json!({
        "action": "Error",
        "data": {
            "code": code,
            "message": message,
            "context": context,
        }
    })
    .to_string()
}

/// Returns a WebSocket message for a connection banned by the flood guard.
pub fn ws_banned_message(ban_remaining_secs: u64, context: Option<&str>) -> String {
    ws_error_message(
        "BANNED",
        &format!("Too many messages. Try again in {} seconds.", ban_remaining_secs),
        context,
    )
}
