//! The preferences endpoint: validate a JSON body and answer with a
//! `Set-Cookie` for the new preferences.

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use paint_common::UiPreferences;
use paint_cookie::MAX_PREFS_STACK;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error};

use crate::kit_server::UiKitServer;

pub const DEFAULT_MAX_STACK: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferencesError {
    #[error("Invalid JSON")]
    InvalidJson,

    #[error("Expected {{ stack: string[], theme: string, layout: string }}")]
    Shape,

    #[error("Stack too large")]
    StackTooLarge,

    #[error("Preference ids must be non-empty strings")]
    EmptyId,
}

fn trimmed_str(v: Option<&Value>) -> Option<&str> {
    v.and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Validate a decoded request body.
///
/// Theme and layout are trimmed; stack entries are kept as sent.
/// `max_stack` is capped at what the preferences cookie can carry.
pub fn parse_ui_preferences_json(
    body: &Value,
    max_stack: usize,
) -> Result<UiPreferences, PreferencesError> {
    let Some(obj) = body.as_object() else {
        return Err(PreferencesError::InvalidJson);
    };

    let stack: Option<Vec<&str>> = obj
        .get("stack")
        .and_then(Value::as_array)
        .and_then(|items| items.iter().map(Value::as_str).collect());
    let theme = trimmed_str(obj.get("theme"));
    let layout = trimmed_str(obj.get("layout"));

    let (Some(stack), Some(theme), Some(layout)) = (stack, theme, layout) else {
        return Err(PreferencesError::Shape);
    };
    if stack.len() > max_stack.min(MAX_PREFS_STACK) {
        return Err(PreferencesError::StackTooLarge);
    }
    if stack.iter().any(|s| s.trim().is_empty()) {
        return Err(PreferencesError::EmptyId);
    }

    Ok(UiPreferences {
        stack: stack.into_iter().map(str::to_string).collect(),
        theme: theme.to_string(),
        layout: layout.to_string(),
    })
}

fn bad(error: impl ToString, status: StatusCode) -> Response {
    (status, Json(json!({ "ok": false, "error": error.to_string() }))).into_response()
}

/// Handle a POST body: 200 `{"ok":true}` plus `Set-Cookie`, or 400
/// `{"ok":false,"error":..}`.
pub fn handle_ui_preferences_post(body: &[u8], kit: &dyn UiKitServer, max_stack: usize) -> Response {
    let parsed = serde_json::from_slice::<Value>(body)
        .map_err(|_| PreferencesError::InvalidJson)
        .and_then(|v| parse_ui_preferences_json(&v, max_stack));

    let prefs = match parsed {
        Ok(p) => p,
        Err(e) => {
            debug!(error = %e, "rejected preferences update");
            return bad(e, StatusCode::BAD_REQUEST);
        }
    };

    let mut headers = HeaderMap::new();
    if let Err(e) = kit.set_preferences_cookie(&mut headers, &prefs) {
        error!(error = %e, "failed to serialize preferences cookie");
        return bad(e, StatusCode::INTERNAL_SERVER_ERROR);
    }

    (headers, Json(json!({ "ok": true }))).into_response()
}
