//! Preferences cookie codec: base64url(JSON({ stack, theme, layout })).

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use paint_common::UiPreferences;
use serde_json::Value;
use tracing::debug;

/// Encoded values longer than this are rejected without decoding.
pub const MAX_PREFS_COOKIE_CHARS: usize = 4096;
/// Stacks longer than this are rejected.
pub const MAX_PREFS_STACK: usize = 50;

/// URL-safe alphabet, no padding on output, padding tolerated on input.
const PREFS_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn encode_prefs_cookie(prefs: &UiPreferences) -> String {
    // Serializing three strings/arrays cannot fail.
    let json = serde_json::to_vec(prefs).unwrap_or_default();
    PREFS_ENGINE.encode(json)
}

/// Decode a cookie value. Any malformed input gives `None`.
pub fn decode_prefs_cookie(value: &str) -> Option<UiPreferences> {
    if value.is_empty() || value.len() > MAX_PREFS_COOKIE_CHARS {
        return None;
    }

    let bytes = match PREFS_ENGINE.decode(value) {
        Ok(b) => b,
        Err(e) => {
            debug!(error = %e, "preferences cookie is not base64url");
            return None;
        }
    };
    let v: Value = match serde_json::from_slice(&bytes) {
        Ok(v) => v,
        Err(e) => {
            debug!(error = %e, "preferences cookie is not JSON");
            return None;
        }
    };

    let obj = v.as_object()?;
    let stack = obj.get("stack")?.as_array()?;
    let theme = obj.get("theme")?.as_str()?.trim();
    let layout = obj.get("layout")?.as_str()?.trim();

    if theme.is_empty() || layout.is_empty() || stack.len() > MAX_PREFS_STACK {
        return None;
    }

    let stack = stack
        .iter()
        .map(|s| s.as_str().filter(|s| !s.trim().is_empty()).map(str::to_string))
        .collect::<Option<Vec<_>>>()?;

    Some(UiPreferences {
        stack,
        theme: theme.to_string(),
        layout: layout.to_string(),
    })
}
