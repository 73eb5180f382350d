//! Cookie handling for UI preferences.
//!
//! Parsing is bounded and never fails; emission validates the cookie name
//! and value so a header can never be split or injected.

pub mod parse;
pub mod prefs;
pub mod set;

pub use parse::parse_cookie_header;
pub use prefs::{decode_prefs_cookie, encode_prefs_cookie, MAX_PREFS_STACK};
pub use set::{is_cookie_token, SameSite, SetCookie};
