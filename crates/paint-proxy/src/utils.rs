//! Small helpers shared by the proxy: ids, paths and plain-text errors.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};

/// Bytes of the SHA-256 digest kept in an id (16 base64url chars).
pub const ID_HASH_BYTES: usize = 12;

pub const TEXT_CSS: &str = "text/css; charset=utf-8";

/// Deterministic, url-safe id for a stylesheet source.
pub fn hash_id(source_url: &str) -> String {
    let digest = Sha256::digest(source_url.as_bytes());
    URL_SAFE_NO_PAD.encode(&digest[..ID_HASH_BYTES])
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Extract the opaque id from `<base>/<id>[.css]`.
pub fn parse_id_from_path<'a>(path: &'a str, base_path: &str) -> Option<&'a str> {
    let rest = if base_path == "/" {
        path.strip_prefix('/')?
    } else {
        path.strip_prefix(base_path)?.strip_prefix('/')?
    };
    let id = rest.strip_suffix(".css").unwrap_or(rest);

    if !id.is_empty() && id.chars().all(is_id_char) {
        Some(id)
    } else {
        None
    }
}

/// `p` is `base` or a path below it.
pub fn is_under_path(p: &str, base: &str) -> bool {
    if base == "/" {
        return p.starts_with('/');
    }
    p == base || p.strip_prefix(base).is_some_and(|rest| rest.starts_with('/'))
}

/// Plain-text error response.
pub fn bad(message: impl Into<String>, status: StatusCode) -> Response {
    let mut res = Response::new(Body::from(message.into()));
    *res.status_mut() = status;
    res.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    res
}
