//! Small HTTP helpers.

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;
pub use paint_proxy::utils::is_under_path;

/// Strip trailing slashes, keeping `/` for the root.
pub fn normalize_pathname(p: &str) -> &str {
    let trimmed = p.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Add `value` to `Vary` unless an equal token (case-insensitive) is present.
pub fn add_vary(headers: &mut HeaderMap, value: &str) {
    let current: Vec<String> = headers
        .get_all(header::VARY)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    if current.iter().any(|t| t == "*" || t.eq_ignore_ascii_case(value)) {
        return;
    }

    let joined = current
        .into_iter()
        .chain(std::iter::once(value.to_string()))
        .collect::<Vec<_>>()
        .join(", ");
    if let Ok(v) = HeaderValue::from_str(&joined) {
        headers.insert(header::VARY, v);
    }
}

/// 405 with an `Allow` header.
pub fn method_not_allowed(allow: &'static str) -> Response {
    let mut res = Response::new(Body::from("Method Not Allowed"));
    *res.status_mut() = StatusCode::METHOD_NOT_ALLOWED;
    res.headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static(allow));
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_pathnames() {
        assert_eq!(normalize_pathname("/"), "/");
        assert_eq!(normalize_pathname("///"), "/");
        assert_eq!(normalize_pathname("/ui/css/"), "/ui/css");
        assert_eq!(normalize_pathname("/api/ui-preferences"), "/api/ui-preferences");
    }

    #[test]
    fn vary_is_appended_once() {
        let mut h = HeaderMap::new();
        add_vary(&mut h, "Cookie");
        assert_eq!(h[header::VARY], "Cookie");

        add_vary(&mut h, "cookie");
        assert_eq!(h[header::VARY], "Cookie");

        let mut h = HeaderMap::new();
        h.insert(header::VARY, "Accept-Encoding".parse().unwrap());
        add_vary(&mut h, "Cookie");
        assert_eq!(h[header::VARY], "Accept-Encoding, Cookie");

        let mut h = HeaderMap::new();
        h.append(header::VARY, "Accept".parse().unwrap());
        h.append(header::VARY, "Origin, Cookie".parse().unwrap());
        add_vary(&mut h, "Cookie");
        assert_eq!(h.get_all(header::VARY).iter().count(), 2);
    }

    #[test]
    fn vary_star_is_left_alone() {
        let mut h = HeaderMap::new();
        h.insert(header::VARY, "*".parse().unwrap());
        add_vary(&mut h, "Cookie");
        assert_eq!(h[header::VARY], "*");
    }

    #[test]
    fn method_not_allowed_sets_allow() {
        let res = method_not_allowed("GET, HEAD");
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.headers()[header::ALLOW], "GET, HEAD");
    }
}
