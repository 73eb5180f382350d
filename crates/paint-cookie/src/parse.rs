//! Bounded `Cookie` header parsing.

use std::collections::BTreeMap;

/// Headers longer than this are ignored outright.
pub const MAX_COOKIE_HEADER_CHARS: usize = 16_384;
/// Pairs beyond this count are not looked at.
pub const MAX_COOKIE_PAIRS: usize = 200;

/// Parse a `Cookie` header into name/value pairs.
///
/// Pathological input yields an empty (or truncated) map instead of an
/// error. A later duplicate name overwrites an earlier one.
pub fn parse_cookie_header(header: Option<&str>) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    let Some(header) = header else {
        return out;
    };
    if header.len() > MAX_COOKIE_HEADER_CHARS {
        return out;
    }

    for part in header.split(';').take(MAX_COOKIE_PAIRS) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let (key, value) = match part.split_once('=') {
            Some((k, v)) => (k.trim(), v.trim()),
            None => (part, ""),
        };
        if key.is_empty() {
            continue;
        }
        out.insert(key.to_string(), value.to_string());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs() {
        let m = parse_cookie_header(Some("ui=abc; session = x=y ;flag"));
        assert_eq!(m.get("ui").map(String::as_str), Some("abc"));
        assert_eq!(m.get("session").map(String::as_str), Some("x=y"));
        assert_eq!(m.get("flag").map(String::as_str), Some(""));
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn missing_or_empty_header() {
        assert!(parse_cookie_header(None).is_empty());
        assert!(parse_cookie_header(Some("")).is_empty());
        assert!(parse_cookie_header(Some(" ; ;=v")).is_empty());
    }

    #[test]
    fn oversized_header_is_ignored() {
        let header = format!("ui={}", "a".repeat(MAX_COOKIE_HEADER_CHARS));
        assert!(parse_cookie_header(Some(&header)).is_empty());
    }

    #[test]
    fn pair_count_is_capped() {
        let header: Vec<String> = (0..MAX_COOKIE_PAIRS + 10).map(|i| format!("k{i}=v")).collect();
        let m = parse_cookie_header(Some(&header.join("; ")));
        assert_eq!(m.len(), MAX_COOKIE_PAIRS);
        assert!(m.contains_key("k0"));
        assert!(!m.contains_key(&format!("k{}", MAX_COOKIE_PAIRS)));
    }

    #[test]
    fn last_duplicate_wins() {
        let m = parse_cookie_header(Some("ui=one; ui=two"));
        assert_eq!(m["ui"], "two");
    }
}
