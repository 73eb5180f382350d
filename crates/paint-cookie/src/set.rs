//! `Set-Cookie` header construction.

use std::fmt;

use paint_common::PaintError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    #[default]
    Lax,
    Strict,
    None,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lax => "Lax",
            Self::Strict => "Strict",
            Self::None => "None",
        })
    }
}

const COOKIE_SEPARATORS: &[char] = &[
    '(', ')', '<', '>', '@', ',', ';', ':', '\\', '"', '/', '[', ']', '?', '=', '{', '}', ' ', '\t',
];

/// Whether `s` is a valid cookie name: visible ASCII without separators.
pub fn is_cookie_token(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c > ' ' && c < '\u{7f}' && !COOKIE_SEPARATORS.contains(&c))
}

/// No control characters and no `;`. Values are not quoted.
fn is_safe_cookie_value(value: &str) -> bool {
    !value.chars().any(|c| c <= '\u{1f}' || c == '\u{7f}' || c == ';')
}

/// Builder for one `Set-Cookie` header value.
///
/// Defaults: `Path=/`, `SameSite=Lax`, `HttpOnly`, no `Secure`, no `Max-Age`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub http_only: bool,
    pub same_site: SameSite,
    pub secure: bool,
    pub max_age: Option<u64>,
}

impl SetCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            path: "/".to_string(),
            http_only: true,
            same_site: SameSite::Lax,
            secure: false,
            max_age: None,
        }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn http_only(mut self, on: bool) -> Self {
        self.http_only = on;
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    pub fn secure(mut self, on: bool) -> Self {
        self.secure = on;
        self
    }

    pub fn max_age(mut self, seconds: u64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    /// Render the header value, rejecting unsafe names, values or paths.
    pub fn to_header_value(&self) -> Result<String, PaintError> {
        if !is_cookie_token(&self.name) {
            return Err(PaintError::CookieInvalid(format!(
                "Invalid cookie name: \"{}\"",
                self.name
            )));
        }
        if !is_safe_cookie_value(&self.value) {
            return Err(PaintError::CookieInvalid(format!(
                "Invalid cookie value for \"{}\"",
                self.name
            )));
        }
        if self.path.is_empty() || !is_safe_cookie_value(&self.path) {
            return Err(PaintError::CookieInvalid(format!(
                "Invalid cookie path for \"{}\"",
                self.name
            )));
        }

        let mut parts = vec![
            format!("{}={}", self.name, self.value),
            format!("Path={}", self.path),
            format!("SameSite={}", self.same_site),
        ];
        if self.http_only {
            parts.push("HttpOnly".to_string());
        }
        if self.secure {
            parts.push("Secure".to_string());
        }
        if let Some(age) = self.max_age {
            parts.push(format!("Max-Age={age}"));
        }
        Ok(parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let h = SetCookie::new("ui", "abc").to_header_value().unwrap();
        assert_eq!(h, "ui=abc; Path=/; SameSite=Lax; HttpOnly");
    }

    #[test]
    fn all_attributes() {
        let h = SetCookie::new("ui", "abc")
            .path("/app")
            .http_only(false)
            .same_site(SameSite::Strict)
            .secure(true)
            .max_age(3600)
            .to_header_value()
            .unwrap();
        assert_eq!(h, "ui=abc; Path=/app; SameSite=Strict; Secure; Max-Age=3600");
    }

    #[test]
    fn cookie_tokens() {
        assert!(is_cookie_token("ui"));
        assert!(is_cookie_token("ui_prefs-v2.x"));
        for bad in ["", "a b", "a;b", "a=b", "a\tb", "ä", "a\u{7f}", "a/b", "\"q\""] {
            assert!(!is_cookie_token(bad), "{bad:?}");
        }
    }

    #[test]
    fn rejects_header_injection() {
        let err = SetCookie::new("ui;evil", "x").to_header_value().unwrap_err();
        assert_eq!(err.code(), "E_COOKIE_INVALID");
        assert!(err.to_string().contains("Invalid cookie name"));

        let err = SetCookie::new("ui", "x\r\nSet-Cookie: a=b").to_header_value().unwrap_err();
        assert!(err.to_string().contains("Invalid cookie value for \"ui\""));

        let err = SetCookie::new("ui", "x; Domain=evil").to_header_value().unwrap_err();
        assert!(matches!(err, PaintError::CookieInvalid(_)));

        let err = SetCookie::new("ui", "x").path("/; Secure").to_header_value().unwrap_err();
        assert!(err.to_string().contains("Invalid cookie path"));
    }

    #[test]
    fn empty_value_is_allowed() {
        let h = SetCookie::new("ui", "").max_age(0).to_header_value().unwrap();
        assert!(h.starts_with("ui=; "));
        assert!(h.ends_with("Max-Age=0"));
    }
}
