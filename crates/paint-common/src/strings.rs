//! Small string helpers shared by validators and parsers.

/// Trim `value` and return it if anything is left.
pub fn clean_string(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Like [`clean_string`] but for optional owned labels.
pub fn clean_label(value: Option<&str>) -> Option<String> {
    value.and_then(clean_string).map(str::to_string)
}

/// A non-empty string after trimming, without rewriting the original.
pub fn is_non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_string_trims() {
        assert_eq!(clean_string("  base "), Some("base"));
        assert_eq!(clean_string("   "), None);
        assert_eq!(clean_string(""), None);
    }

    #[test]
    fn clean_label_drops_blank() {
        assert_eq!(clean_label(Some(" Ocean ")), Some("Ocean".to_string()));
        assert_eq!(clean_label(Some("\t")), None);
        assert_eq!(clean_label(None), None);
    }

    #[test]
    fn non_empty() {
        assert!(is_non_empty("a"));
        assert!(!is_non_empty(" \n"));
    }
}
