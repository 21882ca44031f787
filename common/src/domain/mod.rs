pub mod catalog;
pub mod filter;
pub mod mileage;

/// Case-insensitive substring test used by every text filter in the system.
/// Plain lowercased comparison, no pattern compilation from caller input.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Normalizes an optional text parameter: empty or whitespace-only becomes
/// absent, everything else is trimmed.
pub fn clean_text(raw: Option<&str>) -> Option<String> {
    match raw {
        Some(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        None => None,
    }
}

/// Lenient numeric parse for filter input coming from query strings or form
/// fields. Anything unparseable means "filter not applied", never an error.
pub fn numeric_input(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
}

/// Same leniency for pagination input.
pub fn integer_input(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_ci_ignores_case() {
        assert!(contains_ci("Honda City", "hoNDa"));
        assert!(!contains_ci("Honda City", "swift"));
    }

    #[test]
    fn empty_needle_matches_everything() {
        assert!(contains_ci("anything", ""));
        assert!(contains_ci("", ""));
    }

    #[test]
    fn clean_text_drops_blank_input() {
        assert_eq!(clean_text(Some("  ")), None);
        assert_eq!(clean_text(Some(" red ")), Some("red".to_string()));
        assert_eq!(clean_text(None), None);
    }

    #[test]
    fn numeric_input_is_lenient() {
        assert_eq!(numeric_input(Some("500000")), Some(500000.0));
        assert_eq!(numeric_input(Some(" 18.5 ")), Some(18.5));
        assert_eq!(numeric_input(Some("abc")), None);
        assert_eq!(numeric_input(Some("")), None);
        assert_eq!(numeric_input(None), None);
    }

    #[test]
    fn integer_input_is_lenient() {
        assert_eq!(integer_input(Some("2")), Some(2));
        assert_eq!(integer_input(Some("two")), None);
        assert_eq!(integer_input(None), None);
    }
}
