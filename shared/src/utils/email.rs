//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Basic syntactic check: something before the '@', a '.' somewhere after it,
// and no whitespace anywhere. Full RFC 5322 validation belongs to the gateway.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap()
});

/// Normalize an email address for comparison (trim, lowercase)
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an email address is syntactically plausible
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Mask an email address for logging (e.g. `ab****@example.org`)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let visible: String = local.chars().take(2).collect();
            format!("{}****@{}", visible, domain)
        }
        None => "****".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  User@Example.ORG "), "user@example.org");
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("member@club.university.ac.kr"));
        assert!(is_valid_email(" padded@example.org "));

        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("dot@before"));
        assert!(!is_valid_email("two@@x.com"));
        assert!(!is_valid_email("sp ace@x.com"));
        assert!(!is_valid_email("trailing@x."));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("member@example.org"), "me****@example.org");
        assert_eq!(mask_email("a@x.com"), "a****@x.com");
        assert_eq!(mask_email("not-an-email"), "****");
    }
}
