//! Field validation for sign-up input.

use regex::Regex;

/// Basic email format check.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

/// Password strength policy: at least 8 characters, one uppercase letter,
/// and one symbol.
#[must_use]
pub fn strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(char::is_uppercase)
        && password.chars().any(|c| !c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("a@x.com"));
        assert!(valid_email("name.surname@example.co"));
    }

    #[test]
    fn valid_email_rejects_malformed() {
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("a@b"));
        assert!(!valid_email("a b@x.com"));
        assert!(!valid_email("@x.com"));
    }

    #[test]
    fn strong_password_policy() {
        assert!(!strong_password("abc"));
        assert!(!strong_password("abcdefgh"));
        assert!(!strong_password("Abcdefgh"));
        assert!(!strong_password("Abc1!"));
        assert!(strong_password("Abcdefg1!"));
        assert!(strong_password("P@ssword"));
    }
}
