//! Field rules for the login and registration forms.
//!
//! Each field has an ordered list of rules and reports the message of the
//! first one that fails, so an empty email says "Email is required" rather
//! than "Invalid email".

use validator::{ValidateEmail, ValidateLength};

/// Shortest password the forms accept
pub const MIN_PASSWORD_LEN: u64 = 6;

pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
pub const USERNAME_REQUIRED: &str = "Username is required";

/// A single check on a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Non-empty
    Required(&'static str),
    /// Email shaped; an empty value is left to `Required`
    Email(&'static str),
    /// At least this many characters
    MinLength(u64, &'static str),
}

impl Rule {
    fn passes(&self, value: &str) -> bool {
        match self {
            Rule::Required(_) => !value.is_empty(),
            Rule::Email(_) => value.is_empty() || value.validate_email(),
            Rule::MinLength(min, _) => value.validate_length(Some(*min), None, None),
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Rule::Required(message) | Rule::Email(message) | Rule::MinLength(_, message) => *message,
        }
    }
}

pub const EMAIL_RULES: &[Rule] = &[Rule::Required(EMAIL_REQUIRED), Rule::Email(EMAIL_INVALID)];

pub const PASSWORD_RULES: &[Rule] = &[
    Rule::Required(PASSWORD_REQUIRED),
    Rule::MinLength(MIN_PASSWORD_LEN, PASSWORD_TOO_SHORT),
];

pub const USERNAME_RULES: &[Rule] = &[Rule::Required(USERNAME_REQUIRED)];

/// The message of the first rule `value` breaks, if any
pub fn check(value: &str, rules: &[Rule]) -> Option<&'static str> {
    rules
        .iter()
        .find(|rule| !rule.passes(value))
        .map(Rule::message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_rules_in_order() {
        assert_eq!(check("", EMAIL_RULES), Some(EMAIL_REQUIRED));
        assert_eq!(check("ab.com", EMAIL_RULES), Some(EMAIL_INVALID));
        assert_eq!(check("a@", EMAIL_RULES), Some(EMAIL_INVALID));
        assert_eq!(check("a@b.com", EMAIL_RULES), None);
    }

    #[test]
    fn emails_without_at_sign_are_rejected() {
        for email in ["plainaddress", "user.example.com", "user at example.com", "@"] {
            assert!(check(email, EMAIL_RULES).is_some(), "{email} should fail");
        }
    }

    #[test]
    fn password_rules_in_order() {
        assert_eq!(check("", PASSWORD_RULES), Some(PASSWORD_REQUIRED));
        assert_eq!(check("12345", PASSWORD_RULES), Some(PASSWORD_TOO_SHORT));
        assert_eq!(check("123456", PASSWORD_RULES), None);
    }

    #[test]
    fn username_only_needs_a_value() {
        assert_eq!(check("", USERNAME_RULES), Some(USERNAME_REQUIRED));
        assert_eq!(check("x", USERNAME_RULES), None);
    }
}
