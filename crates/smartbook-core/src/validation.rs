//! Form field validation.
//!
//! Validation outcomes are values, never errors: the flows thread them
//! through derived state and the presentation layer renders them inline.
//! Error messages are opaque caller-supplied strings (localization lives in
//! the embedding app).

use std::sync::LazyLock;

use regex::Regex;

/// RFC-5322-ish address grammar, matched against the whole string.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(?:[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21\x23-\x5b\x5d-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*")@(?:(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?|\[(?:(?:(2(5[0-5]|[0-4][0-9])|1[0-9][0-9]|[1-9]?[0-9]))\.){3}(?:(2(5[0-5]|[0-4][0-9])|1[0-9][0-9]|[1-9]?[0-9])|[a-z0-9-]*[a-z0-9]:(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21-\x5a\x53-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])+)\])$"#,
    )
    .expect("email pattern is valid")
});

/// At least 8 alphanumeric characters, nothing else.
static PASSWORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-zA-Z]{8,}$").expect("password pattern is valid"));

/// Verdict of validating a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Success,
    /// Carries the human-readable message to show inline.
    Error(String),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Success)
    }
}

/// Whole-string regex validator with a fixed error message.
#[derive(Debug, Clone)]
pub struct Validator {
    pattern: &'static Regex,
    message: String,
}

impl Validator {
    /// Email address validator. `message` is shown on rejection.
    pub fn email(message: impl Into<String>) -> Self {
        Self {
            pattern: LazyLock::force(&EMAIL_PATTERN),
            message: message.into(),
        }
    }

    /// Password validator (8+ alphanumerics). `message` is shown on rejection.
    pub fn password(message: impl Into<String>) -> Self {
        Self {
            pattern: LazyLock::force(&PASSWORD_PATTERN),
            message: message.into(),
        }
    }

    /// Validates `text`. Exactly one whole-string match is required; zero or
    /// multiple matches reject.
    pub fn validate(&self, text: &str) -> ValidationResult {
        if self.pattern.find_iter(text).count() == 1 {
            ValidationResult::Success
        } else {
            ValidationResult::Error(self.message.clone())
        }
    }
}
