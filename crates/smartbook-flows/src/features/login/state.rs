//! Login flow state.

use smartbook_core::validation::{ValidationResult, Validator};

use crate::strings::LoginStrings;

/// Mutable login screen state. Owned by the flow driver; the presentation
/// layer only ever sees [`LoginSnapshot`].
pub struct LoginFlow {
    pub(super) login: String,
    pub(super) password: String,
    /// Bumped on every edit; stale debounce timers carry an older value.
    pub(super) login_generation: u64,
    pub(super) password_generation: u64,
    pub(super) login_validation: ValidationResult,
    pub(super) password_validation: ValidationResult,
    /// Credentials captured at tap time, reused verbatim by retries.
    pub(super) pending_submit: Option<(String, String)>,
    pub(super) in_flight: bool,
    pub(super) attempt: u32,
    pub(super) max_submit_attempts: u32,
    pub(super) login_validator: Validator,
    pub(super) password_validator: Validator,
}

/// Public, immutable snapshot read by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSnapshot {
    pub login_validation: ValidationResult,
    pub password_validation: ValidationResult,
    /// Both fields non-empty. Intentionally looser than full validation so
    /// the button is tappable before the debounce window closes.
    pub is_login_button_enabled: bool,
    pub is_submitting: bool,
}

impl LoginFlow {
    pub fn new(strings: LoginStrings, max_submit_attempts: u32) -> Self {
        Self {
            login: String::new(),
            password: String::new(),
            login_generation: 0,
            password_generation: 0,
            login_validation: ValidationResult::Success,
            password_validation: ValidationResult::Success,
            pending_submit: None,
            in_flight: false,
            attempt: 0,
            max_submit_attempts: max_submit_attempts.max(1),
            login_validator: Validator::email(strings.wrong_email_format),
            password_validator: Validator::password(strings.wrong_password_format),
        }
    }

    pub fn snapshot(&self) -> LoginSnapshot {
        LoginSnapshot {
            login_validation: self.login_validation.clone(),
            password_validation: self.password_validation.clone(),
            is_login_button_enabled: !self.login.is_empty() && !self.password.is_empty(),
            is_submitting: self.in_flight,
        }
    }
}
