//! Registration flow state.

use smartbook_core::validation::{ValidationResult, Validator};

use crate::strings::RegistrationStrings;

/// Mutable registration screen state.
///
/// Mirrors the login flow with a third gate: the privacy-policy toggle.
pub struct RegistrationFlow {
    pub(super) login: String,
    pub(super) password: String,
    pub(super) privacy_policy_accepted: bool,
    pub(super) login_generation: u64,
    pub(super) password_generation: u64,
    pub(super) login_validation: ValidationResult,
    pub(super) password_validation: ValidationResult,
    pub(super) pending_submit: Option<(String, String)>,
    pub(super) in_flight: bool,
    /// Armed after a successful submission; the flow completes only once the
    /// presentation layer reports the success notice was dismissed.
    pub(super) awaiting_acknowledgement: bool,
    pub(super) attempt: u32,
    pub(super) max_submit_attempts: u32,
    pub(super) login_validator: Validator,
    pub(super) password_validator: Validator,
    pub(super) strings: RegistrationStrings,
}

/// Public, immutable snapshot read by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationSnapshot {
    pub login_validation: ValidationResult,
    pub password_validation: ValidationResult,
    /// Both fields non-empty and the privacy policy accepted.
    pub is_register_button_enabled: bool,
    pub is_submitting: bool,
}

impl RegistrationFlow {
    pub fn new(strings: RegistrationStrings, max_submit_attempts: u32) -> Self {
        Self {
            login: String::new(),
            password: String::new(),
            privacy_policy_accepted: false,
            login_generation: 0,
            password_generation: 0,
            login_validation: ValidationResult::Success,
            password_validation: ValidationResult::Success,
            pending_submit: None,
            in_flight: false,
            awaiting_acknowledgement: false,
            attempt: 0,
            max_submit_attempts: max_submit_attempts.max(1),
            login_validator: Validator::email(strings.wrong_email_format.clone()),
            password_validator: Validator::password(strings.wrong_password_format.clone()),
            strings,
        }
    }

    pub fn snapshot(&self) -> RegistrationSnapshot {
        RegistrationSnapshot {
            login_validation: self.login_validation.clone(),
            password_validation: self.password_validation.clone(),
            is_register_button_enabled: !self.login.is_empty()
                && !self.password.is_empty()
                && self.privacy_policy_accepted,
            is_submitting: self.in_flight,
        }
    }
}
