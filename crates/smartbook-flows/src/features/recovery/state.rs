//! Password recovery flow state.
//!
//! The screen is a three-state machine; every textual output is a table
//! lookup on the current state, never computed.

use smartbook_core::validation::{ValidationResult, Validator};

use crate::strings::RecoveryStrings;

/// Which phase the recovery screen is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryState {
    /// Initial: the email form is visible.
    EnteringEmail,
    /// The reset request is outstanding.
    Loading,
    /// The reset mail was sent; terminal for this flow instance.
    CheckEmail,
}

/// Mutable recovery screen state.
pub struct RecoveryFlow {
    pub(super) state: RecoveryState,
    pub(super) email: String,
    pub(super) generation: u64,
    pub(super) email_validation: ValidationResult,
    pub(super) validator: Validator,
    pub(super) strings: RecoveryStrings,
}

/// Public, immutable snapshot read by the presentation layer.
///
/// `None` text in `Loading` means "keep previous / show spinner".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoverySnapshot {
    pub title: Option<String>,
    pub description: Option<String>,
    pub action_button_title: Option<String>,
    pub email_validation: ValidationResult,
    pub is_form_hidden: bool,
    pub is_loading: bool,
    /// Email non-empty; independent of state and of full validation.
    pub is_button_enabled: bool,
}

impl RecoveryFlow {
    pub fn new(strings: RecoveryStrings) -> Self {
        Self {
            state: RecoveryState::EnteringEmail,
            email: String::new(),
            generation: 0,
            email_validation: ValidationResult::Success,
            validator: Validator::email(strings.wrong_email_format.clone()),
            strings,
        }
    }

    pub fn state(&self) -> RecoveryState {
        self.state
    }

    pub fn snapshot(&self) -> RecoverySnapshot {
        let (title, description, action_button_title) = match self.state {
            RecoveryState::EnteringEmail => (
                Some(self.strings.enter_email_title.clone()),
                Some(self.strings.enter_email_description.clone()),
                Some(self.strings.action_button_title.clone()),
            ),
            RecoveryState::Loading => (None, None, None),
            RecoveryState::CheckEmail => (
                Some(self.strings.check_email_title.clone()),
                Some(self.strings.check_email_description.clone()),
                Some(self.strings.action_button_title.clone()),
            ),
        };
        RecoverySnapshot {
            title,
            description,
            action_button_title,
            email_validation: self.email_validation.clone(),
            is_form_hidden: self.state != RecoveryState::EnteringEmail,
            is_loading: self.state == RecoveryState::Loading,
            is_button_enabled: !self.email.is_empty(),
        }
    }
}
