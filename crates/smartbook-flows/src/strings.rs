//! Display strings consumed by the flows.
//!
//! The flows treat every message as an opaque string; the embedding app
//! supplies localized bundles. The `Default` impls carry the English copy so
//! the library is usable out of the box.

/// Strings for the login screen.
#[derive(Debug, Clone)]
pub struct LoginStrings {
    pub wrong_email_format: String,
    pub wrong_password_format: String,
}

impl Default for LoginStrings {
    fn default() -> Self {
        Self {
            wrong_email_format: "Wrong email format".to_string(),
            wrong_password_format: "Wrong password format".to_string(),
        }
    }
}

/// Strings for the registration screen.
#[derive(Debug, Clone)]
pub struct RegistrationStrings {
    pub wrong_email_format: String,
    pub wrong_password_format: String,
    /// Title of the one-shot notice shown after a successful submission.
    pub success_title: String,
    /// Body of that notice; the account stays unconfirmed until the user
    /// follows the emailed link.
    pub success_message: String,
}

impl Default for RegistrationStrings {
    fn default() -> Self {
        Self {
            wrong_email_format: "Wrong email format".to_string(),
            wrong_password_format: "Wrong password format".to_string(),
            success_title: "Success".to_string(),
            success_message: "Please confirm your email address to complete registration"
                .to_string(),
        }
    }
}

/// Strings for the password recovery screen, one set per state.
#[derive(Debug, Clone)]
pub struct RecoveryStrings {
    pub wrong_email_format: String,
    pub enter_email_title: String,
    pub enter_email_description: String,
    pub check_email_title: String,
    pub check_email_description: String,
    pub action_button_title: String,
}

impl Default for RecoveryStrings {
    fn default() -> Self {
        Self {
            wrong_email_format: "Wrong email format".to_string(),
            enter_email_title: "Password recovery".to_string(),
            enter_email_description: "Enter your email".to_string(),
            check_email_title: "Check your email".to_string(),
            check_email_description: "A password recovery link has been sent to your email address"
                .to_string(),
            action_button_title: "Continue".to_string(),
        }
    }
}
