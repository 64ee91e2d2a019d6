//! Password recovery reducer.
//!
//! Transition table:
//! - `EnteringEmail --[tap, email valid]--> Loading` (+ reset request)
//! - `Loading --[reset succeeds]--> CheckEmail`
//! - `Loading --[reset fails]--> EnteringEmail` (+ error published)
//! - `CheckEmail --[tap]--> flow completed` (+ best-effort mail client open)
//!
//! A failed reset re-arms the form; the next valid tap issues a fresh
//! request. Invalid-email taps are absorbed with an inline error.

use smartbook_core::api::AuthResult;
use smartbook_core::validation::ValidationResult;

use super::state::{RecoveryFlow, RecoveryState};
use crate::effects::{Field, FlowEffect, FlowOutcome, SubmitOutcome, SubmitRequest};

/// Everything that can happen to the recovery screen.
#[derive(Debug)]
pub enum RecoveryEvent {
    EmailChanged(String),
    /// The single action button; its meaning depends on the current state.
    ActionButtonTapped,
    ValidationDue { generation: u64 },
    SubmitFinished(AuthResult<SubmitOutcome>),
}

pub fn update(flow: &mut RecoveryFlow, event: RecoveryEvent) -> Vec<FlowEffect> {
    match event {
        RecoveryEvent::EmailChanged(text) => {
            flow.email = text;
            flow.generation += 1;
            flow.email_validation = ValidationResult::Success;
            vec![FlowEffect::ScheduleValidation {
                field: Field::Email,
                generation: flow.generation,
            }]
        }
        RecoveryEvent::ValidationDue { generation } => {
            if generation == flow.generation {
                flow.email_validation = flow.validator.validate(&flow.email);
            }
            vec![]
        }
        RecoveryEvent::ActionButtonTapped => match flow.state {
            RecoveryState::EnteringEmail => {
                flow.email_validation = flow.validator.validate(&flow.email);
                if !flow.email_validation.is_valid() {
                    return vec![];
                }
                flow.state = RecoveryState::Loading;
                tracing::debug!("password reset requested");
                vec![FlowEffect::Submit(SubmitRequest::ResetPassword {
                    email: flow.email.clone(),
                })]
            }
            // A tap while the request is outstanding does nothing.
            RecoveryState::Loading => vec![],
            RecoveryState::CheckEmail => {
                tracing::info!("password recovery completed");
                vec![
                    FlowEffect::OpenMailClient,
                    FlowEffect::Complete(FlowOutcome::PasswordRecovered),
                ]
            }
        },
        RecoveryEvent::SubmitFinished(Ok(SubmitOutcome::ResetSent)) => {
            if flow.state == RecoveryState::Loading {
                flow.state = RecoveryState::CheckEmail;
            }
            vec![]
        }
        RecoveryEvent::SubmitFinished(Ok(_)) => {
            tracing::warn!("unexpected submit outcome for recovery flow");
            vec![]
        }
        RecoveryEvent::SubmitFinished(Err(error)) => {
            if flow.state != RecoveryState::Loading {
                return vec![];
            }
            flow.state = RecoveryState::EnteringEmail;
            tracing::warn!(error = %error, "password reset failed");
            vec![FlowEffect::PresentError(error)]
        }
    }
}

#[cfg(test)]
mod tests {
    use smartbook_core::api::{AuthError, AuthorizationError};

    use super::*;
    use crate::strings::RecoveryStrings;

    fn flow() -> RecoveryFlow {
        RecoveryFlow::new(RecoveryStrings::default())
    }

    fn flow_with_email() -> RecoveryFlow {
        let mut flow = flow();
        update(
            &mut flow,
            RecoveryEvent::EmailChanged("reader@example.com".to_string()),
        );
        flow
    }

    /// Test: the full happy path through the state machine.
    #[test]
    fn walks_entering_loading_check_email() {
        let mut flow = flow_with_email();
        assert_eq!(flow.state(), RecoveryState::EnteringEmail);

        let effects = update(&mut flow, RecoveryEvent::ActionButtonTapped);
        assert_eq!(
            effects,
            vec![FlowEffect::Submit(SubmitRequest::ResetPassword {
                email: "reader@example.com".to_string(),
            })]
        );
        assert_eq!(flow.state(), RecoveryState::Loading);
        assert!(flow.snapshot().is_loading);

        update(
            &mut flow,
            RecoveryEvent::SubmitFinished(Ok(SubmitOutcome::ResetSent)),
        );
        assert_eq!(flow.state(), RecoveryState::CheckEmail);

        let effects = update(&mut flow, RecoveryEvent::ActionButtonTapped);
        assert_eq!(
            effects,
            vec![
                FlowEffect::OpenMailClient,
                FlowEffect::Complete(FlowOutcome::PasswordRecovered),
            ]
        );
        // The state itself does not change further; the coordinator
        // dismisses the screen on the completion signal.
        assert_eq!(flow.state(), RecoveryState::CheckEmail);
    }

    #[test]
    fn invalid_email_tap_is_absorbed_with_inline_error() {
        let mut flow = flow();
        update(&mut flow, RecoveryEvent::EmailChanged("not-an-email".to_string()));
        let effects = update(&mut flow, RecoveryEvent::ActionButtonTapped);
        assert!(effects.is_empty());
        assert_eq!(flow.state(), RecoveryState::EnteringEmail);
        assert!(!flow.snapshot().email_validation.is_valid());
    }

    #[test]
    fn failed_reset_returns_to_entering_email_and_publishes_error() {
        let mut flow = flow_with_email();
        update(&mut flow, RecoveryEvent::ActionButtonTapped);

        let error = AuthError::Authorization(AuthorizationError::UserNotFound);
        let effects = update(&mut flow, RecoveryEvent::SubmitFinished(Err(error.clone())));
        assert_eq!(effects, vec![FlowEffect::PresentError(error)]);
        assert_eq!(flow.state(), RecoveryState::EnteringEmail);

        // The pipeline survived: the next tap issues a fresh request.
        let effects = update(&mut flow, RecoveryEvent::ActionButtonTapped);
        assert_eq!(effects.len(), 1);
        assert_eq!(flow.state(), RecoveryState::Loading);
    }

    #[test]
    fn tap_while_loading_does_nothing() {
        let mut flow = flow_with_email();
        update(&mut flow, RecoveryEvent::ActionButtonTapped);
        assert!(update(&mut flow, RecoveryEvent::ActionButtonTapped).is_empty());
        assert_eq!(flow.state(), RecoveryState::Loading);
    }

    #[test]
    fn screen_text_is_a_table_lookup_on_state() {
        let mut flow = flow_with_email();
        let snapshot = flow.snapshot();
        assert_eq!(snapshot.title.as_deref(), Some("Password recovery"));
        assert_eq!(snapshot.description.as_deref(), Some("Enter your email"));
        assert_eq!(snapshot.action_button_title.as_deref(), Some("Continue"));
        assert!(!snapshot.is_form_hidden);

        update(&mut flow, RecoveryEvent::ActionButtonTapped);
        let snapshot = flow.snapshot();
        assert_eq!(snapshot.title, None);
        assert_eq!(snapshot.description, None);
        assert_eq!(snapshot.action_button_title, None);
        assert!(snapshot.is_form_hidden);
        assert!(snapshot.is_loading);

        update(
            &mut flow,
            RecoveryEvent::SubmitFinished(Ok(SubmitOutcome::ResetSent)),
        );
        let snapshot = flow.snapshot();
        assert_eq!(snapshot.title.as_deref(), Some("Check your email"));
        assert_eq!(
            snapshot.description.as_deref(),
            Some("A password recovery link has been sent to your email address")
        );
        assert!(snapshot.is_form_hidden);
        assert!(!snapshot.is_loading);
    }

    #[test]
    fn button_enablement_tracks_email_presence_only() {
        let mut flow = flow();
        assert!(!flow.snapshot().is_button_enabled);
        update(&mut flow, RecoveryEvent::EmailChanged("x".to_string()));
        // Non-empty but invalid: still tappable, per the login screen's
        // looser-precondition pattern.
        assert!(flow.snapshot().is_button_enabled);
    }
}
