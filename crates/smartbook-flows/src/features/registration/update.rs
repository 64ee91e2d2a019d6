//! Registration flow reducer.
//!
//! Success never yields a `User`: the account stays unconfirmed until the
//! emailed link is followed, so the reducer publishes a one-shot notice and
//! completes only when the presentation layer acknowledges it.

use smartbook_core::api::AuthResult;
use smartbook_core::validation::ValidationResult;

use super::state::RegistrationFlow;
use crate::effects::{Field, FlowEffect, FlowOutcome, NavigationIntent, SubmitOutcome, SubmitRequest};

/// Everything that can happen to the registration screen.
#[derive(Debug)]
pub enum RegistrationEvent {
    LoginChanged(String),
    PasswordChanged(String),
    PrivacyPolicyChanged(bool),
    RegisterButtonTapped,
    /// "Already have an account" tap; forwarded as navigation.
    SignInTapped,
    /// The presentation layer reports the success notice was dismissed.
    SuccessMessageAcknowledged,
    ValidationDue { field: Field, generation: u64 },
    SubmitFinished(AuthResult<SubmitOutcome>),
}

pub fn update(flow: &mut RegistrationFlow, event: RegistrationEvent) -> Vec<FlowEffect> {
    match event {
        RegistrationEvent::LoginChanged(text) => {
            flow.login = text;
            flow.login_generation += 1;
            flow.login_validation = ValidationResult::Success;
            vec![FlowEffect::ScheduleValidation {
                field: Field::Login,
                generation: flow.login_generation,
            }]
        }
        RegistrationEvent::PasswordChanged(text) => {
            flow.password = text;
            flow.password_generation += 1;
            flow.password_validation = ValidationResult::Success;
            vec![FlowEffect::ScheduleValidation {
                field: Field::Password,
                generation: flow.password_generation,
            }]
        }
        RegistrationEvent::PrivacyPolicyChanged(accepted) => {
            flow.privacy_policy_accepted = accepted;
            vec![]
        }
        RegistrationEvent::ValidationDue { field, generation } => {
            match field {
                Field::Login if generation == flow.login_generation => {
                    flow.login_validation = flow.login_validator.validate(&flow.login);
                }
                Field::Password if generation == flow.password_generation => {
                    flow.password_validation = flow.password_validator.validate(&flow.password);
                }
                _ => {}
            }
            vec![]
        }
        RegistrationEvent::RegisterButtonTapped => {
            if flow.in_flight || flow.awaiting_acknowledgement {
                return vec![];
            }
            flow.login_validation = flow.login_validator.validate(&flow.login);
            flow.password_validation = flow.password_validator.validate(&flow.password);
            let gates_open = flow.login_validation.is_valid()
                && flow.password_validation.is_valid()
                && flow.privacy_policy_accepted;
            if !gates_open {
                return vec![];
            }
            flow.pending_submit = Some((flow.login.clone(), flow.password.clone()));
            flow.in_flight = true;
            flow.attempt = 1;
            vec![FlowEffect::Submit(submit_request(flow))]
        }
        RegistrationEvent::SignInTapped => {
            vec![FlowEffect::Navigate(NavigationIntent::Login)]
        }
        RegistrationEvent::SuccessMessageAcknowledged => {
            if !flow.awaiting_acknowledgement {
                return vec![];
            }
            flow.awaiting_acknowledgement = false;
            vec![FlowEffect::Complete(FlowOutcome::Registered)]
        }
        RegistrationEvent::SubmitFinished(Ok(SubmitOutcome::Registered(_))) => {
            flow.in_flight = false;
            flow.attempt = 0;
            flow.pending_submit = None;
            flow.awaiting_acknowledgement = true;
            tracing::info!("registration submitted, awaiting email confirmation");
            vec![FlowEffect::Notice {
                title: flow.strings.success_title.clone(),
                message: flow.strings.success_message.clone(),
            }]
        }
        RegistrationEvent::SubmitFinished(Ok(_)) => {
            tracing::warn!("unexpected submit outcome for registration flow");
            flow.in_flight = false;
            flow.attempt = 0;
            flow.pending_submit = None;
            vec![]
        }
        RegistrationEvent::SubmitFinished(Err(error)) => {
            let mut effects = vec![FlowEffect::PresentError(error)];
            if flow.attempt < flow.max_submit_attempts {
                flow.attempt += 1;
                tracing::warn!(attempt = flow.attempt, "registration failed, retrying");
                effects.push(FlowEffect::Submit(submit_request(flow)));
            } else {
                flow.in_flight = false;
                flow.attempt = 0;
                flow.pending_submit = None;
            }
            effects
        }
    }
}

fn submit_request(flow: &RegistrationFlow) -> SubmitRequest {
    let (email, password) = flow
        .pending_submit
        .clone()
        .unwrap_or_else(|| (flow.login.clone(), flow.password.clone()));
    SubmitRequest::Register { email, password }
}
