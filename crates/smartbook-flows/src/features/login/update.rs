//! Login flow reducer.
//!
//! Validation errors are values threaded through the snapshot; network
//! failures are republished as effects and retried up to the configured cap
//! so the submit capability survives every failure.

use smartbook_core::api::AuthResult;
use smartbook_core::validation::ValidationResult;

use super::state::LoginFlow;
use crate::effects::{Field, FlowEffect, FlowOutcome, NavigationIntent, SubmitOutcome, SubmitRequest};

/// Everything that can happen to the login screen.
#[derive(Debug)]
pub enum LoginEvent {
    LoginChanged(String),
    PasswordChanged(String),
    LoginButtonTapped,
    RegisterButtonTapped,
    ForgotPasswordButtonTapped,
    /// Debounce timer elapsed for a field edit.
    ValidationDue { field: Field, generation: u64 },
    /// The spawned login call finished.
    SubmitFinished(AuthResult<SubmitOutcome>),
}

pub fn update(flow: &mut LoginFlow, event: LoginEvent) -> Vec<FlowEffect> {
    match event {
        LoginEvent::LoginChanged(text) => {
            flow.login = text;
            flow.login_generation += 1;
            // Typing clears the inline error; the debounced revalidation
            // brings it back if the text is still wrong.
            flow.login_validation = ValidationResult::Success;
            vec![FlowEffect::ScheduleValidation {
                field: Field::Login,
                generation: flow.login_generation,
            }]
        }
        LoginEvent::PasswordChanged(text) => {
            flow.password = text;
            flow.password_generation += 1;
            flow.password_validation = ValidationResult::Success;
            vec![FlowEffect::ScheduleValidation {
                field: Field::Password,
                generation: flow.password_generation,
            }]
        }
        LoginEvent::ValidationDue { field, generation } => {
            match field {
                Field::Login if generation == flow.login_generation => {
                    flow.login_validation = flow.login_validator.validate(&flow.login);
                }
                Field::Password if generation == flow.password_generation => {
                    flow.password_validation = flow.password_validator.validate(&flow.password);
                }
                // Stale timer: the field changed again after this was armed.
                _ => {}
            }
            vec![]
        }
        LoginEvent::LoginButtonTapped => {
            if flow.in_flight {
                return vec![];
            }
            flow.login_validation = flow.login_validator.validate(&flow.login);
            flow.password_validation = flow.password_validator.validate(&flow.password);
            if !flow.login_validation.is_valid() || !flow.password_validation.is_valid() {
                return vec![];
            }
            flow.pending_submit = Some((flow.login.clone(), flow.password.clone()));
            flow.in_flight = true;
            flow.attempt = 1;
            vec![FlowEffect::Submit(submit_request(flow))]
        }
        LoginEvent::RegisterButtonTapped => {
            vec![FlowEffect::Navigate(NavigationIntent::Registration)]
        }
        LoginEvent::ForgotPasswordButtonTapped => {
            vec![FlowEffect::Navigate(NavigationIntent::PasswordRecovery)]
        }
        LoginEvent::SubmitFinished(Ok(SubmitOutcome::LoggedIn(user))) => {
            flow.in_flight = false;
            flow.attempt = 0;
            flow.pending_submit = None;
            tracing::info!(user_id = user.id, "login completed");
            vec![FlowEffect::Complete(FlowOutcome::LoggedIn(user))]
        }
        LoginEvent::SubmitFinished(Ok(_)) => {
            tracing::warn!("unexpected submit outcome for login flow");
            flow.in_flight = false;
            flow.attempt = 0;
            flow.pending_submit = None;
            vec![]
        }
        LoginEvent::SubmitFinished(Err(error)) => {
            let mut effects = vec![FlowEffect::PresentError(error)];
            if flow.attempt < flow.max_submit_attempts {
                flow.attempt += 1;
                tracing::warn!(attempt = flow.attempt, "login failed, retrying");
                effects.push(FlowEffect::Submit(submit_request(flow)));
            } else {
                // Attempt cap reached: re-enable the form.
                flow.in_flight = false;
                flow.attempt = 0;
                flow.pending_submit = None;
            }
            effects
        }
    }
}

fn submit_request(flow: &LoginFlow) -> SubmitRequest {
    let (email, password) = flow
        .pending_submit
        .clone()
        .unwrap_or_else(|| (flow.login.clone(), flow.password.clone()));
    SubmitRequest::Login { email, password }
}
