//! Login flow.

mod state;
mod update;

pub use state::{LoginFlow, LoginSnapshot};
pub use update::LoginEvent;

use smartbook_core::api::AuthResult;

use crate::effects::{Field, FlowEffect, SubmitOutcome};
use crate::flow::Flow;

impl Flow for LoginFlow {
    type Event = LoginEvent;
    type Snapshot = LoginSnapshot;

    fn handle(&mut self, event: LoginEvent) -> Vec<FlowEffect> {
        update::update(self, event)
    }

    fn snapshot(&self) -> LoginSnapshot {
        LoginFlow::snapshot(self)
    }

    fn submit_finished(outcome: AuthResult<SubmitOutcome>) -> LoginEvent {
        LoginEvent::SubmitFinished(outcome)
    }

    fn validation_due(field: Field, generation: u64) -> LoginEvent {
        LoginEvent::ValidationDue { field, generation }
    }
}
