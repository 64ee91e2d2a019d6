//! Registration flow.

mod state;
mod update;

pub use state::{RegistrationFlow, RegistrationSnapshot};
pub use update::RegistrationEvent;

use smartbook_core::api::AuthResult;

use crate::effects::{Field, FlowEffect, SubmitOutcome};
use crate::flow::Flow;

impl Flow for RegistrationFlow {
    type Event = RegistrationEvent;
    type Snapshot = RegistrationSnapshot;

    fn handle(&mut self, event: RegistrationEvent) -> Vec<FlowEffect> {
        update::update(self, event)
    }

    fn snapshot(&self) -> RegistrationSnapshot {
        RegistrationFlow::snapshot(self)
    }

    fn submit_finished(outcome: AuthResult<SubmitOutcome>) -> RegistrationEvent {
        RegistrationEvent::SubmitFinished(outcome)
    }

    fn validation_due(field: Field, generation: u64) -> RegistrationEvent {
        RegistrationEvent::ValidationDue { field, generation }
    }
}
