//! Password recovery flow.

mod state;
mod update;

pub use state::{RecoveryFlow, RecoverySnapshot, RecoveryState};
pub use update::RecoveryEvent;

use smartbook_core::api::AuthResult;

use crate::effects::{Field, FlowEffect, SubmitOutcome};
use crate::flow::Flow;

impl Flow for RecoveryFlow {
    type Event = RecoveryEvent;
    type Snapshot = RecoverySnapshot;

    fn handle(&mut self, event: RecoveryEvent) -> Vec<FlowEffect> {
        update::update(self, event)
    }

    fn snapshot(&self) -> RecoverySnapshot {
        RecoveryFlow::snapshot(self)
    }

    fn submit_finished(outcome: AuthResult<SubmitOutcome>) -> RecoveryEvent {
        RecoveryEvent::SubmitFinished(outcome)
    }

    fn validation_due(_field: Field, generation: u64) -> RecoveryEvent {
        RecoveryEvent::ValidationDue { generation }
    }
}
