//! The seam between flow state containers and the runtime.

use smartbook_core::api::AuthResult;

use crate::effects::{Field, FlowEffect, SubmitOutcome};

/// A screen-level flow state container.
///
/// Implementations mutate their state in `handle` and return effects for the
/// runtime to execute; derived presentation fields are recomputed on each
/// transition via `snapshot`.
pub trait Flow {
    /// The flow's typed event/intent enum. User intents and runtime
    /// completions share the one enum so events are delivered serially.
    type Event: Send + 'static;
    /// Immutable derived state read by the presentation layer.
    type Snapshot: Clone + Send + Sync + 'static;

    /// Applies one event and returns the effects it caused.
    fn handle(&mut self, event: Self::Event) -> Vec<FlowEffect>;

    /// Derived fields for the current state.
    fn snapshot(&self) -> Self::Snapshot;

    /// Wraps a finished submit into this flow's event type.
    fn submit_finished(outcome: AuthResult<SubmitOutcome>) -> Self::Event;

    /// Wraps an elapsed debounce timer into this flow's event type.
    fn validation_due(field: Field, generation: u64) -> Self::Event;
}
