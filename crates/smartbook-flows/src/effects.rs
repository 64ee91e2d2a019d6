//! Flow effect types.
//!
//! Effects are commands returned by a flow reducer for the runtime to
//! execute. They represent I/O and outward signals only; reducers never
//! perform I/O or spawn tasks directly.

use smartbook_core::api::AuthError;
use smartbook_core::models::{RegistrationResponse, User};

/// A validated form field, for debounce bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Login,
    Password,
    Email,
}

/// A network call the runtime issues on behalf of a flow.
///
/// Credentials are captured at tap time; a retry reissues the identical
/// request even if the user has edited the form since.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    Login { email: String, password: String },
    Register { email: String, password: String },
    ResetPassword { email: String },
}

/// Completion payload of a [`SubmitRequest`], fed back in as an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    LoggedIn(User),
    Registered(RegistrationResponse),
    ResetSent,
}

/// Where the coordinator should go next. Flows never navigate themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    Login,
    Registration,
    PasswordRecovery,
}

/// Terminal signal of a flow; the coordinator tears the screen down on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Login succeeded; ownership of the user passes to the caller.
    LoggedIn(User),
    /// Registration was submitted and the success notice acknowledged.
    Registered,
    /// The recovery mail was sent and the user acknowledged the final screen.
    PasswordRecovered,
}

/// Commands returned by flow reducers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEffect {
    /// Issue (or reissue) a network call.
    Submit(SubmitRequest),
    /// Arm the debounce timer for a field edit. The timer fires a
    /// `ValidationDue` event carrying the same generation; the reducer drops
    /// it if the field changed again in the meantime.
    ScheduleValidation { field: Field, generation: u64 },
    /// Best-effort attempt to open the device mail client.
    OpenMailClient,
    /// Forward a navigation intent to the coordinator.
    Navigate(NavigationIntent),
    /// Signal flow completion to the coordinator.
    Complete(FlowOutcome),
    /// Publish a dismissible error to the presentation layer.
    PresentError(AuthError),
    /// Publish a one-shot informational message.
    Notice { title: String, message: String },
}
