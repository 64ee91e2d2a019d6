//! Flow driver - owns a state container, runs its event loop, executes
//! effects.
//!
//! This is the side-effect boundary: reducers stay pure and produce effects;
//! this module executes them. Events (user intents and async completions)
//! are delivered to the container strictly serially, so reducers need no
//! locking. Completions re-enter through an internal channel that is drained
//! ahead of newer user intents.
//!
//! Everything the driver spawns is scoped to a cancellation token; dropping
//! the [`FlowHandle`] cancels it, so no callback can outlive the screen that
//! owned the flow.

use std::sync::Arc;
use std::time::Duration;

use smartbook_core::api::{AuthError, AuthorizationApi};
use smartbook_core::config::Config;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::effects::{FlowEffect, FlowOutcome, NavigationIntent, SubmitOutcome, SubmitRequest};
use crate::flow::Flow;

/// URL that asks the OS to bring up the default mail client.
const MAIL_CLIENT_URL: &str = "message://";

/// Runtime knobs for a flow driver.
#[derive(Debug, Clone)]
pub struct FlowOptions {
    /// How long after the last edit a field is revalidated.
    pub validation_debounce: Duration,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            validation_debounce: Duration::from_millis(
                smartbook_core::config::DEFAULT_VALIDATION_DEBOUNCE_MS,
            ),
        }
    }
}

impl FlowOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            validation_debounce: Duration::from_millis(config.validation_debounce_ms),
        }
    }
}

/// Discrete signals a flow emits for the coordinator/presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutput {
    /// A dismissible error message. The form has already re-enabled (or a
    /// retry is in flight); no action is required beyond presenting it.
    Error(AuthError),
    /// One-shot informational message (registration success notice).
    Notice { title: String, message: String },
    /// The user asked to go somewhere else; the coordinator navigates.
    Navigate(NavigationIntent),
    /// The flow concluded; the coordinator tears the screen down.
    Completed(FlowOutcome),
}

/// Handle to a running flow.
///
/// Dropping the handle tears the flow down: the driver stops and all
/// outstanding timers and network waits are cancelled.
pub struct FlowHandle<F: Flow> {
    intents: mpsc::Sender<F::Event>,
    outputs: mpsc::Receiver<FlowOutput>,
    snapshots: watch::Receiver<F::Snapshot>,
    cancel: CancellationToken,
}

impl<F: Flow> FlowHandle<F> {
    /// Sends a user intent to the flow. Returns `false` if the driver has
    /// already stopped.
    pub async fn send(&self, event: F::Event) -> bool {
        self.intents.send(event).await.is_ok()
    }

    /// The current derived state.
    pub fn snapshot(&self) -> F::Snapshot {
        self.snapshots.borrow().clone()
    }

    /// A watch receiver for observing snapshot changes.
    pub fn snapshots(&self) -> watch::Receiver<F::Snapshot> {
        self.snapshots.clone()
    }

    /// Waits for the next discrete output. Returns `None` once the flow has
    /// stopped and the channel drained.
    pub async fn next_output(&mut self) -> Option<FlowOutput> {
        self.outputs.recv().await
    }
}

impl<F: Flow> Drop for FlowHandle<F> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Spawns the driver for a flow. Must be called within a tokio runtime.
pub fn spawn_flow<F, A>(mut flow: F, api: Arc<A>, options: FlowOptions) -> FlowHandle<F>
where
    F: Flow + Send + 'static,
    A: AuthorizationApi,
{
    let (intent_tx, mut intent_rx) = mpsc::channel::<F::Event>(32);
    let (internal_tx, mut internal_rx) = mpsc::unbounded_channel::<F::Event>();
    let (output_tx, output_rx) = mpsc::channel::<FlowOutput>(32);
    let (snapshot_tx, snapshot_rx) = watch::channel(flow.snapshot());
    let cancel = CancellationToken::new();

    let task_cancel = cancel.clone();
    tokio::spawn(async move {
        loop {
            let event = tokio::select! {
                // Completions land before newer user intents.
                biased;
                () = task_cancel.cancelled() => break,
                Some(event) = internal_rx.recv() => event,
                event = intent_rx.recv() => match event {
                    Some(event) => event,
                    None => break,
                },
            };

            let effects = flow.handle(event);
            let _ = snapshot_tx.send(flow.snapshot());
            for effect in effects {
                execute::<F, A>(
                    effect,
                    &api,
                    &internal_tx,
                    &output_tx,
                    &options,
                    &task_cancel,
                )
                .await;
            }
        }
        tracing::debug!("flow driver stopped");
    });

    FlowHandle {
        intents: intent_tx,
        outputs: output_rx,
        snapshots: snapshot_rx,
        cancel,
    }
}

async fn execute<F, A>(
    effect: FlowEffect,
    api: &Arc<A>,
    internal_tx: &mpsc::UnboundedSender<F::Event>,
    output_tx: &mpsc::Sender<FlowOutput>,
    options: &FlowOptions,
    cancel: &CancellationToken,
) where
    F: Flow + Send + 'static,
    A: AuthorizationApi,
{
    match effect {
        FlowEffect::Submit(request) => {
            let api = Arc::clone(api);
            let tx = internal_tx.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move {
                let call = async {
                    match request {
                        SubmitRequest::Login { email, password } => api
                            .login(&email, &password)
                            .await
                            .map(SubmitOutcome::LoggedIn),
                        SubmitRequest::Register { email, password } => api
                            .register(&email, &password)
                            .await
                            .map(SubmitOutcome::Registered),
                        SubmitRequest::ResetPassword { email } => api
                            .forgot_password(&email)
                            .await
                            .map(|()| SubmitOutcome::ResetSent),
                    }
                };
                tokio::select! {
                    () = cancel.cancelled() => {}
                    outcome = call => {
                        let _ = tx.send(F::submit_finished(outcome));
                    }
                }
            });
        }
        FlowEffect::ScheduleValidation { field, generation } => {
            let tx = internal_tx.clone();
            let cancel = cancel.clone();
            let delay = options.validation_debounce;
            tokio::spawn(async move {
                tokio::select! {
                    () = cancel.cancelled() => {}
                    () = tokio::time::sleep(delay) => {
                        let _ = tx.send(F::validation_due(field, generation));
                    }
                }
            });
        }
        FlowEffect::OpenMailClient => {
            // Best effort; the flow completes whether or not a client opens.
            if let Err(err) = open::that(MAIL_CLIENT_URL) {
                tracing::warn!(error = %err, "could not open mail client");
            }
        }
        FlowEffect::Navigate(intent) => {
            let _ = output_tx.send(FlowOutput::Navigate(intent)).await;
        }
        FlowEffect::Complete(outcome) => {
            let _ = output_tx.send(FlowOutput::Completed(outcome)).await;
        }
        FlowEffect::PresentError(error) => {
            let _ = output_tx.send(FlowOutput::Error(error)).await;
        }
        FlowEffect::Notice { title, message } => {
            let _ = output_tx.send(FlowOutput::Notice { title, message }).await;
        }
    }
}
