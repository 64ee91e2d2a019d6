//! Integration tests driving real flows through the async driver against a
//! scripted fake of the auth API.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use smartbook_core::api::{AuthError, AuthResult, AuthorizationApi, AuthorizationError};
use smartbook_core::models::{RegistrationResponse, User};
use smartbook_flows::effects::FlowOutcome;
use smartbook_flows::login::{LoginEvent, LoginFlow};
use smartbook_flows::registration::{RegistrationEvent, RegistrationFlow};
use smartbook_flows::strings::{LoginStrings, RegistrationStrings};
use smartbook_flows::{FlowOptions, FlowOutput, spawn_flow};
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

#[derive(Default)]
struct FakeApi {
    login_results: Mutex<VecDeque<AuthResult<User>>>,
    register_results: Mutex<VecDeque<AuthResult<RegistrationResponse>>>,
    reset_results: Mutex<VecDeque<AuthResult<()>>>,
    login_calls: AtomicUsize,
}

impl FakeApi {
    fn script_login(&self, result: AuthResult<User>) {
        self.login_results.lock().unwrap().push_back(result);
    }

    fn script_register(&self, result: AuthResult<RegistrationResponse>) {
        self.register_results.lock().unwrap().push_back(result);
    }
}

fn unscripted<T>() -> AuthResult<T> {
    Err(AuthError::Transport("unscripted call".to_string()))
}

impl AuthorizationApi for FakeApi {
    async fn get_user(&self, _email: &str) -> AuthResult<User> {
        unscripted()
    }

    async fn login(&self, _email: &str, _password: &str) -> AuthResult<User> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.login_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn register(&self, _email: &str, _password: &str) -> AuthResult<RegistrationResponse> {
        self.register_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }

    async fn forgot_password(&self, _email: &str) -> AuthResult<()> {
        self.reset_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(unscripted)
    }
}

fn user() -> User {
    User {
        id: 7,
        email: "reader@example.com".to_string(),
        subscription: None,
        purchases: None,
        subscription_end: None,
        confirmed: true,
        sharing: None,
    }
}

fn unconfirmed_response() -> RegistrationResponse {
    RegistrationResponse {
        id: None,
        email: "reader@example.com".to_string(),
        subscription: None,
        purchases: None,
        subscription_end: None,
        confirmed: false,
        sharing: None,
    }
}

/// Test: a 403-classified failure surfaces as `WrongPassword` on the output
/// channel and the call is reissued without further user action.
#[tokio::test(start_paused = true)]
async fn login_retries_failed_call_then_completes() {
    let api = Arc::new(FakeApi::default());
    api.script_login(Err(AuthError::Authorization(
        AuthorizationError::WrongPassword,
    )));
    api.script_login(Ok(user()));

    let mut handle = spawn_flow(
        LoginFlow::new(LoginStrings::default(), 3),
        Arc::clone(&api),
        FlowOptions::default(),
    );
    assert!(
        handle
            .send(LoginEvent::LoginChanged("reader@example.com".to_string()))
            .await
    );
    assert!(
        handle
            .send(LoginEvent::PasswordChanged("secret123".to_string()))
            .await
    );
    assert!(handle.send(LoginEvent::LoginButtonTapped).await);

    let first = timeout(WAIT, handle.next_output()).await.unwrap().unwrap();
    assert_eq!(
        first,
        FlowOutput::Error(AuthError::Authorization(AuthorizationError::WrongPassword))
    );

    let second = timeout(WAIT, handle.next_output()).await.unwrap().unwrap();
    assert_eq!(second, FlowOutput::Completed(FlowOutcome::LoggedIn(user())));

    assert_eq!(api.login_calls.load(Ordering::SeqCst), 2);
}

/// Test: validation errors surface one debounce window after the last edit.
#[tokio::test(start_paused = true)]
async fn debounced_validation_fires_after_the_window() {
    let api = Arc::new(FakeApi::default());
    let handle = spawn_flow(
        LoginFlow::new(LoginStrings::default(), 3),
        api,
        FlowOptions {
            validation_debounce: Duration::from_millis(500),
        },
    );
    let mut snapshots = handle.snapshots();

    assert!(
        handle
            .send(LoginEvent::LoginChanged("not-an-email".to_string()))
            .await
    );

    let snapshot = timeout(WAIT, async {
        loop {
            snapshots.changed().await.unwrap();
            let snapshot = snapshots.borrow_and_update().clone();
            if !snapshot.login_validation.is_valid() {
                break snapshot;
            }
        }
    })
    .await
    .unwrap();

    assert_eq!(
        snapshot.login_validation,
        smartbook_core::validation::ValidationResult::Error("Wrong email format".to_string())
    );
}

/// Test: registration publishes the success notice, then completes once the
/// notice is acknowledged.
#[tokio::test(start_paused = true)]
async fn registration_notice_then_completion() {
    let api = Arc::new(FakeApi::default());
    api.script_register(Ok(unconfirmed_response()));

    let mut handle = spawn_flow(
        RegistrationFlow::new(RegistrationStrings::default(), 3),
        api,
        FlowOptions::default(),
    );
    assert!(
        handle
            .send(RegistrationEvent::LoginChanged(
                "reader@example.com".to_string()
            ))
            .await
    );
    assert!(
        handle
            .send(RegistrationEvent::PasswordChanged("secret123".to_string()))
            .await
    );
    assert!(
        handle
            .send(RegistrationEvent::PrivacyPolicyChanged(true))
            .await
    );
    assert!(handle.send(RegistrationEvent::RegisterButtonTapped).await);

    let notice = timeout(WAIT, handle.next_output()).await.unwrap().unwrap();
    assert_eq!(
        notice,
        FlowOutput::Notice {
            title: "Success".to_string(),
            message: "Please confirm your email address to complete registration".to_string(),
        }
    );

    assert!(
        handle
            .send(RegistrationEvent::SuccessMessageAcknowledged)
            .await
    );
    let completed = timeout(WAIT, handle.next_output()).await.unwrap().unwrap();
    assert_eq!(completed, FlowOutput::Completed(FlowOutcome::Registered));
}

/// Test: dropping the handle tears the driver down (watch sender dropped).
#[tokio::test(start_paused = true)]
async fn dropping_the_handle_stops_the_driver() {
    let api = Arc::new(FakeApi::default());
    let handle = spawn_flow(
        LoginFlow::new(LoginStrings::default(), 3),
        api,
        FlowOptions::default(),
    );
    let mut snapshots = handle.snapshots();
    drop(handle);

    timeout(WAIT, async {
        while snapshots.changed().await.is_ok() {}
    })
    .await
    .unwrap();
}
