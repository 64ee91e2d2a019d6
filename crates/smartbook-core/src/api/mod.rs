//! HTTP client for the authentication API.
//!
//! Read/lookup-style calls go out as GET with query parameters; login and
//! registration POST a JSON body. Every request carries the fixed `P: i`
//! header the server expects. Passwords never travel in the clear: they are
//! hashed with the salted-md5 transform the existing server requires.

mod error;

use std::future::Future;

use anyhow::{Context, Result};
use md5::{Digest, Md5};
use serde::de::DeserializeOwned;
use url::Url;

pub use error::{AuthError, AuthResult, AuthorizationError, EMAIL_NOT_VERIFIED_CODE};

use crate::config::Config;
use crate::models::{RegistrationResponse, User};

/// Fixed header attached to every request.
const CUSTOM_HEADER_NAME: &str = "P";
const CUSTOM_HEADER_VALUE: &str = "i";

/// Salt prepended to passwords before hashing. Wire-mandated; do not change.
const PASSWORD_SALT: &str = "android";

const USER_PATH: &str = "user";
const LOGIN_PATH: &str = "user/login";
const REGISTRATION_PATH: &str = "user/registration";
const PASSWORD_RESET_PATH: &str = "user/password/reset";
const CONFIRMATION_PATH: &str = "user/confirmation";

/// The request/response seam the flows consume.
///
/// `AuthClient` is the production implementation; tests substitute fakes.
pub trait AuthorizationApi: Send + Sync + 'static {
    fn get_user(&self, email: &str) -> impl Future<Output = AuthResult<User>> + Send;
    fn login(&self, email: &str, password: &str) -> impl Future<Output = AuthResult<User>> + Send;
    fn register(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = AuthResult<RegistrationResponse>> + Send;
    fn forgot_password(&self, email: &str) -> impl Future<Output = AuthResult<()>> + Send;
}

/// Authentication API client.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AuthClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be constructed.
    ///
    /// # Panics
    /// In test builds, panics if `base_url` is the production API, so unit
    /// tests cannot accidentally reach the real server.
    pub fn new(config: &Config) -> Result<Self> {
        #[cfg(test)]
        if config.base_url == crate::config::DEFAULT_BASE_URL {
            panic!(
                "Tests must not use the production auth API!\n\
                 Point base_url at a mock server.\n\
                 Found base_url: {}",
                config.base_url
            );
        }

        // Url::join treats the last path segment as a file without this.
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .with_context(|| format!("Invalid auth API base URL: {}", config.base_url))?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> AuthResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| AuthError::Transport(err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, email: &str) -> AuthResult<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(path, "auth GET");
        let response = self
            .http
            .get(url)
            .header(CUSTOM_HEADER_NAME, CUSTOM_HEADER_VALUE)
            .query(&[("email", email)])
            .send()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;
        decode(response).await
    }

    async fn post_credentials<T: DeserializeOwned>(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> AuthResult<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(path, "auth POST");
        let body = serde_json::json!({
            "email": email,
            "password": transport_password(password),
        });
        let response = self
            .http
            .post(url)
            .header(CUSTOM_HEADER_NAME, CUSTOM_HEADER_VALUE)
            .json(&body)
            .send()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;
        decode(response).await
    }

    // Reset and confirmation succeed on status alone; the body, if any, is
    // not part of the contract.
    async fn get_unit(&self, path: &str, email: &str) -> AuthResult<()> {
        let url = self.endpoint(path)?;
        tracing::debug!(path, "auth GET");
        let response = self
            .http
            .get(url)
            .header(CUSTOM_HEADER_NAME, CUSTOM_HEADER_VALUE)
            .query(&[("email", email)])
            .send()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "auth request failed");
            return Err(AuthError::from_response(status.as_u16(), &body));
        }
        Ok(())
    }

    /// Asks the server to resend the confirmation email.
    ///
    /// # Errors
    /// Returns the usual [`AuthError`] taxonomy.
    pub async fn send_confirmation(&self, email: &str) -> AuthResult<()> {
        self.get_unit(CONFIRMATION_PATH, email).await
    }
}

impl AuthorizationApi for AuthClient {
    async fn get_user(&self, email: &str) -> AuthResult<User> {
        self.get_json(USER_PATH, email).await
    }

    async fn login(&self, email: &str, password: &str) -> AuthResult<User> {
        let response: RegistrationResponse =
            self.post_credentials(LOGIN_PATH, email, password).await?;
        // A 2xx payload without an id means the account exists but the email
        // is still unverified.
        User::from_registration(response)
            .ok_or(AuthError::Authorization(AuthorizationError::EmailNotVerified))
    }

    async fn register(&self, email: &str, password: &str) -> AuthResult<RegistrationResponse> {
        self.post_credentials(REGISTRATION_PATH, email, password)
            .await
    }

    async fn forgot_password(&self, email: &str) -> AuthResult<()> {
        self.get_unit(PASSWORD_RESET_PATH, email).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> AuthResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "auth request failed");
        return Err(AuthError::from_response(status.as_u16(), &body));
    }
    response
        .json::<T>()
        .await
        .map_err(|err| AuthError::Parse(err.to_string()))
}

/// Salted-md5 transform applied to passwords before transport.
///
/// Must equal `md5("android" + password)` in lowercase hex for wire
/// compatibility with the existing server.
pub fn transport_password(password: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(PASSWORD_SALT.as_bytes());
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: the transmitted credential for "secret123" equals
    /// md5("androidsecret123").
    #[test]
    fn transport_password_matches_server_transform() {
        assert_eq!(
            transport_password("secret123"),
            "e6d3a365705d24cc619754693d522f59"
        );
        assert_eq!(
            transport_password("hunter2222"),
            "9655aa442ecad036e81534d2cff545c6"
        );
    }

    #[test]
    fn endpoints_join_onto_the_base_url() {
        let config = Config {
            base_url: "http://localhost:8080/api".to_string(),
            ..Config::default()
        };
        let client = AuthClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(LOGIN_PATH).unwrap().as_str(),
            "http://localhost:8080/api/user/login"
        );
        assert_eq!(
            client.endpoint(PASSWORD_RESET_PATH).unwrap().as_str(),
            "http://localhost:8080/api/user/password/reset"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let config = Config {
            base_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(AuthClient::new(&config).is_err());
    }
}
