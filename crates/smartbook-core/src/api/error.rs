//! Auth API error taxonomy.
//!
//! Server-signaled authorization failures form a closed set keyed by HTTP
//! status code; everything else passes through unclassified. No variant is
//! fatal: the flows republish these on their output channel and keep the
//! submit capability alive.

use std::fmt;

/// Status code the client assigns to a login payload that arrived with a 2xx
/// status but no user id. Not a wire value.
pub const EMAIL_NOT_VERIFIED_CODE: i32 = -999;

/// Closed set of server-signaled authorization failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationError {
    UserAlreadyExists,
    WrongPassword,
    UserNotFound,
    /// Synthesized locally when a successful login payload has no user id.
    EmailNotVerified,
}

impl AuthorizationError {
    /// Classifies an HTTP status code, if it belongs to the closed set.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            401 => Some(Self::UserAlreadyExists),
            403 => Some(Self::WrongPassword),
            404 => Some(Self::UserNotFound),
            _ => None,
        }
    }

    /// The numeric code this variant is keyed by.
    pub fn code(self) -> i32 {
        match self {
            Self::UserAlreadyExists => 401,
            Self::WrongPassword => 403,
            Self::UserNotFound => 404,
            Self::EmailNotVerified => EMAIL_NOT_VERIFIED_CODE,
        }
    }
}

impl fmt::Display for AuthorizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::UserAlreadyExists => "user already exists",
            Self::WrongPassword => "wrong password",
            Self::UserNotFound => "user not found",
            Self::EmailNotVerified => "email not verified",
        };
        write!(f, "{message}")
    }
}

impl std::error::Error for AuthorizationError {}

/// Structured error from the auth API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Classified server-signaled failure.
    Authorization(AuthorizationError),
    /// HTTP status outside the classified set (4xx, 5xx).
    Http { status: u16, body: Option<String> },
    /// Connection-level failure (DNS, TLS, reset, timeout when configured).
    Transport(String),
    /// The response body did not decode as the expected shape.
    Parse(String),
}

impl AuthError {
    /// Creates an HTTP status error, classifying known codes.
    pub fn from_response(status: u16, body: &str) -> Self {
        if let Some(classified) = AuthorizationError::from_status(status) {
            return Self::Authorization(classified);
        }
        Self::Http {
            status,
            body: if body.is_empty() {
                None
            } else {
                Some(body.to_string())
            },
        }
    }

    /// The classified authorization failure, if this is one.
    pub fn authorization(&self) -> Option<AuthorizationError> {
        match self {
            Self::Authorization(inner) => Some(*inner),
            _ => None,
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authorization(inner) => write!(f, "{inner}"),
            Self::Http { status, body: None } => write!(f, "HTTP {status}"),
            Self::Http {
                status,
                body: Some(body),
            } => write!(f, "HTTP {status}: {body}"),
            Self::Transport(message) => write!(f, "transport error: {message}"),
            Self::Parse(message) => write!(f, "malformed response: {message}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<AuthorizationError> for AuthError {
    fn from(inner: AuthorizationError) -> Self {
        Self::Authorization(inner)
    }
}

/// Result type for auth API operations.
pub type AuthResult<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classified_statuses_map_to_closed_set() {
        assert_eq!(
            AuthorizationError::from_status(401),
            Some(AuthorizationError::UserAlreadyExists)
        );
        assert_eq!(
            AuthorizationError::from_status(403),
            Some(AuthorizationError::WrongPassword)
        );
        assert_eq!(
            AuthorizationError::from_status(404),
            Some(AuthorizationError::UserNotFound)
        );
        assert_eq!(AuthorizationError::from_status(500), None);
    }

    #[test]
    fn unclassified_status_keeps_body() {
        let err = AuthError::from_response(503, "overloaded");
        assert_eq!(
            err,
            AuthError::Http {
                status: 503,
                body: Some("overloaded".to_string())
            }
        );
        assert!(err.authorization().is_none());
    }

    #[test]
    fn email_not_verified_uses_synthesized_code() {
        assert_eq!(AuthorizationError::EmailNotVerified.code(), -999);
        assert_eq!(AuthorizationError::WrongPassword.code(), 403);
    }
}
