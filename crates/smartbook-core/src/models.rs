//! Server-side account types.

use serde::{Deserialize, Serialize};

/// A confirmed account, as returned by the login call.
///
/// Handed upward to the coordinator on successful login; nothing in this
/// module retains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub subscription: Option<String>,
    pub purchases: Option<String>,
    /// Subscription expiry as an opaque server-formatted string.
    pub subscription_end: Option<String>,
    pub confirmed: bool,
    pub sharing: Option<String>,
}

/// The server's immediate answer to a registration or login request.
///
/// Superset of [`User`] with `id` optional: the account may not have been
/// confirmed by email yet, in which case no id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub id: Option<i64>,
    pub email: String,
    pub subscription: Option<String>,
    pub purchases: Option<String>,
    pub subscription_end: Option<String>,
    pub confirmed: bool,
    pub sharing: Option<String>,
}

impl User {
    /// Builds a `User` from a raw registration payload.
    ///
    /// Returns `None` when the payload carries no `id`: such an account is
    /// still awaiting email confirmation and must not be treated as a user.
    pub fn from_registration(response: RegistrationResponse) -> Option<Self> {
        let id = response.id?;
        Some(Self {
            id,
            email: response.email,
            subscription: response.subscription,
            purchases: response.purchases,
            subscription_end: response.subscription_end,
            confirmed: response.confirmed,
            sharing: response.sharing,
        })
    }
}
