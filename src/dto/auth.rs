//! Payloads of the external auth service.

use serde::{Deserialize, Serialize};

use crate::domain::types::UserId;

/// Envelope wrapping every auth service response.
#[derive(Debug, Deserialize)]
pub struct UpstreamEnvelope<T> {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Account record owned by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub avatar_path: String,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub mfa_enabled: bool,
    #[serde(default)]
    pub role_id: u32,
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredAccount {
    pub user_id: UserId,
    /// Account data as returned upstream, echoed back to the caller.
    pub data: serde_json::Value,
}
