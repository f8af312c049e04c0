//! Verification of the HMAC-signed JWTs issued by the auth service.

use std::collections::HashSet;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("unauthorized, no token provided")]
    MissingToken,
    #[error("unauthorized, invalid token format")]
    MalformedToken,
    #[error("unauthorized, invalid token")]
    InvalidToken,
}

/// Claims carried by access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    pub email: String,
    pub role_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(rename = "sid", default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(rename = "mfa", default)]
    pub mfa_completed: bool,
    pub exp: i64,
}

fn validation(check_expiry: bool) -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = HMAC_ALGORITHMS.to_vec();
    validation.validate_exp = check_expiry;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::from(["exp".to_string()]);
    validation
}

fn decode_claims(token: &str, secret: &str, check_expiry: bool) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(check_expiry),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        log::debug!("Rejected token: {e}");
        AuthError::InvalidToken
    })
}

/// Verifies signature and expiry.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    decode_claims(token, secret, true)
}

/// Verifies the signature of a possibly expired token, used by the refresh flow.
///
/// The token must still be HMAC-signed with `secret` and carry an `exp` claim.
pub fn parse_expired_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    decode_claims(token, secret, false)
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = match header {
        Some(header) if !header.is_empty() => header,
        _ => return Err(AuthError::MissingToken),
    };

    match header.split(' ').collect::<Vec<_>>().as_slice() {
        ["Bearer", token] if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedToken),
    }
}
