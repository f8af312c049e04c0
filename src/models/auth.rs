//! Authenticated caller resolved from the `Authorization` header.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use serde::Serialize;

use crate::domain::types::UserId;
use crate::models::config::ServerConfig;
use crate::services::ServiceError;
use crate::token::{AuthError, Claims, bearer_token, validate_token};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
    pub role_id: u32,
    pub provider: Option<String>,
    pub session_id: Option<String>,
    pub mfa_completed: bool,
}

impl TryFrom<Claims> for AuthenticatedUser {
    type Error = AuthError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::parse(&claims.user_id).map_err(|_| AuthError::InvalidToken)?,
            email: claims.email,
            role_id: claims.role_id,
            provider: claims.provider,
            session_id: claims.session_id,
            mfa_completed: claims.mfa_completed,
        })
    }
}

/// Raw bearer token of the request, forwarded to the auth service by some handlers.
pub fn request_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AuthError::MalformedToken))
        .transpose()?;
    bearer_token(header)
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ServiceError> {
    let config = req.app_data::<web::Data<ServerConfig>>().ok_or_else(|| {
        log::error!("ServerConfig is not registered as app data");
        ServiceError::internal("internal server error")
    })?;

    let token = request_token(req)?;
    let claims = validate_token(token, &config.jwt_secret)?;
    Ok(AuthenticatedUser::try_from(claims)?)
}

impl FromRequest for AuthenticatedUser {
    type Error = ServiceError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
