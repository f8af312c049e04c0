//! Sign-in flows delegated to the external auth service.
//!
//! [`AuthProvider`] abstracts the HTTP client so the flows can be exercised
//! without a running auth service. Creating the profile of a freshly
//! registered account is a repository concern and lives in
//! [`crate::services::profiles`].

use std::future::Future;

use validator::Validate;

use crate::dto::auth::{AccountUser, RegisteredAccount, TokenPair};
use crate::forms::FormError;
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::services::{ServiceError, ServiceResult};
use crate::token::parse_expired_token;

/// Operations offered by the auth service.
pub trait AuthProvider {
    fn login(&self, form: &LoginForm) -> impl Future<Output = ServiceResult<TokenPair>> + Send;

    fn register(
        &self,
        form: &RegisterForm,
    ) -> impl Future<Output = ServiceResult<RegisteredAccount>> + Send;

    fn refresh(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> impl Future<Output = ServiceResult<TokenPair>> + Send;

    /// Resolves the account behind `access_token`.
    fn current_user(
        &self,
        access_token: &str,
    ) -> impl Future<Output = ServiceResult<AccountUser>> + Send;
}

pub async fn login<P>(provider: &P, form: LoginForm) -> ServiceResult<TokenPair>
where
    P: AuthProvider + ?Sized,
{
    form.validate().map_err(FormError::from)?;
    provider.login(&form).await
}

pub async fn register<P>(provider: &P, form: RegisterForm) -> ServiceResult<RegisteredAccount>
where
    P: AuthProvider + ?Sized,
{
    form.validate().map_err(FormError::from)?;
    provider.register(&form).await
}

/// Exchanges the cookie-held token pair for a new one.
///
/// The access token may be expired but must still carry a valid signature.
pub async fn refresh_session<P>(
    provider: &P,
    jwt_secret: &str,
    access_token: Option<&str>,
    refresh_token: Option<&str>,
) -> ServiceResult<TokenPair>
where
    P: AuthProvider + ?Sized,
{
    let access_token = access_token.filter(|token| !token.is_empty()).ok_or_else(|| {
        ServiceError::Unauthorized("unauthorized, no access token provided".to_string())
    })?;
    let refresh_token = refresh_token.filter(|token| !token.is_empty()).ok_or_else(|| {
        ServiceError::Unauthorized("unauthorized, no refresh token provided".to_string())
    })?;

    parse_expired_token(access_token, jwt_secret)?;
    provider.refresh(access_token, refresh_token).await
}
