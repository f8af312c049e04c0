//! HTTP client for the external auth service.

use reqwest::{Client, RequestBuilder, StatusCode, header};
use serde::de::DeserializeOwned;

use crate::domain::types::UserId;
use crate::dto::auth::{AccountUser, RegisteredAccount, TokenPair, UpstreamEnvelope};
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::models::config::ServerConfig;
use crate::services::auth::AuthProvider;
use crate::services::{ServiceError, ServiceResult};

const LOGIN_PATH: &str = "/api/auth/login";
const REGISTER_PATH: &str = "/api/auth/register";
const REFRESH_PATH: &str = "/api/auth/refresh-token";
const USER_PATH: &str = "/api/auth/user";
const REFRESH_TOKEN_HEADER: &str = "X-Refresh-Token";

/// [`AuthProvider`] backed by `reqwest`.
#[derive(Clone)]
pub struct AuthClient {
    http: Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(config: &ServerConfig) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(config.request_timeout()).build()?;
        Ok(Self {
            http,
            base_url: config.auth_service_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends `request` and decodes the `data` field of a 200 response.
    ///
    /// Any transport error or non-200 status is reported as `failure`.
    async fn send<T>(request: RequestBuilder, failure: &str) -> ServiceResult<T>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await.map_err(|e| {
            log::error!("Auth service request failed: {e}");
            ServiceError::internal(failure)
        })?;

        if response.status() != StatusCode::OK {
            log::warn!("Auth service answered {}: {failure}", response.status());
            return Err(ServiceError::internal(failure));
        }

        let envelope: UpstreamEnvelope<T> = response.json().await.map_err(|e| {
            log::error!("Could not parse auth service response: {e}");
            ServiceError::internal(failure)
        })?;

        envelope.data.ok_or_else(|| {
            log::error!("Auth service response is missing the `data` field");
            ServiceError::internal(failure)
        })
    }
}

impl AuthProvider for AuthClient {
    async fn login(&self, form: &LoginForm) -> ServiceResult<TokenPair> {
        let request = self.http.post(self.url(LOGIN_PATH)).json(form);
        Self::send(request, "failed to login").await
    }

    async fn register(&self, form: &RegisterForm) -> ServiceResult<RegisteredAccount> {
        let request = self.http.post(self.url(REGISTER_PATH)).json(form);
        let data: serde_json::Value =
            Self::send(request, "failed to register with auth service").await?;

        let user_id = data
            .get("id")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| {
                ServiceError::internal("user ID not found or not a string in auth service response")
            })
            .and_then(|id| {
                UserId::parse(id).map_err(|_| {
                    ServiceError::internal("invalid user ID format from auth service")
                })
            })?;

        Ok(RegisteredAccount { user_id, data })
    }

    async fn refresh(&self, access_token: &str, refresh_token: &str) -> ServiceResult<TokenPair> {
        let request = self
            .http
            .post(self.url(REFRESH_PATH))
            .bearer_auth(access_token)
            .header(REFRESH_TOKEN_HEADER, refresh_token)
            .header(header::CONTENT_TYPE, "application/json");
        Self::send(request, "failed to refresh token").await
    }

    async fn current_user(&self, access_token: &str) -> ServiceResult<AccountUser> {
        let request = self.http.get(self.url(USER_PATH)).bearer_auth(access_token);
        Self::send(request, "failed to get user").await
    }
}
