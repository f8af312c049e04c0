//! Configuration model loaded from external sources.

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const PRODUCTION_ENV: &str = "production";

fn default_request_timeout_secs() -> u64 {
    5
}

#[derive(Clone, Debug, Deserialize)]
/// Immutable settings shared with every handler through `web::Data`.
pub struct ServerConfig {
    pub app_env: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Base URL of the external auth service, without a trailing slash.
    pub auth_service_url: String,
    /// Shared HMAC secret used to verify access tokens.
    pub jwt_secret: String,
    #[serde(default)]
    pub cookie_domain: Option<String>,
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Layers `config/default`, `config/{APP_ENV}` and `APP_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        Config::builder()
            .set_default("app_env", app_env.clone())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins"),
            )
            .build()?
            .try_deserialize()
    }

    pub fn is_production(&self) -> bool {
        self.app_env == PRODUCTION_ENV
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn auth_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.auth_service_url.trim_end_matches('/'), path)
    }
}
