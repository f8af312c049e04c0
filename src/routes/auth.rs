//! Sign-in endpoints. Tokens travel to the browser as HttpOnly cookies.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder, post, web};

use crate::auth_client::AuthClient;
use crate::dto::api::ApiResponse;
use crate::dto::auth::TokenPair;
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::run_blocking;
use crate::services::{ServiceResult, auth, profiles};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

fn token_cookie<'c>(
    config: &ServerConfig,
    name: &'c str,
    value: String,
    max_age: Duration,
) -> Cookie<'c> {
    let mut cookie = Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .max_age(max_age)
        .finish();
    if config.is_production() {
        cookie.set_same_site(SameSite::None);
        cookie.set_secure(true);
        if let Some(domain) = &config.cookie_domain {
            cookie.set_domain(domain.clone());
        }
    }
    cookie
}

fn set_token_cookies(
    response: &mut HttpResponseBuilder,
    config: &ServerConfig,
    tokens: TokenPair,
) {
    response
        .cookie(token_cookie(
            config,
            ACCESS_TOKEN_COOKIE,
            tokens.access_token,
            Duration::minutes(5),
        ))
        .cookie(token_cookie(
            config,
            REFRESH_TOKEN_COOKIE,
            tokens.refresh_token,
            Duration::hours(24),
        ));
}

#[post("/login")]
pub async fn login(
    form: web::Json<LoginForm>,
    client: web::Data<AuthClient>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let tokens = auth::login(client.get_ref(), form.into_inner()).await?;

    let mut response = HttpResponse::Ok();
    set_token_cookies(&mut response, &config, tokens);
    Ok(response.json(ApiResponse::message("login success")))
}

/// Registers the account upstream, then seeds its local profile.
#[post("/register")]
pub async fn register(
    form: web::Json<RegisterForm>,
    client: web::Data<AuthClient>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let account = auth::register(client.get_ref(), form.into_inner()).await?;
    let data = account.data.clone();
    run_blocking(config.request_timeout(), move || {
        profiles::create_registered_profile(repo.get_ref(), &account)
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("register success", data)))
}

#[post("/refresh-token")]
pub async fn refresh_token(
    req: HttpRequest,
    client: web::Data<AuthClient>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let access = req.cookie(ACCESS_TOKEN_COOKIE);
    let refresh = req.cookie(REFRESH_TOKEN_COOKIE);
    let tokens = auth::refresh_session(
        client.get_ref(),
        &config.jwt_secret,
        access.as_ref().map(|cookie| cookie.value()),
        refresh.as_ref().map(|cookie| cookie.value()),
    )
    .await?;

    let mut response = HttpResponse::Ok();
    set_token_cookies(&mut response, &config, tokens);
    Ok(response.json(ApiResponse::message("refresh token success")))
}

#[post("/logout")]
pub async fn logout(config: web::Data<ServerConfig>) -> HttpResponse {
    let mut response = HttpResponse::Ok();
    for name in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE] {
        let mut cookie = token_cookie(&config, name, String::new(), Duration::ZERO);
        cookie.make_removal();
        response.cookie(cookie);
    }
    response.json(ApiResponse::message("logout success"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(app_env: &str) -> ServerConfig {
        ServerConfig {
            app_env: app_env.to_string(),
            address: "127.0.0.1".to_string(),
            port: 8080,
            database_url: ":memory:".to_string(),
            auth_service_url: "http://auth.local".to_string(),
            jwt_secret: "secret".to_string(),
            cookie_domain: Some(".lognest.dev".to_string()),
            cors_allowed_origins: vec![],
            request_timeout_secs: 5,
        }
    }

    #[test]
    fn development_cookies_are_http_only_without_domain() {
        let cookie = token_cookie(
            &config("development"),
            ACCESS_TOKEN_COOKIE,
            "a".into(),
            Duration::minutes(5),
        );
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::minutes(5)));
        assert_eq!(cookie.secure(), None);
        assert_eq!(cookie.domain(), None);
    }

    #[test]
    fn production_cookies_are_cross_site_and_secure() {
        let cookie = token_cookie(
            &config("production"),
            REFRESH_TOKEN_COOKIE,
            "r".into(),
            Duration::hours(24),
        );
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.domain(), Some(".lognest.dev"));
    }
}
