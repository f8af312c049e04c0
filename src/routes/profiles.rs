use actix_web::{HttpRequest, HttpResponse, get, post, put, web};

use crate::auth_client::AuthClient;
use crate::dto::api::ApiResponse;
use crate::forms::profiles::{CreateProfileForm, UpdateProfileForm};
use crate::models::auth::{AuthenticatedUser, request_token};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::run_blocking;
use crate::services::auth::AuthProvider;
use crate::services::{ServiceResult, profiles};

#[post("")]
pub async fn create_profile(
    form: web::Json<CreateProfileForm>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let profile = run_blocking(config.request_timeout(), move || {
        profiles::create_profile(repo.get_ref(), form.into_inner())
    })
    .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("user profile created", profile)))
}

/// Profile of the caller merged with the account held by the auth service.
#[get("/me")]
pub async fn get_own_profile(
    req: HttpRequest,
    _user: AuthenticatedUser,
    auth: web::Data<AuthClient>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let token = request_token(&req)?;
    let account = auth.current_user(token).await?;
    let profile = run_blocking(config.request_timeout(), move || {
        profiles::merge_account(repo.get_ref(), account)
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("user profile found", profile)))
}

#[get("/{id}")]
pub async fn get_profile(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let profile = run_blocking(config.request_timeout(), move || {
        profiles::get_profile(repo.get_ref(), &id)
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("user profile found", profile)))
}

#[put("/{id}")]
pub async fn update_profile(
    user: AuthenticatedUser,
    id: web::Path<String>,
    form: web::Json<UpdateProfileForm>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let profile = run_blocking(config.request_timeout(), move || {
        profiles::update_profile(repo.get_ref(), &user, &id, form.into_inner())
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("user profile updated", profile)))
}
