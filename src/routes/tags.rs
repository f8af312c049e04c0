use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::dto::api::ApiResponse;
use crate::forms::tags::TagForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::pagination::PaginationRequest;
use crate::repository::DieselRepository;
use crate::routes::run_blocking;
use crate::services::{ServiceResult, tags};

#[get("")]
pub async fn list_tags(
    _user: AuthenticatedUser,
    query: web::Query<PaginationRequest>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let page = run_blocking(config.request_timeout(), move || {
        tags::list_tags(repo.get_ref(), query.into_inner())
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated("tags found", page)))
}

#[get("/{id}")]
pub async fn get_tag(
    _user: AuthenticatedUser,
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let tag = run_blocking(config.request_timeout(), move || {
        tags::get_tag(repo.get_ref(), &id)
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("tag found", tag)))
}

#[post("")]
pub async fn create_tag(
    _user: AuthenticatedUser,
    form: web::Json<TagForm>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let tag = run_blocking(config.request_timeout(), move || {
        tags::create_tag(repo.get_ref(), form.into_inner())
    })
    .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("tag created", tag)))
}

#[put("/{id}")]
pub async fn update_tag(
    _user: AuthenticatedUser,
    id: web::Path<String>,
    form: web::Json<TagForm>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let tag = run_blocking(config.request_timeout(), move || {
        tags::update_tag(repo.get_ref(), &id, form.into_inner())
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("tag updated", tag)))
}

#[delete("/{id}")]
pub async fn delete_tag(
    _user: AuthenticatedUser,
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    run_blocking(config.request_timeout(), move || {
        tags::delete_tag(repo.get_ref(), &id)
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("tag deleted")))
}
