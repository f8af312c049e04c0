use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::dto::api::ApiResponse;
use crate::forms::interactions::{CommentForm, LikeForm, UpdateCommentForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::pagination::PaginationRequest;
use crate::repository::DieselRepository;
use crate::routes::run_blocking;
use crate::services::{ServiceResult, interactions};

#[post("/likes")]
pub async fn like_log(
    user: AuthenticatedUser,
    form: web::Json<LikeForm>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let like = run_blocking(config.request_timeout(), move || {
        interactions::like_log(repo.get_ref(), &user, form.into_inner())
    })
    .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("like created", like)))
}

#[delete("/likes/{log_id}")]
pub async fn unlike_log(
    user: AuthenticatedUser,
    log_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    run_blocking(config.request_timeout(), move || {
        interactions::unlike_log(repo.get_ref(), &user, &log_id)
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("like deleted")))
}

#[get("/likes/logs/{log_id}")]
pub async fn list_likes(
    _user: AuthenticatedUser,
    log_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let likes = run_blocking(config.request_timeout(), move || {
        interactions::list_likes(repo.get_ref(), &log_id)
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("likes found", likes)))
}

#[post("/comments")]
pub async fn create_comment(
    user: AuthenticatedUser,
    form: web::Json<CommentForm>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let comment = run_blocking(config.request_timeout(), move || {
        interactions::create_comment(repo.get_ref(), &user, form.into_inner())
    })
    .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("comment created", comment)))
}

#[put("/comments/{id}")]
pub async fn update_comment(
    user: AuthenticatedUser,
    id: web::Path<String>,
    form: web::Json<UpdateCommentForm>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let comment = run_blocking(config.request_timeout(), move || {
        interactions::update_comment(repo.get_ref(), &user, &id, form.into_inner())
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("comment updated", comment)))
}

#[delete("/comments/{id}")]
pub async fn delete_comment(
    user: AuthenticatedUser,
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    run_blocking(config.request_timeout(), move || {
        interactions::delete_comment(repo.get_ref(), &user, &id)
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("comment deleted")))
}

#[get("/comments/logs/{log_id}")]
pub async fn list_comments(
    _user: AuthenticatedUser,
    log_id: web::Path<String>,
    query: web::Query<PaginationRequest>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let page = run_blocking(config.request_timeout(), move || {
        interactions::list_comments(repo.get_ref(), &log_id, query.into_inner())
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated("comments found", page)))
}
