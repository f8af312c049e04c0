use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::dto::api::ApiResponse;
use crate::forms::logs::{CreateLogForm, UpdateLogForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::pagination::PaginationRequest;
use crate::repository::DieselRepository;
use crate::routes::run_blocking;
use crate::services::{ServiceResult, logs};

#[get("/projects/{project_id}")]
pub async fn list_project_logs(
    project_id: web::Path<String>,
    query: web::Query<PaginationRequest>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let page = run_blocking(config.request_timeout(), move || {
        logs::list_project_logs(repo.get_ref(), &project_id, query.into_inner())
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated("logs found", page)))
}

#[get("/{id}")]
pub async fn get_log(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let log = run_blocking(config.request_timeout(), move || {
        logs::get_log(repo.get_ref(), &id)
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("log found", log)))
}

#[post("")]
pub async fn create_log(
    user: AuthenticatedUser,
    form: web::Json<CreateLogForm>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let log = run_blocking(config.request_timeout(), move || {
        logs::create_log(repo.get_ref(), &user, form.into_inner())
    })
    .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("log created", log)))
}

#[put("/{id}")]
pub async fn update_log(
    user: AuthenticatedUser,
    id: web::Path<String>,
    form: web::Json<UpdateLogForm>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let log = run_blocking(config.request_timeout(), move || {
        logs::update_log(repo.get_ref(), &user, &id, form.into_inner())
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("log updated", log)))
}

#[delete("/{id}")]
pub async fn delete_log(
    user: AuthenticatedUser,
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    run_blocking(config.request_timeout(), move || {
        logs::delete_log(repo.get_ref(), &user, &id)
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("log deleted")))
}
