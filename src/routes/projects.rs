use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::dto::api::ApiResponse;
use crate::forms::projects::ProjectForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::pagination::PaginationRequest;
use crate::repository::DieselRepository;
use crate::routes::run_blocking;
use crate::services::{ServiceResult, projects};

#[get("")]
pub async fn list_projects(
    user: AuthenticatedUser,
    query: web::Query<PaginationRequest>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let page = run_blocking(config.request_timeout(), move || {
        projects::list_visible_projects(repo.get_ref(), &user, query.into_inner())
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated("projects found", page)))
}

#[get("/me")]
pub async fn list_own_projects(
    user: AuthenticatedUser,
    query: web::Query<PaginationRequest>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let page = run_blocking(config.request_timeout(), move || {
        projects::list_own_projects(repo.get_ref(), &user, query.into_inner())
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated("projects found", page)))
}

#[get("/users/{user_id}")]
pub async fn list_user_projects(
    _user: AuthenticatedUser,
    user_id: web::Path<String>,
    query: web::Query<PaginationRequest>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let page = run_blocking(config.request_timeout(), move || {
        projects::list_user_projects(repo.get_ref(), &user_id, query.into_inner())
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::paginated("projects found", page)))
}

#[get("/slug/{slug}")]
pub async fn get_project_by_slug(
    user: AuthenticatedUser,
    slug: web::Path<String>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let project = run_blocking(config.request_timeout(), move || {
        projects::get_project_by_slug(repo.get_ref(), &user, &slug)
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("project found", project)))
}

#[get("/{id}")]
pub async fn get_project(
    user: AuthenticatedUser,
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let project = run_blocking(config.request_timeout(), move || {
        projects::get_project(repo.get_ref(), &user, &id)
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("project found", project)))
}

#[post("")]
pub async fn create_project(
    user: AuthenticatedUser,
    form: web::Json<ProjectForm>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let project = run_blocking(config.request_timeout(), move || {
        projects::create_project(repo.get_ref(), &user, form.into_inner())
    })
    .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success("project created", project)))
}

#[put("/{id}")]
pub async fn update_project(
    user: AuthenticatedUser,
    id: web::Path<String>,
    form: web::Json<ProjectForm>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    let project = run_blocking(config.request_timeout(), move || {
        projects::update_project(repo.get_ref(), &user, &id, form.into_inner())
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("project updated", project)))
}

#[delete("/{id}")]
pub async fn delete_project(
    user: AuthenticatedUser,
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> ServiceResult<HttpResponse> {
    run_blocking(config.request_timeout(), move || {
        projects::delete_project(repo.get_ref(), &user, &id)
    })
    .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("project deleted")))
}
