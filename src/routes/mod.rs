//! Actix-web handlers and the glue that turns service results into JSON.

use std::time::Duration;

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, ResponseError, get, web};

use crate::dto::api::ErrorResponse;
use crate::services::{ServiceError, ServiceResult};

pub mod auth;
pub mod interactions;
pub mod logs;
pub mod profiles;
pub mod projects;
pub mod tags;

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Form(_) | ServiceError::TypeConstraint(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ServiceError::Internal(message) = self {
            log::error!("Request failed: {message}");
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.to_string()))
    }
}

/// Runs blocking repository work on the blocking pool, bounded by `timeout`.
pub async fn run_blocking<T, F>(timeout: Duration, f: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    match actix_web::rt::time::timeout(timeout, web::block(f)).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            log::error!("Blocking task failed: {e}");
            Err(ServiceError::internal("internal server error"))
        }
        Err(_) => {
            log::error!("Request exceeded {}s", timeout.as_secs());
            Err(ServiceError::internal("request timed out"))
        }
    }
}

fn bad_request(message: &str, detail: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(message).with_errors(vec![detail]))
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = bad_request("invalid query parameters", err.to_string());
    InternalError::from_response(err, response).into()
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = bad_request("invalid request body", err.to_string());
    InternalError::from_response(err, response).into()
}

#[get("/hello")]
pub async fn hello() -> impl Responder {
    HttpResponse::Ok().body("Hello, World!")
}

/// Registers the extractor error handlers and every `/api` scope.
///
/// Literal segments such as `/projects/me` are registered before `{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler));

    cfg.service(hello).service(
        web::scope("/api")
            .service(
                web::scope("/auth")
                    .service(auth::login)
                    .service(auth::register)
                    .service(auth::refresh_token)
                    .service(auth::logout),
            )
            .service(
                web::scope("/projects")
                    .service(projects::list_projects)
                    .service(projects::list_own_projects)
                    .service(projects::list_user_projects)
                    .service(projects::get_project_by_slug)
                    .service(projects::get_project)
                    .service(projects::create_project)
                    .service(projects::update_project)
                    .service(projects::delete_project),
            )
            .service(
                web::scope("/logs")
                    .service(logs::list_project_logs)
                    .service(logs::get_log)
                    .service(logs::create_log)
                    .service(logs::update_log)
                    .service(logs::delete_log),
            )
            .service(
                web::scope("/tags")
                    .service(tags::list_tags)
                    .service(tags::get_tag)
                    .service(tags::create_tag)
                    .service(tags::update_tag)
                    .service(tags::delete_tag),
            )
            .service(
                web::scope("/profiles")
                    .service(profiles::create_profile)
                    .service(profiles::get_own_profile)
                    .service(profiles::get_profile)
                    .service(profiles::update_profile),
            )
            .service(
                web::scope("/interactions")
                    .service(interactions::like_log)
                    .service(interactions::unlike_log)
                    .service(interactions::list_likes)
                    .service(interactions::create_comment)
                    .service(interactions::update_comment)
                    .service(interactions::delete_comment)
                    .service(interactions::list_comments),
            ),
    );
}
