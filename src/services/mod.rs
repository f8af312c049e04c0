//! Business rules sitting between the HTTP handlers and the repositories.
//!
//! Services are plain functions generic over the repository traits they need,
//! so handlers pass a [`crate::repository::DieselRepository`] and tests pass a
//! mock.

pub mod auth;
pub mod interactions;
pub mod logs;
pub mod profiles;
pub mod projects;
pub mod tags;

use thiserror::Error;

use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    /// Missing credentials, bad token, or an action on someone else's resource.
    #[error("{0}")]
    Unauthorized(String),

    /// Request payload failed validation.
    #[error("{0}")]
    Form(String),

    /// A value could not be turned into a domain type (bad UUID, ...).
    #[error("{0}")]
    TypeConstraint(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound("resource not found".to_string()),
            RepositoryError::Conflict(_) => {
                ServiceError::Conflict("resource already exists".to_string())
            }
            RepositoryError::ConstraintViolation(message) => ServiceError::Form(message),
            other => {
                log::error!("Repository failure: {other}");
                ServiceError::Internal("internal server error".to_string())
            }
        }
    }
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        ServiceError::NotFound(format!("{entity} not found"))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ServiceError::Internal(message.into())
    }
}
