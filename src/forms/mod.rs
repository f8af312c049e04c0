//! JSON request bodies, validated with `validator` and converted into domain
//! payloads.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;
use crate::services::ServiceError;

pub mod auth;
pub mod interactions;
pub mod logs;
pub mod profiles;
pub mod projects;
pub mod tags;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("invalid request body: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("invalid request body: {0}")]
    TypeConstraint(#[from] TypeConstraintError),
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}
