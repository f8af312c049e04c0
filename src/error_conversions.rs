//! Error conversion glue between the domain value objects and the layers
//! above them.
//!
//! The domain layer does not depend on repository or service error types, so
//! the conversions live here instead.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;
#[cfg(feature = "server")]
use crate::services::ServiceError;

#[cfg(feature = "server")]
impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
impl From<crate::token::AuthError> for ServiceError {
    fn from(val: crate::token::AuthError) -> Self {
        ServiceError::Unauthorized(val.to_string())
    }
}
