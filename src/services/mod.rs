//! Business logic invoked by the HTTP routes.
//!
//! Services are generic over the repository traits so they can be exercised
//! with fakes and mocks.

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;
use crate::table::delete::DialogError;

pub mod admin_users;
pub mod auth;
pub mod catalog;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error(transparent)]
    TypeConstraint(#[from] TypeConstraintError),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("repository error: {0}")]
    Repository(RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::AccessDenied(_) => ServiceError::Unauthorized,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

impl From<DialogError> for ServiceError {
    fn from(err: DialogError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_errors_are_classified() {
        assert!(matches!(
            ServiceError::from(RepositoryError::NotFound),
            ServiceError::NotFound
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::AccessDenied("no".into())),
            ServiceError::Unauthorized
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::DatabaseError("locked".into())),
            ServiceError::Repository(_)
        ));
    }
}
