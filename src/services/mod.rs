//! Dashboard workflows built on the repository traits.
//!
//! Services validate forms, call the API and report the outcome through a
//! [`Notifier`](crate::alerts::Notifier), the same notices the dashboard
//! shows after each save.

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod company;
pub mod events;
pub mod groups;
pub mod packages;
pub mod profile;
pub mod requests;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("session expired")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    TypeConstraint(#[from] TypeConstraintError),
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Unauthorized => ServiceError::Unauthorized,
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Past participle used in save notices.
pub(crate) fn saved(is_edit: bool, feminine: bool) -> &'static str {
    match (is_edit, feminine) {
        (true, false) => "actualizado",
        (false, false) => "registrado",
        (true, true) => "actualizada",
        (false, true) => "registrada",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_auth_errors_keep_their_meaning() {
        assert!(matches!(
            ServiceError::from(RepositoryError::Unauthorized),
            ServiceError::Unauthorized
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::NotFound),
            ServiceError::NotFound
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::Connection("refused".into())),
            ServiceError::Repository(_)
        ));
    }
}
