//! Form definitions backing the dashboard editors and the public request view.

use std::borrow::Cow;

use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::domain::types::TypeConstraintError;

pub mod company;
pub mod event;
pub mod group;
pub mod package;
pub mod profile;
pub mod request;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Constraint(#[from] TypeConstraintError),

    #[error("{0} es obligatorio")]
    Required(&'static str),

    #[error("invalid request kind")]
    InvalidKind,

    #[error("Solo se pueden agregar un máximo de {0} elementos")]
    TooManySelections(usize),
}

/// Rejects values with leading or trailing whitespace.
pub(crate) fn no_trim_spaces(value: &str) -> Result<(), ValidationError> {
    if value.trim() == value {
        Ok(())
    } else {
        Err(ValidationError::new("no_trim_spaces").with_message(Cow::Borrowed(
            "No se permiten espacios al inicio o final",
        )))
    }
}
