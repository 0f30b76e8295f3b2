//! Error type shared by the form authoring handlers.

use crate::domain::foundation::{DomainError, FormId};

#[derive(Debug, Clone)]
pub enum FormError {
    /// Form doesn't exist upstream.
    NotFound(FormId),
    /// Validation, structure or upstream error.
    Domain(DomainError),
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::NotFound(id) => write!(f, "Form not found: {}", id),
            FormError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for FormError {}

impl From<DomainError> for FormError {
    fn from(err: DomainError) -> Self {
        FormError::Domain(err)
    }
}
