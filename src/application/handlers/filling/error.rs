//! Error type shared by the filling handlers.

use crate::domain::foundation::{DomainError, FillingSessionId};

#[derive(Debug, Clone)]
pub enum FillingError {
    /// Session unknown or dropped.
    SessionNotFound(FillingSessionId),
    /// Domain or upstream error.
    Domain(DomainError),
}

impl std::fmt::Display for FillingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FillingError::SessionNotFound(id) => write!(f, "Filling session not found: {}", id),
            FillingError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for FillingError {}

impl From<DomainError> for FillingError {
    fn from(err: DomainError) -> Self {
        FillingError::Domain(err)
    }
}
