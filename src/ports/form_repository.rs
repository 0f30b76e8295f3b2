//! Form repository port (authoring side).
//!
//! Forms are owned by the upstream forms API; this port loads and saves
//! whole form graphs on behalf of an authenticated author.

use crate::domain::foundation::{DomainError, FormId};
use crate::domain::form::Form;
use async_trait::async_trait;

/// Repository port for form graph persistence.
#[async_trait]
pub trait FormRepository: Send + Sync {
    /// Find a form by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &FormId) -> Result<Option<Form>, DomainError>;

    /// Create a new form. Returns the stored form with its assigned ID.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the upstream API rejects the graph
    /// - `UpstreamUnavailable` on transport failure
    async fn create(&self, form: &Form) -> Result<Form, DomainError>;

    /// Replace an existing form's graph.
    ///
    /// # Errors
    ///
    /// - `FormNotFound` if the form doesn't exist
    /// - `UpstreamUnavailable` on transport failure
    async fn update(&self, id: &FormId, form: &Form) -> Result<Form, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn FormRepository) {}
    }
}
