//! Public form reader port.
//!
//! Loads the visitor-facing version of a form, without authentication.

use crate::domain::foundation::{DomainError, FormId};
use crate::domain::form::Form;
use async_trait::async_trait;

#[async_trait]
pub trait PublicFormReader: Send + Sync {
    /// Fetch a form that is open for responses.
    ///
    /// # Errors
    ///
    /// - `FormNotFound` if the form doesn't exist or is inactive
    /// - `FormClosed` if the form has expired
    /// - `UpstreamUnavailable` on transport failure
    async fn fetch_public_form(&self, id: &FormId) -> Result<Form, DomainError>;
}
