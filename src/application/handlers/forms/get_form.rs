//! GetFormHandler - Loads a form graph for editing.

use std::sync::Arc;

use super::FormError;
use crate::domain::form::Form;
use crate::domain::foundation::FormId;
use crate::ports::FormRepository;

#[derive(Debug, Clone)]
pub struct GetFormQuery {
    pub form_id: FormId,
}

pub struct GetFormHandler {
    repository: Arc<dyn FormRepository>,
}

impl GetFormHandler {
    pub fn new(repository: Arc<dyn FormRepository>) -> Self {
        Self { repository }
    }

    /// Returns the stored graph normalized, so editors always see
    /// contiguous orders and aligned option links.
    pub async fn handle(&self, query: GetFormQuery) -> Result<Form, FormError> {
        let form = self
            .repository
            .find_by_id(&query.form_id)
            .await?
            .ok_or(FormError::NotFound(query.form_id))?;

        Ok(form.normalized())
    }
}
