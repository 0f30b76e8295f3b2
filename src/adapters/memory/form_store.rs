//! In-memory stand-in for the upstream forms API.
//!
//! Implements all three form ports over a shared map. Useful for tests
//! and for running the server without an upstream.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::filling::{FeedbackSubmission, SubmissionReceipt};
use crate::domain::form::Form;
use crate::domain::foundation::{DomainError, ErrorCode, FormId, ResponseId, Timestamp};
use crate::ports::{FeedbackSubmitter, FormRepository, PublicFormReader};

#[derive(Debug, Clone, Default)]
pub struct InMemoryFormStore {
    forms: Arc<RwLock<HashMap<FormId, Form>>>,
    submissions: Arc<RwLock<Vec<(ResponseId, FeedbackSubmission)>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryFormStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a form as-is, assigning an id if it has none.
    pub async fn insert(&self, mut form: Form) -> FormId {
        let id = *form.id.get_or_insert_with(FormId::new);
        self.forms.write().await.insert(id, form);
        id
    }

    /// Makes every call fail with `UpstreamUnavailable` while set.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Submissions accepted so far, oldest first.
    pub async fn submissions(&self) -> Vec<FeedbackSubmission> {
        self.submissions
            .read()
            .await
            .iter()
            .map(|(_, s)| s.clone())
            .collect()
    }

    pub async fn form_count(&self) -> usize {
        self.forms.read().await.len()
    }

    pub async fn clear(&self) {
        self.forms.write().await.clear();
        self.submissions.write().await.clear();
    }

    fn ensure_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::UpstreamUnavailable,
                "Forms API is unavailable",
            ));
        }
        Ok(())
    }

    async fn open_form(&self, id: &FormId) -> Result<Form, DomainError> {
        let form = self
            .forms
            .read()
            .await
            .get(id)
            .filter(|f| f.is_active)
            .cloned()
            .ok_or_else(|| DomainError::new(ErrorCode::FormNotFound, "Form not found"))?;

        if form.is_expired(Timestamp::now()) {
            return Err(DomainError::new(ErrorCode::FormClosed, "This form has expired"));
        }
        Ok(form)
    }
}

#[async_trait]
impl FormRepository for InMemoryFormStore {
    async fn find_by_id(&self, id: &FormId) -> Result<Option<Form>, DomainError> {
        self.ensure_available()?;
        Ok(self.forms.read().await.get(id).cloned())
    }

    async fn create(&self, form: &Form) -> Result<Form, DomainError> {
        self.ensure_available()?;
        let mut stored = form.clone();
        let id = FormId::new();
        stored.id = Some(id);
        self.forms.write().await.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: &FormId, form: &Form) -> Result<Form, DomainError> {
        self.ensure_available()?;
        let mut forms = self.forms.write().await;
        let slot = forms
            .get_mut(id)
            .ok_or_else(|| DomainError::new(ErrorCode::FormNotFound, "Form not found"))?;
        let mut stored = form.clone();
        stored.id = Some(*id);
        *slot = stored.clone();
        Ok(stored)
    }
}

#[async_trait]
impl PublicFormReader for InMemoryFormStore {
    async fn fetch_public_form(&self, id: &FormId) -> Result<Form, DomainError> {
        self.ensure_available()?;
        self.open_form(id).await
    }
}

#[async_trait]
impl FeedbackSubmitter for InMemoryFormStore {
    async fn submit(
        &self,
        submission: &FeedbackSubmission,
    ) -> Result<SubmissionReceipt, DomainError> {
        self.ensure_available()?;
        self.open_form(&submission.form).await?;

        let response_id = ResponseId::new(uuid::Uuid::new_v4().to_string());
        self.submissions
            .write()
            .await
            .push((response_id.clone(), submission.clone()));

        Ok(SubmissionReceipt {
            message: "Feedback submitted successfully".to_string(),
            response_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_assigns_id_and_update_replaces() {
        let store = InMemoryFormStore::new();
        let created = store.create(&Form::new("First")).await.unwrap();
        let id = created.id.unwrap();

        let mut changed = created.clone();
        changed.title = "Second".into();
        store.update(&id, &changed).await.unwrap();

        let found = store.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(found.title, "Second");
        assert_eq!(store.form_count().await, 1);
    }

    #[tokio::test]
    async fn update_of_unknown_form_fails() {
        let store = InMemoryFormStore::new();
        let err = store.update(&FormId::new(), &Form::new("x")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FormNotFound);
    }

    #[tokio::test]
    async fn public_reads_respect_active_and_expiry() {
        let store = InMemoryFormStore::new();

        let mut inactive = Form::new("Off");
        inactive.is_active = false;
        let inactive_id = store.insert(inactive).await;
        assert_eq!(
            store.fetch_public_form(&inactive_id).await.unwrap_err().code,
            ErrorCode::FormNotFound
        );

        let mut expired = Form::new("Old");
        expired.expires_at = Some(Timestamp::now().add_days(-1));
        let expired_id = store.insert(expired).await;
        assert_eq!(
            store.fetch_public_form(&expired_id).await.unwrap_err().code,
            ErrorCode::FormClosed
        );
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = InMemoryFormStore::new();
        let id = store.insert(Form::new("Up")).await;
        store.set_unavailable(true);

        let err = store.fetch_public_form(&id).await.unwrap_err();
        assert!(err.is_retryable());

        store.set_unavailable(false);
        assert!(store.fetch_public_form(&id).await.is_ok());
    }

    #[tokio::test]
    async fn submissions_are_recorded() {
        let store = InMemoryFormStore::new();
        let id = store.insert(Form::new("Up")).await;

        let receipt = store
            .submit(&FeedbackSubmission { form: id, answers: vec![] })
            .await
            .unwrap();

        assert_eq!(receipt.message, "Feedback submitted successfully");
        assert_eq!(store.submissions().await.len(), 1);
    }
}
