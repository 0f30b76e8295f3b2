//! SaveFormHandler - Validates a form graph and creates or updates it upstream.
//!
//! Nothing reaches the forms API unless every question is complete, every
//! section is titled and every jump points forward to an existing section.

use std::sync::Arc;

use super::FormError;
use crate::domain::form::{check_ready_for_submission, Form};
use crate::domain::foundation::{ErrorCode, FormId};
use crate::ports::FormRepository;

#[derive(Debug, Clone)]
pub struct SaveFormCommand {
    /// `None` creates a new form.
    pub form_id: Option<FormId>,
    pub form: Form,
}

#[derive(Debug, Clone)]
pub struct SaveFormResult {
    pub form: Form,
    pub created: bool,
}

pub struct SaveFormHandler {
    repository: Arc<dyn FormRepository>,
}

impl SaveFormHandler {
    pub fn new(repository: Arc<dyn FormRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: SaveFormCommand) -> Result<SaveFormResult, FormError> {
        // 1. Canonical ordering before validation
        let form = cmd.form.normalized();

        // 2. Completeness and forward-only structure
        check_ready_for_submission(&form)?;

        // 3. Create or replace upstream
        let (saved, created) = match cmd.form_id {
            None => (self.repository.create(&form).await?, true),
            Some(id) => {
                let saved = self.repository.update(&id, &form).await.map_err(|err| {
                    if err.code == ErrorCode::FormNotFound {
                        FormError::NotFound(id)
                    } else {
                        FormError::Domain(err)
                    }
                })?;
                (saved, false)
            }
        };

        tracing::info!(
            form_id = ?saved.id,
            sections = saved.sections.len(),
            questions = saved.question_count(),
            created,
            "Form saved"
        );

        Ok(SaveFormResult {
            form: saved,
            created,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryFormStore;
    use crate::application::handlers::filling::test_support::branching_form;
    use crate::domain::form::{Question, QuestionType};

    fn authored_form() -> Form {
        let mut form = branching_form();
        form.id = None;
        form
    }

    #[tokio::test]
    async fn creates_new_form() {
        let store = Arc::new(InMemoryFormStore::new());
        let handler = SaveFormHandler::new(store.clone());

        let result = handler
            .handle(SaveFormCommand {
                form_id: None,
                form: authored_form(),
            })
            .await
            .unwrap();

        assert!(result.created);
        assert!(result.form.id.is_some());
        assert_eq!(store.form_count().await, 1);
    }

    #[tokio::test]
    async fn updates_existing_form() {
        let store = Arc::new(InMemoryFormStore::new());
        let id = store.insert(authored_form()).await;
        let handler = SaveFormHandler::new(store.clone());

        let mut form = authored_form();
        form.title = "Renamed".into();
        let result = handler
            .handle(SaveFormCommand {
                form_id: Some(id),
                form,
            })
            .await
            .unwrap();

        assert!(!result.created);
        assert_eq!(result.form.id, Some(id));
        assert_eq!(result.form.title, "Renamed");
    }

    #[tokio::test]
    async fn incomplete_question_blocks_save() {
        let store = Arc::new(InMemoryFormStore::new());
        let handler = SaveFormHandler::new(store.clone());

        let mut form = authored_form();
        form.sections[1].questions.push(Question::with_options(
            QuestionType::Checkbox,
            "Pick",
            false,
            vec!["Only".into()],
        ));

        let err = handler
            .handle(SaveFormCommand {
                form_id: None,
                form,
            })
            .await
            .unwrap_err();

        match err {
            FormError::Domain(e) => {
                assert_eq!(e.code, ErrorCode::IncompleteQuestions);
                assert!(e.details.contains_key("issue_1"));
            }
            other => panic!("expected domain error, got {}", other),
        }
        assert_eq!(store.form_count().await, 0);
    }

    #[tokio::test]
    async fn backward_jump_blocks_save() {
        let store = Arc::new(InMemoryFormStore::new());
        let handler = SaveFormHandler::new(store);

        let mut form = authored_form();
        let first = form.sections[0].id.clone();
        form.sections[2].next_section = Some(first);

        let err = handler
            .handle(SaveFormCommand {
                form_id: None,
                form,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, FormError::Domain(e) if e.code == ErrorCode::ValidationFailed));
    }

    #[tokio::test]
    async fn update_of_unknown_form_is_not_found() {
        let handler = SaveFormHandler::new(Arc::new(InMemoryFormStore::new()));
        let id = FormId::new();

        let err = handler
            .handle(SaveFormCommand {
                form_id: Some(id),
                form: authored_form(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, FormError::NotFound(missing) if missing == id));
    }
}
