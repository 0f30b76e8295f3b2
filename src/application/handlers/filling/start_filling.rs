//! StartFillingHandler - Opens a filling session on a public form.

use std::sync::Arc;

use super::{log_events, FillingError};
use crate::domain::filling::FillingSession;
use crate::domain::foundation::{FormId, Timestamp};
use crate::ports::{FillingSessionStore, PublicFormReader};

#[derive(Debug, Clone)]
pub struct StartFillingCommand {
    pub form_id: FormId,
}

pub struct StartFillingHandler {
    form_reader: Arc<dyn PublicFormReader>,
    session_store: Arc<dyn FillingSessionStore>,
}

impl StartFillingHandler {
    pub fn new(
        form_reader: Arc<dyn PublicFormReader>,
        session_store: Arc<dyn FillingSessionStore>,
    ) -> Self {
        Self {
            form_reader,
            session_store,
        }
    }

    pub async fn handle(&self, cmd: StartFillingCommand) -> Result<FillingSession, FillingError> {
        // 1. Load the visitor-facing form
        let form = self.form_reader.fetch_public_form(&cmd.form_id).await?;

        // 2. Start on the first section
        let mut session = FillingSession::start(form, Timestamp::now())?;
        log_events(&mut session);

        // 3. Keep it for the following requests
        self.session_store.save(&session).await?;

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryFillingSessionStore, InMemoryFormStore};
    use crate::application::handlers::filling::test_support::branching_form;
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn starts_on_first_section_and_stores_session() {
        let forms = Arc::new(InMemoryFormStore::new());
        let sessions = Arc::new(InMemoryFillingSessionStore::new());
        let form_id = forms.insert(branching_form()).await;
        let handler = StartFillingHandler::new(forms, sessions.clone());

        let session = handler.handle(StartFillingCommand { form_id }).await.unwrap();

        assert_eq!(session.form_id(), form_id);
        assert_eq!(session.current_section_index(), 0);
        assert_eq!(sessions.session_count().await, 1);
    }

    #[tokio::test]
    async fn unknown_form_is_not_found() {
        let forms = Arc::new(InMemoryFormStore::new());
        let sessions = Arc::new(InMemoryFillingSessionStore::new());
        let handler = StartFillingHandler::new(forms, sessions.clone());

        let result = handler
            .handle(StartFillingCommand {
                form_id: FormId::new(),
            })
            .await;

        match result {
            Err(FillingError::Domain(err)) => assert_eq!(err.code, ErrorCode::FormNotFound),
            other => panic!("expected FormNotFound, got {:?}", other.map(|s| s.id())),
        }
        assert_eq!(sessions.session_count().await, 0);
    }

    #[tokio::test]
    async fn upstream_outage_is_surfaced() {
        let forms = Arc::new(InMemoryFormStore::new());
        let form_id = forms.insert(branching_form()).await;
        forms.set_unavailable(true);
        let handler = StartFillingHandler::new(forms, Arc::new(InMemoryFillingSessionStore::new()));

        let err = handler.handle(StartFillingCommand { form_id }).await.unwrap_err();
        assert!(matches!(err, FillingError::Domain(e) if e.is_retryable()));
    }
}
