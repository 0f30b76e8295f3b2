//! AnswerQuestionHandler - Stores an answer, following any option jump.

use std::sync::Arc;

use super::{update_session, FillingError};
use crate::domain::filling::{AnswerValue, FillingSession};
use crate::domain::foundation::{FillingSessionId, QuestionId};
use crate::ports::FillingSessionStore;

#[derive(Debug, Clone)]
pub struct AnswerQuestionCommand {
    pub session_id: FillingSessionId,
    pub question_id: QuestionId,
    pub value: AnswerValue,
}

#[derive(Debug, Clone)]
pub struct AnswerQuestionResult {
    pub session: FillingSession,
    /// Section the answer jumped to, if any.
    pub jumped_to: Option<usize>,
}

pub struct AnswerQuestionHandler {
    session_store: Arc<dyn FillingSessionStore>,
}

impl AnswerQuestionHandler {
    pub fn new(session_store: Arc<dyn FillingSessionStore>) -> Self {
        Self { session_store }
    }

    pub async fn handle(
        &self,
        cmd: AnswerQuestionCommand,
    ) -> Result<AnswerQuestionResult, FillingError> {
        let AnswerQuestionCommand {
            session_id,
            question_id,
            value,
        } = cmd;

        let (session, jumped_to) =
            update_session(self.session_store.as_ref(), session_id, |session| {
                session.answer(&question_id, value)
            })
            .await?;

        Ok(AnswerQuestionResult { session, jumped_to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryFillingSessionStore;
    use crate::application::handlers::filling::test_support::branching_form;
    use crate::domain::foundation::{ErrorCode, Timestamp};

    async fn stored_session(store: &InMemoryFillingSessionStore) -> FillingSession {
        let session = FillingSession::start(branching_form(), Timestamp::now()).unwrap();
        store.save(&session).await.unwrap();
        session
    }

    #[tokio::test]
    async fn jump_answer_is_persisted() {
        let store = Arc::new(InMemoryFillingSessionStore::new());
        let session = stored_session(&store).await;
        let question_id = session.form().sections[0].questions[0].id.clone();
        let handler = AnswerQuestionHandler::new(store.clone());

        let result = handler
            .handle(AnswerQuestionCommand {
                session_id: session.id(),
                question_id,
                value: "X".into(),
            })
            .await
            .unwrap();

        assert_eq!(result.jumped_to, Some(2));
        let stored = store.find_by_id(&session.id()).await.unwrap().unwrap();
        assert_eq!(stored.current_section_index(), 2);
    }

    #[tokio::test]
    async fn rejected_answer_leaves_session_untouched() {
        let store = Arc::new(InMemoryFillingSessionStore::new());
        let session = stored_session(&store).await;
        let phone = session.form().sections[2].questions[0].id.clone();
        let handler = AnswerQuestionHandler::new(store.clone());

        let err = handler
            .handle(AnswerQuestionCommand {
                session_id: session.id(),
                question_id: phone.clone(),
                value: "5551234567".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            FillingError::Domain(e) if e.code == ErrorCode::QuestionNotInSection
        ));
        let stored = store.find_by_id(&session.id()).await.unwrap().unwrap();
        assert!(stored.answer_for(&phone).is_none());
    }

    #[tokio::test]
    async fn concurrent_answers_are_all_kept() {
        use crate::domain::form::{Form, Question, QuestionType, Section};
        use crate::domain::foundation::FormId;

        let mut form = Form::new("Contact");
        form.id = Some(FormId::new());
        form.sections = vec![Section::with_questions(
            "Details",
            vec![
                Question::new(QuestionType::Text, "Name", true),
                Question::new(QuestionType::Text, "Company", false),
            ],
        )];
        let form = form.normalized();

        let store = Arc::new(InMemoryFillingSessionStore::new());
        let session = FillingSession::start(form, Timestamp::now()).unwrap();
        store.save(&session).await.unwrap();
        let name = session.form().sections[0].questions[0].id.clone();
        let company = session.form().sections[0].questions[1].id.clone();
        let handler = AnswerQuestionHandler::new(store.clone());

        let (first, second) = tokio::join!(
            handler.handle(AnswerQuestionCommand {
                session_id: session.id(),
                question_id: name.clone(),
                value: "Sam".into(),
            }),
            handler.handle(AnswerQuestionCommand {
                session_id: session.id(),
                question_id: company.clone(),
                value: "Acme".into(),
            }),
        );
        first.unwrap();
        second.unwrap();

        let stored = store.find_by_id(&session.id()).await.unwrap().unwrap();
        assert_eq!(stored.answer_for(&name), Some(&AnswerValue::from("Sam")));
        assert_eq!(stored.answer_for(&company), Some(&AnswerValue::from("Acme")));
    }
}
