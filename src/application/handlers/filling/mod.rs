//! Filling handlers - starting, answering, navigating, submitting and eviction.

mod answer_question;
mod error;
mod evict_idle_sessions;
mod get_filling_session;
mod navigate_section;
mod start_filling;
mod submit_feedback;

pub use answer_question::{AnswerQuestionCommand, AnswerQuestionHandler, AnswerQuestionResult};
pub use error::FillingError;
pub use evict_idle_sessions::{EvictIdleSessionsCommand, EvictIdleSessionsHandler};
pub use get_filling_session::{GetFillingSessionHandler, GetFillingSessionQuery};
pub use navigate_section::{
    NavigateSectionCommand, NavigateSectionHandler, NavigateSectionResult, SectionStep,
};
pub use start_filling::{StartFillingCommand, StartFillingHandler};
pub use submit_feedback::{SubmitFeedbackCommand, SubmitFeedbackHandler, SubmitFeedbackResult};

use crate::domain::filling::{FillingEvent, FillingSession};
use crate::domain::foundation::{DomainError, FillingSessionId};
use crate::ports::FillingSessionStore;

async fn load_session(
    store: &dyn FillingSessionStore,
    id: FillingSessionId,
) -> Result<FillingSession, FillingError> {
    store
        .find_by_id(&id)
        .await?
        .ok_or(FillingError::SessionNotFound(id))
}

/// Runs `mutate` on the stored session under the store's per-session
/// serialization and logs the events it produced.
///
/// Returns the updated session and whatever `mutate` returned. On error the
/// stored session is unchanged.
async fn update_session<T, F>(
    store: &dyn FillingSessionStore,
    id: FillingSessionId,
    mutate: F,
) -> Result<(FillingSession, T), FillingError>
where
    T: Send,
    F: FnOnce(&mut FillingSession) -> Result<T, DomainError> + Send,
{
    let mut output = None;
    let updated = store
        .update(
            &id,
            Box::new(|session: &mut FillingSession| -> Result<(), DomainError> {
                output = Some(mutate(session)?);
                log_events(session);
                Ok(())
            }),
        )
        .await?;

    match (updated, output) {
        (Some(session), Some(output)) => Ok((session, output)),
        _ => Err(FillingError::SessionNotFound(id)),
    }
}

/// Drains a session's events into the log.
fn log_events(session: &mut FillingSession) {
    for event in session.take_events() {
        match event {
            FillingEvent::Started {
                session_id,
                form_id,
            } => {
                tracing::info!(%session_id, %form_id, "Filling session started");
            }
            FillingEvent::Jumped {
                session_id,
                question_id,
                from,
                to,
            } => {
                tracing::debug!(%session_id, %question_id, from, to, "Option jump");
            }
            FillingEvent::Advanced {
                session_id,
                from,
                to,
            } => {
                tracing::debug!(%session_id, from, to, "Advanced to next section");
            }
            FillingEvent::WentBack {
                session_id,
                from,
                to,
            } => {
                tracing::debug!(%session_id, from, to, "Went back");
            }
            FillingEvent::StaleLinkIgnored {
                session_id,
                section,
                target,
            } => {
                tracing::warn!(%session_id, section, %target, "Ignoring link to missing section");
            }
            FillingEvent::Submitted {
                session_id,
                response_id,
            } => {
                tracing::info!(%session_id, %response_id, "Feedback submitted");
            }
        }
    }
}
