//! SubmitFeedbackHandler - Hands a complete response to the upstream API.
//!
//! The session is locked in `Submitting` while the upstream call runs, so a
//! second submit, answer or navigation request for it is refused instead of
//! racing. A failed submission unlocks the session with every answer intact
//! so the visitor can retry. A successful one discards the session.

use std::sync::Arc;

use super::{log_events, update_session, FillingError};
use crate::domain::filling::{FillingSession, SubmissionReceipt};
use crate::domain::foundation::FillingSessionId;
use crate::ports::{FeedbackSubmitter, FillingSessionStore};

#[derive(Debug, Clone)]
pub struct SubmitFeedbackCommand {
    pub session_id: FillingSessionId,
}

#[derive(Debug, Clone)]
pub struct SubmitFeedbackResult {
    /// Final state of the session, which is no longer stored.
    pub session: FillingSession,
    pub receipt: SubmissionReceipt,
}

pub struct SubmitFeedbackHandler {
    session_store: Arc<dyn FillingSessionStore>,
    submitter: Arc<dyn FeedbackSubmitter>,
}

impl SubmitFeedbackHandler {
    pub fn new(
        session_store: Arc<dyn FillingSessionStore>,
        submitter: Arc<dyn FeedbackSubmitter>,
    ) -> Self {
        Self {
            session_store,
            submitter,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitFeedbackCommand,
    ) -> Result<SubmitFeedbackResult, FillingError> {
        let store = self.session_store.as_ref();
        let session_id = cmd.session_id;

        // 1. Validate visited sections and lock the session
        let (mut session, submission) =
            update_session(store, session_id, |session| session.begin_submission()).await?;

        // 2. Single attempt upstream
        let receipt = match self.submitter.submit(&submission).await {
            Ok(receipt) => receipt,
            Err(err) => {
                tracing::warn!(
                    %session_id,
                    form_id = %submission.form,
                    error = %err,
                    "Feedback submission failed"
                );

                // 3. Unlock for a retry
                if let Err(release_err) =
                    update_session(store, session_id, |session| session.release_submission()).await
                {
                    tracing::warn!(%session_id, error = %release_err, "Could not unlock session");
                }
                return Err(err.into());
            }
        };

        // 4. Mark terminal and discard
        session.mark_submitted(receipt.clone())?;
        log_events(&mut session);
        store.delete(&session_id).await?;

        Ok(SubmitFeedbackResult { session, receipt })
    }
}
