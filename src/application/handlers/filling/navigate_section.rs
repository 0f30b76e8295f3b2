//! NavigateSectionHandler - "Next" and "Previous" between sections.

use serde::Deserialize;
use std::sync::Arc;

use super::{update_session, FillingError};
use crate::domain::filling::FillingSession;
use crate::domain::foundation::FillingSessionId;
use crate::ports::FillingSessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionStep {
    Next,
    Previous,
}

#[derive(Debug, Clone)]
pub struct NavigateSectionCommand {
    pub session_id: FillingSessionId,
    pub step: SectionStep,
}

#[derive(Debug, Clone)]
pub struct NavigateSectionResult {
    pub session: FillingSession,
    /// `None` when "Previous" was pressed on the first entry of the history.
    pub moved_to: Option<usize>,
}

pub struct NavigateSectionHandler {
    session_store: Arc<dyn FillingSessionStore>,
}

impl NavigateSectionHandler {
    pub fn new(session_store: Arc<dyn FillingSessionStore>) -> Self {
        Self { session_store }
    }

    pub async fn handle(
        &self,
        cmd: NavigateSectionCommand,
    ) -> Result<NavigateSectionResult, FillingError> {
        let (session, moved_to) =
            update_session(self.session_store.as_ref(), cmd.session_id, |session| match cmd.step {
                SectionStep::Next => session.next().map(Some),
                SectionStep::Previous => session.previous(),
            })
            .await?;

        Ok(NavigateSectionResult { session, moved_to })
    }
}
