//! GetFillingSessionHandler - Query for the current state of a session.

use std::sync::Arc;

use super::{load_session, FillingError};
use crate::domain::filling::FillingSession;
use crate::domain::foundation::FillingSessionId;
use crate::ports::FillingSessionStore;

#[derive(Debug, Clone)]
pub struct GetFillingSessionQuery {
    pub session_id: FillingSessionId,
}

pub struct GetFillingSessionHandler {
    session_store: Arc<dyn FillingSessionStore>,
}

impl GetFillingSessionHandler {
    pub fn new(session_store: Arc<dyn FillingSessionStore>) -> Self {
        Self { session_store }
    }

    pub async fn handle(
        &self,
        query: GetFillingSessionQuery,
    ) -> Result<FillingSession, FillingError> {
        load_session(self.session_store.as_ref(), query.session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryFillingSessionStore;

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let handler = GetFillingSessionHandler::new(Arc::new(InMemoryFillingSessionStore::new()));
        let id = FillingSessionId::new();

        let err = handler
            .handle(GetFillingSessionQuery { session_id: id })
            .await
            .unwrap_err();

        assert!(matches!(err, FillingError::SessionNotFound(missing) if missing == id));
    }
}
