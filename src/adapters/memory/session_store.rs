//! In-memory filling session store.
//!
//! Sessions live only as long as the process. Updates hold the write lock
//! for the duration of the mutation, so changes to one session never
//! interleave.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::filling::FillingSession;
use crate::domain::foundation::{DomainError, FillingSessionId, Timestamp};
use crate::ports::{FillingSessionStore, SessionMutation};

#[derive(Debug, Clone, Default)]
pub struct InMemoryFillingSessionStore {
    sessions: Arc<RwLock<HashMap<FillingSessionId, FillingSession>>>,
}

impl InMemoryFillingSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl FillingSessionStore for InMemoryFillingSessionStore {
    async fn save(&self, session: &FillingSession) -> Result<(), DomainError> {
        self.sessions
            .write()
            .await
            .insert(session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &FillingSessionId,
    ) -> Result<Option<FillingSession>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn update(
        &self,
        id: &FillingSessionId,
        mutate: SessionMutation<'_>,
    ) -> Result<Option<FillingSession>, DomainError> {
        let mut sessions = self.sessions.write().await;
        let Some(stored) = sessions.get_mut(id) else {
            return Ok(None);
        };

        let mut working = stored.clone();
        mutate(&mut working)?;
        *stored = working.clone();
        Ok(Some(working))
    }

    async fn delete(&self, id: &FillingSessionId) -> Result<(), DomainError> {
        self.sessions.write().await.remove(id);
        Ok(())
    }

    async fn evict_started_before(&self, cutoff: Timestamp) -> Result<usize, DomainError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.started_at().is_before(&cutoff));
        Ok(before - sessions.len())
    }
}
