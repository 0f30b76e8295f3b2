//! EvictIdleSessionsHandler - Discards filling sessions that were abandoned.

use std::sync::Arc;

use super::FillingError;
use crate::domain::foundation::Timestamp;
use crate::ports::FillingSessionStore;

#[derive(Debug, Clone)]
pub struct EvictIdleSessionsCommand {
    pub now: Timestamp,
    /// Sessions started more than this many minutes before `now` are dropped.
    pub idle_ttl_mins: i64,
}

pub struct EvictIdleSessionsHandler {
    session_store: Arc<dyn FillingSessionStore>,
}

impl EvictIdleSessionsHandler {
    pub fn new(session_store: Arc<dyn FillingSessionStore>) -> Self {
        Self { session_store }
    }

    /// Returns how many sessions were dropped.
    pub async fn handle(&self, cmd: EvictIdleSessionsCommand) -> Result<usize, FillingError> {
        let cutoff = cmd.now.add_minutes(-cmd.idle_ttl_mins);
        let evicted = self.session_store.evict_started_before(cutoff).await?;

        if evicted > 0 {
            tracing::info!(evicted, %cutoff, "Evicted idle filling sessions");
        }
        Ok(evicted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryFillingSessionStore;
    use crate::application::handlers::filling::test_support::branching_form;
    use crate::domain::filling::FillingSession;

    #[tokio::test]
    async fn drops_sessions_older_than_ttl() {
        let store = Arc::new(InMemoryFillingSessionStore::new());
        let now = Timestamp::now();
        let abandoned = FillingSession::start(branching_form(), now.add_minutes(-180)).unwrap();
        let active = FillingSession::start(branching_form(), now.add_minutes(-10)).unwrap();
        store.save(&abandoned).await.unwrap();
        store.save(&active).await.unwrap();
        let handler = EvictIdleSessionsHandler::new(store.clone());

        let evicted = handler
            .handle(EvictIdleSessionsCommand {
                now,
                idle_ttl_mins: 120,
            })
            .await
            .unwrap();

        assert_eq!(evicted, 1);
        assert_eq!(store.session_count().await, 1);
        assert!(store.find_by_id(&active.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn nothing_to_evict() {
        let store = Arc::new(InMemoryFillingSessionStore::new());
        let handler = EvictIdleSessionsHandler::new(store.clone());

        let evicted = handler
            .handle(EvictIdleSessionsCommand {
                now: Timestamp::now(),
                idle_ttl_mins: 120,
            })
            .await
            .unwrap();

        assert_eq!(evicted, 0);
    }
}
