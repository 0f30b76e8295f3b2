//! Filling session store port.
//!
//! Sessions are ephemeral: a store may drop them at any time (for example
//! on restart) and visitors then start over.

use crate::domain::filling::FillingSession;
use crate::domain::foundation::{DomainError, FillingSessionId, Timestamp};
use async_trait::async_trait;

/// Change applied to a stored session while no other change can run.
pub type SessionMutation<'a> =
    Box<dyn FnOnce(&mut FillingSession) -> Result<(), DomainError> + Send + 'a>;

#[async_trait]
pub trait FillingSessionStore: Send + Sync {
    /// Insert or replace a session.
    async fn save(&self, session: &FillingSession) -> Result<(), DomainError>;

    /// Returns `None` if the session is unknown or was dropped.
    async fn find_by_id(
        &self,
        id: &FillingSessionId,
    ) -> Result<Option<FillingSession>, DomainError>;

    /// Applies `mutate` to the stored session atomically.
    ///
    /// Concurrent updates of the same session run one after another. When
    /// `mutate` fails the stored session is left unchanged and the error is
    /// returned. Returns the updated session, or `None` if it is unknown.
    async fn update(
        &self,
        id: &FillingSessionId,
        mutate: SessionMutation<'_>,
    ) -> Result<Option<FillingSession>, DomainError>;

    /// Remove a session. Removing an unknown session is not an error.
    async fn delete(&self, id: &FillingSessionId) -> Result<(), DomainError>;

    /// Removes every session started before `cutoff`. Returns how many were removed.
    async fn evict_started_before(&self, cutoff: Timestamp) -> Result<usize, DomainError>;
}
