//! Feedback submitter port.

use crate::domain::filling::{FeedbackSubmission, SubmissionReceipt};
use crate::domain::foundation::DomainError;
use async_trait::async_trait;

/// Hands a completed response to the upstream API.
///
/// Implementations make a single attempt. Failures are reported so the
/// visitor can retry manually.
#[async_trait]
pub trait FeedbackSubmitter: Send + Sync {
    /// # Errors
    ///
    /// - `FormIncomplete` if the upstream API reports missing or invalid answers
    /// - `FormNotFound` / `FormClosed` if the form stopped accepting responses
    /// - `UpstreamUnavailable` on transport failure
    async fn submit(
        &self,
        submission: &FeedbackSubmission,
    ) -> Result<SubmissionReceipt, DomainError>;
}
