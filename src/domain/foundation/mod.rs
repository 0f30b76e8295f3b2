//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, the state machine trait and error
//! types used by both form authoring and form filling.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{FillingSessionId, FormId, QuestionId, ResponseId, SectionId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
