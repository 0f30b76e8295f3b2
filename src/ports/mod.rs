//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Upstream API Ports
//!
//! - `FormRepository` - Authoring-side load/create/update of form graphs
//! - `PublicFormReader` - Visitor-facing form fetch
//! - `FeedbackSubmitter` - Response submission
//!
//! ## Local Ports
//!
//! - `FillingSessionStore` - Ephemeral storage for in-progress filling sessions

mod feedback_submitter;
mod filling_session_store;
mod form_repository;
mod public_form_reader;

pub use feedback_submitter::FeedbackSubmitter;
pub use filling_session_store::{FillingSessionStore, SessionMutation};
pub use form_repository::FormRepository;
pub use public_form_reader::PublicFormReader;
