//! In-memory adapters for tests and local development.

mod form_store;
mod session_store;

pub use form_store::InMemoryFormStore;
pub use session_store::InMemoryFillingSessionStore;
