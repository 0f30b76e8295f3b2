//! HTTP adapter for form authoring.
//!
//! Forms are saved as whole graphs; every save is validated for
//! completeness and forward-only navigation before it reaches upstream.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::FormsAppState;
pub use routes::forms_router;
