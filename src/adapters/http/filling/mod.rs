//! HTTP adapter for filling sessions.
//!
//! Visitors start a session on a public form, answer the questions of the
//! current section, move with "Next"/"Previous", and submit.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::FillingAppState;
pub use routes::filling_router;
