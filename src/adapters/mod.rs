//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `rest` - Upstream forms API client
//! - `memory` - In-memory form store and filling session store
//! - `http` - Axum REST API

pub mod http;
pub mod memory;
pub mod rest;

pub use http::{api_router, FillingAppState, FormsAppState};
pub use memory::{InMemoryFillingSessionStore, InMemoryFormStore};
pub use rest::{RestApiConfig, RestFormApi};
