//! Upstream forms API adapter.

mod client;
mod wire;

pub use client::{RestApiConfig, RestFormApi};
