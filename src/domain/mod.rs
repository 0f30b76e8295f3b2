//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `form` - Form graph, builder and completion validator
//! - `filling` - Filling sessions, answers and section navigation

pub mod filling;
pub mod form;
pub mod foundation;
