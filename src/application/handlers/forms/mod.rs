//! Form authoring handlers - loading and saving whole form graphs.
//!
//! Interactive editing happens on `FormBuilder` in the caller; these
//! handlers only move validated graphs to and from the forms API.

mod error;
mod get_form;
mod save_form;

pub use error::FormError;
pub use get_form::{GetFormHandler, GetFormQuery};
pub use save_form::{SaveFormCommand, SaveFormHandler, SaveFormResult};
