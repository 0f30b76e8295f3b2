//! HTTP DTOs for form authoring endpoints.
//!
//! Forms travel as the domain `Form` graph itself; only the template
//! listing needs its own shape.

use serde::Serialize;

use crate::domain::form::{FormType, Question};

/// Built-in questions for a form type.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateResponse {
    pub form_type: FormType,
    pub label: String,
    pub questions: Vec<Question>,
}

impl From<FormType> for TemplateResponse {
    fn from(form_type: FormType) -> Self {
        Self {
            form_type,
            label: form_type.label().to_string(),
            questions: form_type.built_in_questions(),
        }
    }
}
