//! Wire shapes of the upstream forms API.
//!
//! Forms arrive either with questions nested in their sections or with a
//! flat `questions` list where each question names its `section_id`.
//! Both are folded into the nested graph.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::form::{Form, Question, Section};
use crate::domain::foundation::{DomainError, ErrorCode, SectionId};

#[derive(Debug, Deserialize)]
pub(crate) struct FormPayload {
    #[serde(flatten)]
    form: Form,
    #[serde(default)]
    questions: Vec<FlatQuestion>,
}

#[derive(Debug, Deserialize)]
struct FlatQuestion {
    #[serde(flatten)]
    question: Question,
    #[serde(default)]
    section_id: Option<SectionId>,
}

impl FormPayload {
    pub(crate) fn into_form(self) -> Form {
        let mut form = self.form;
        let nested = form.sections.iter().any(|s| !s.questions.is_empty());

        if !nested && !self.questions.is_empty() {
            if form.sections.is_empty() {
                form.sections.push(Section::new(0));
            }
            for flat in self.questions {
                let index = flat
                    .section_id
                    .as_ref()
                    .and_then(|id| form.section_index(id))
                    .unwrap_or(0);
                form.sections[index].questions.push(flat.question);
            }
        }

        form.normalized()
    }
}

/// Error body returned by the upstream API on 4xx responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    missing_questions: Vec<Value>,
    #[serde(default)]
    invalid_questions: Vec<Value>,
}

/// Builds a domain error from a rejected request's status and body.
pub(crate) fn rejection(status: u16, body: &str) -> DomainError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .error
        .clone()
        .or(parsed.detail.clone())
        .unwrap_or_else(|| format!("Upstream API returned {}", status));

    match status {
        404 => DomainError::new(ErrorCode::FormNotFound, "Form not found"),
        410 => DomainError::new(ErrorCode::FormClosed, message),
        400 if !parsed.missing_questions.is_empty() || !parsed.invalid_questions.is_empty() => {
            let mut err = DomainError::new(ErrorCode::FormIncomplete, message);
            if !parsed.missing_questions.is_empty() {
                err = err.with_detail("missing_questions", render(&parsed.missing_questions));
            }
            if !parsed.invalid_questions.is_empty() {
                err = err.with_detail("invalid_questions", render(&parsed.invalid_questions));
            }
            err
        }
        400 | 422 => DomainError::new(ErrorCode::ValidationFailed, message),
        _ => DomainError::new(
            ErrorCode::UpstreamUnavailable,
            format!("Upstream API returned {}: {}", status, message),
        ),
    }
}

fn render(values: &[Value]) -> String {
    values
        .iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
