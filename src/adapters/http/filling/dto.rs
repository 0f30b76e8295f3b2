//! HTTP DTOs (Data Transfer Objects) for filling endpoints.
//!
//! These types define the JSON request/response structure for the filling API.
//! They serve as the boundary between HTTP and the application layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::filling::{
    AnswerProblem, AnswerValue, FillingSession, FillingStatus, NavigationHint, SubmissionReceipt,
};
use crate::domain::form::Form;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to answer a question of the current section.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    /// Text, number, or list of labels for checkbox questions.
    pub value: AnswerValue,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Full view of a filling session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub form_id: String,
    pub status: FillingStatus,
    pub form: Form,
    pub current_section_index: usize,
    /// Section "Next" would lead to; `None` on the last section.
    pub next_section_index: Option<usize>,
    pub visited_sections: Vec<usize>,
    pub history: Vec<usize>,
    pub can_go_back: bool,
    pub is_last_section: bool,
    pub is_current_section_complete: bool,
    /// Keyed by question id.
    pub answers: BTreeMap<String, AnswerValue>,
    pub missing_answers: Vec<AnswerProblem>,
    pub navigation_hints: Vec<NavigationHint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<SubmissionReceipt>,
}

impl From<&FillingSession> for SessionResponse {
    fn from(session: &FillingSession) -> Self {
        let navigation = session.navigation();
        Self {
            session_id: session.id().to_string(),
            form_id: session.form_id().to_string(),
            status: session.status(),
            form: session.form().clone(),
            current_section_index: session.current_section_index(),
            next_section_index: session.next_target(),
            visited_sections: navigation.visited_sections().iter().copied().collect(),
            history: navigation.history().as_slice().to_vec(),
            can_go_back: navigation.can_go_back(),
            is_last_section: session.is_last_section(),
            is_current_section_complete: session.is_current_section_complete(),
            answers: session
                .answers()
                .iter()
                .map(|(id, value)| (id.to_string(), value.clone()))
                .collect(),
            missing_answers: session.missing_answers(),
            navigation_hints: session.navigation_hints(),
            receipt: session.receipt().cloned(),
        }
    }
}

/// Response after answering a question.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    /// Section the answer jumped to, if any.
    pub jumped_to: Option<usize>,
    pub session: SessionResponse,
}

/// Response after pressing "Next" or "Previous".
#[derive(Debug, Clone, Serialize)]
pub struct NavigateResponse {
    /// `None` when there was no earlier section to return to.
    pub moved_to: Option<usize>,
    pub session: SessionResponse,
}

/// Response after a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitResponse {
    pub message: String,
    pub response_id: String,
    pub session: SessionResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::filling::test_support::branching_form;
    use crate::domain::foundation::Timestamp;

    #[test]
    fn answer_request_accepts_every_value_shape() {
        let text: AnswerRequest = serde_json::from_str(r#"{"value": "Yes"}"#).unwrap();
        assert_eq!(text.value, AnswerValue::Text("Yes".into()));

        let number: AnswerRequest = serde_json::from_str(r#"{"value": 4}"#).unwrap();
        assert_eq!(number.value, AnswerValue::Number(4));

        let many: AnswerRequest = serde_json::from_str(r#"{"value": ["A", "B"]}"#).unwrap();
        assert_eq!(many.value, AnswerValue::Many(vec!["A".into(), "B".into()]));
    }

    #[test]
    fn session_response_reflects_navigation() {
        let mut session = FillingSession::start(branching_form(), Timestamp::now()).unwrap();
        let route = session.form().sections[0].questions[0].id.clone();
        session.answer(&route, "X".into()).unwrap();

        let response = SessionResponse::from(&session);

        assert_eq!(response.current_section_index, 2);
        assert_eq!(response.visited_sections, vec![0, 2]);
        assert_eq!(response.history, vec![0, 2]);
        assert!(response.can_go_back);
        assert!(response.is_last_section);
        assert_eq!(response.next_section_index, None);
        assert_eq!(response.answers.get(&route.to_string()), Some(&AnswerValue::Text("X".into())));
        assert_eq!(response.missing_answers.len(), 1);
    }
}
