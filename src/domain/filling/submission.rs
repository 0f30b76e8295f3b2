//! Payload handed to the upstream API on submit, and its receipt.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::AnswerValue;
use crate::domain::foundation::{FormId, QuestionId, ResponseId};

/// One answered question, flattened for submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question: QuestionId,
    pub answer_text: String,
    pub answer_value: Value,
}

impl SubmittedAnswer {
    pub fn new(question: QuestionId, answer: &AnswerValue) -> Self {
        Self {
            question,
            answer_text: answer.answer_text(),
            answer_value: answer.answer_value(),
        }
    }
}

/// All answers of a session, in form order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    pub form: FormId,
    pub answers: Vec<SubmittedAnswer>,
}

/// Upstream acknowledgement of a stored response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub message: String,
    pub response_id: ResponseId,
}
