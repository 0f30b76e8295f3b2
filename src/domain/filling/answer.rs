//! Visitor answers and their type conformance rules.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashSet;
use thiserror::Error;

use crate::domain::form::{Question, QuestionType};

/// Digits a phone answer must contain.
const PHONE_DIGITS: usize = 10;

/// A visitor's value for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(i64),
    Text(String),
    Many(Vec<String>),
}

impl AnswerValue {
    /// Empty answers count as unanswered.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Number(_) => false,
            AnswerValue::Text(s) => s.trim().is_empty(),
            AnswerValue::Many(values) => values.is_empty(),
        }
    }

    /// Human-readable rendering submitted as `answer_text`.
    pub fn answer_text(&self) -> String {
        match self {
            AnswerValue::Number(n) => n.to_string(),
            AnswerValue::Text(s) => s.clone(),
            AnswerValue::Many(values) => values.join(", "),
        }
    }

    /// Structured rendering submitted as `answer_value`.
    pub fn answer_value(&self) -> Value {
        match self {
            AnswerValue::Number(n) => json!({ "value": n }),
            AnswerValue::Text(s) => json!({ "value": s }),
            AnswerValue::Many(values) => json!({ "values": values }),
        }
    }

    /// The single selected label, if this is a text answer.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    fn as_integer(&self) -> Option<i64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            AnswerValue::Text(s) => s.trim().parse().ok(),
            AnswerValue::Many(_) => None,
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<i64> for AnswerValue {
    fn from(n: i64) -> Self {
        AnswerValue::Number(n)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(values: Vec<&str>) -> Self {
        AnswerValue::Many(values.into_iter().map(String::from).collect())
    }
}

/// Why an answer does not satisfy its question.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerIssue {
    #[error("This question is required")]
    Missing,

    #[error("Answer has the wrong shape for this question")]
    WrongShape,

    #[error("'{0}' is not one of the options")]
    UnknownOption(String),

    #[error("Rating must be between {min} and {max}")]
    OutOfScale { min: i64, max: i64 },

    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// Phone numbers are valid when they contain exactly ten digits.
pub fn is_valid_phone(value: &str) -> bool {
    value.chars().filter(char::is_ascii_digit).count() == PHONE_DIGITS
}

/// Accepts `local@domain.tld` shapes without whitespace.
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Checks an answer against its question.
///
/// Unanswered optional questions pass.
pub fn check_answer(question: &Question, answer: Option<&AnswerValue>) -> Result<(), AnswerIssue> {
    let answer = match answer {
        Some(a) if !a.is_empty() => a,
        _ if question.is_required => return Err(AnswerIssue::Missing),
        _ => return Ok(()),
    };

    match question.question_type {
        QuestionType::Text | QuestionType::Textarea => match answer {
            AnswerValue::Many(_) => Err(AnswerIssue::WrongShape),
            _ => Ok(()),
        },
        QuestionType::Radio | QuestionType::Dropdown | QuestionType::YesNo => {
            let label = answer.as_text().ok_or(AnswerIssue::WrongShape)?;
            if question.option_index(label).is_some() {
                Ok(())
            } else {
                Err(AnswerIssue::UnknownOption(label.to_string()))
            }
        }
        QuestionType::Checkbox => {
            let AnswerValue::Many(values) = answer else {
                return Err(AnswerIssue::WrongShape);
            };
            let unique: HashSet<&String> = values.iter().collect();
            if unique.len() != values.len() {
                return Err(AnswerIssue::WrongShape);
            }
            match values.iter().find(|v| question.option_index(v).is_none()) {
                Some(unknown) => Err(AnswerIssue::UnknownOption(unknown.clone())),
                None => Ok(()),
            }
        }
        QuestionType::Rating | QuestionType::Rating10 => {
            let scale = question.question_type.rating_scale().ok_or(AnswerIssue::WrongShape)?;
            let out_of_scale = AnswerIssue::OutOfScale {
                min: *scale.start(),
                max: *scale.end(),
            };
            match answer.as_integer() {
                Some(n) if scale.contains(&n) => Ok(()),
                Some(_) => Err(out_of_scale),
                None => Err(AnswerIssue::WrongShape),
            }
        }
        QuestionType::Email => match answer.as_text() {
            Some(s) if is_valid_email(s) => Ok(()),
            Some(_) => Err(AnswerIssue::InvalidEmail),
            None => Err(AnswerIssue::WrongShape),
        },
        QuestionType::Phone => match answer.as_text() {
            Some(s) if is_valid_phone(s) => Ok(()),
            Some(_) => Err(AnswerIssue::InvalidPhone),
            None => Err(AnswerIssue::WrongShape),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required(question_type: QuestionType) -> Question {
        Question::new(question_type, "Q", true)
    }

    #[test]
    fn phone_needs_exactly_ten_digits() {
        assert!(!is_valid_phone("abc"));
        assert!(is_valid_phone("(555) 123-4567"));
        assert!(is_valid_phone("5551234567"));
        assert!(!is_valid_phone("+1 555 123 4567"));
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("ana@example.com"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ana @example.com"));
        assert!(!is_valid_email("ana@@example.com"));
    }

    #[test]
    fn empty_answers() {
        assert!(AnswerValue::from("  ").is_empty());
        assert!(AnswerValue::Many(vec![]).is_empty());
        assert!(!AnswerValue::from(0).is_empty());
    }

    #[test]
    fn submission_renderings() {
        let many = AnswerValue::from(vec!["Speed", "Quality"]);
        assert_eq!(many.answer_text(), "Speed, Quality");
        assert_eq!(many.answer_value(), json!({ "values": ["Speed", "Quality"] }));

        let number = AnswerValue::from(4);
        assert_eq!(number.answer_text(), "4");
        assert_eq!(number.answer_value(), json!({ "value": 4 }));

        let text = AnswerValue::from("Great");
        assert_eq!(text.answer_value(), json!({ "value": "Great" }));
    }

    #[test]
    fn untagged_deserialization_picks_shape() {
        let n: AnswerValue = serde_json::from_str("3").unwrap();
        let t: AnswerValue = serde_json::from_str("\"Yes\"").unwrap();
        let m: AnswerValue = serde_json::from_str("[\"A\"]").unwrap();
        assert_eq!(n, AnswerValue::Number(3));
        assert_eq!(t, AnswerValue::Text("Yes".into()));
        assert_eq!(m, AnswerValue::Many(vec!["A".into()]));
    }

    #[test]
    fn optional_unanswered_passes_required_fails() {
        let optional = Question::new(QuestionType::Text, "Q", false);
        assert_eq!(check_answer(&optional, None), Ok(()));
        assert_eq!(
            check_answer(&required(QuestionType::Text), Some(&"".into())),
            Err(AnswerIssue::Missing)
        );
    }

    #[test]
    fn rating_accepts_numbers_and_numeric_text_in_scale() {
        let q = required(QuestionType::Rating);
        assert_eq!(check_answer(&q, Some(&5.into())), Ok(()));
        assert_eq!(check_answer(&q, Some(&"3".into())), Ok(()));
        assert_eq!(
            check_answer(&q, Some(&6.into())),
            Err(AnswerIssue::OutOfScale { min: 1, max: 5 })
        );
        assert_eq!(check_answer(&required(QuestionType::Rating10), Some(&10.into())), Ok(()));
    }

    #[test]
    fn yes_no_must_be_an_option() {
        let q = required(QuestionType::YesNo);
        assert_eq!(check_answer(&q, Some(&"No".into())), Ok(()));
        assert_eq!(
            check_answer(&q, Some(&"Maybe".into())),
            Err(AnswerIssue::UnknownOption("Maybe".into()))
        );
    }

    #[test]
    fn checkbox_requires_subset_of_options() {
        let q = Question::with_options(
            QuestionType::Checkbox,
            "Features",
            true,
            vec!["UI".into(), "Speed".into()],
        );
        assert_eq!(check_answer(&q, Some(&vec!["UI"].into())), Ok(()));
        assert_eq!(
            check_answer(&q, Some(&vec!["UI", "Price"].into())),
            Err(AnswerIssue::UnknownOption("Price".into()))
        );
        assert_eq!(check_answer(&q, Some(&"UI".into())), Err(AnswerIssue::WrongShape));
        assert_eq!(check_answer(&q, Some(&AnswerValue::Many(vec![]))), Err(AnswerIssue::Missing));
    }

    #[test]
    fn phone_question_reports_invalid_number() {
        let q = required(QuestionType::Phone);
        assert_eq!(check_answer(&q, Some(&"abc".into())), Err(AnswerIssue::InvalidPhone));
        assert_eq!(check_answer(&q, Some(&"(555) 123-4567".into())), Ok(()));
    }
}
