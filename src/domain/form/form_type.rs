//! Form categories and their built-in question templates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Question, QuestionType};
use crate::domain::foundation::ValidationError;

/// Category of a form, selecting which built-in questions it starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormType {
    #[default]
    Empty,
    General,
    CustomerSatisfaction,
    EmployeeFeedback,
    ProductFeedback,
    ServiceFeedback,
}

impl FormType {
    pub fn all() -> &'static [FormType] {
        &[
            FormType::Empty,
            FormType::General,
            FormType::CustomerSatisfaction,
            FormType::EmployeeFeedback,
            FormType::ProductFeedback,
            FormType::ServiceFeedback,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormType::Empty => "Empty Form",
            FormType::General => "General Feedback",
            FormType::CustomerSatisfaction => "Customer Satisfaction",
            FormType::EmployeeFeedback => "Employee Feedback",
            FormType::ProductFeedback => "Product Feedback",
            FormType::ServiceFeedback => "Service Feedback",
        }
    }

    fn wire_name(&self) -> &'static str {
        match self {
            FormType::Empty => "empty",
            FormType::General => "general",
            FormType::CustomerSatisfaction => "customer_satisfaction",
            FormType::EmployeeFeedback => "employee_feedback",
            FormType::ProductFeedback => "product_feedback",
            FormType::ServiceFeedback => "service_feedback",
        }
    }

    /// Fresh copies of the questions a new form of this type starts with.
    ///
    /// Every call generates new question ids.
    pub fn built_in_questions(&self) -> Vec<Question> {
        let questions = match self {
            FormType::Empty => Vec::new(),
            FormType::General => vec![
                rating("What is your overall experience?", true),
                textarea("Please provide any additional comments or suggestions"),
            ],
            FormType::CustomerSatisfaction => vec![
                rating("How satisfied are you with our service?", true),
                Question::new(
                    QuestionType::Rating10,
                    "How likely are you to recommend us to others?",
                    true,
                ),
                textarea("What did you like most about our service?"),
                textarea("What could we improve?"),
                yes_no("Would you use our service again?"),
            ],
            FormType::EmployeeFeedback => vec![
                rating("How satisfied are you with your current role?", true),
                rating("How would you rate your work-life balance?", true),
                yes_no("Do you feel valued by your manager?"),
                choice(
                    QuestionType::Radio,
                    "What motivates you most at work?",
                    true,
                    &[
                        "Recognition",
                        "Career Growth",
                        "Compensation",
                        "Work Environment",
                        "Other",
                    ],
                ),
                textarea("What suggestions do you have for improving our workplace?"),
            ],
            FormType::ProductFeedback => vec![
                rating("How would you rate this product overall?", true),
                rating("How easy was it to use this product?", true),
                choice(
                    QuestionType::Checkbox,
                    "Which features do you find most valuable?",
                    false,
                    &[
                        "User Interface",
                        "Performance",
                        "Reliability",
                        "Customer Support",
                        "Documentation",
                    ],
                ),
                textarea("What problems did you encounter while using this product?"),
                yes_no("Would you recommend this product to others?"),
            ],
            FormType::ServiceFeedback => vec![
                rating("How would you rate the quality of service you received?", true),
                rating("How responsive was our team to your needs?", true),
                rating("How professional was our staff?", true),
                choice(
                    QuestionType::Radio,
                    "Which aspect of our service impressed you most?",
                    false,
                    &[
                        "Speed",
                        "Quality",
                        "Communication",
                        "Problem Resolution",
                        "Expertise",
                    ],
                ),
                textarea("How can we improve our service?"),
            ],
        };

        questions
            .into_iter()
            .enumerate()
            .map(|(index, mut q)| {
                q.order = index as u32;
                q
            })
            .collect()
    }
}

fn rating(text: &str, is_required: bool) -> Question {
    Question::new(QuestionType::Rating, text, is_required)
}

fn textarea(text: &str) -> Question {
    Question::new(QuestionType::Textarea, text, false)
}

fn yes_no(text: &str) -> Question {
    Question::new(QuestionType::YesNo, text, true)
}

fn choice(
    question_type: QuestionType,
    text: &str,
    is_required: bool,
    options: &[&str],
) -> Question {
    Question::with_options(
        question_type,
        text,
        is_required,
        options.iter().map(|o| o.to_string()).collect(),
    )
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl FromStr for FormType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormType::all()
            .iter()
            .copied()
            .find(|t| t.wire_name() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("form_type", format!("unknown form type '{}'", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::completion::is_question_complete;

    #[test]
    fn empty_type_has_no_questions() {
        assert!(FormType::Empty.built_in_questions().is_empty());
    }

    #[test]
    fn customer_satisfaction_template_shape() {
        let questions = FormType::CustomerSatisfaction.built_in_questions();
        let types: Vec<_> = questions.iter().map(|q| q.question_type).collect();
        assert_eq!(
            types,
            vec![
                QuestionType::Rating,
                QuestionType::Rating10,
                QuestionType::Textarea,
                QuestionType::Textarea,
                QuestionType::YesNo,
            ]
        );
        assert_eq!(questions.iter().filter(|q| q.is_required).count(), 3);
    }

    #[test]
    fn employee_template_offers_motivation_choices() {
        let questions = FormType::EmployeeFeedback.built_in_questions();
        let motivation = &questions[3];
        assert_eq!(motivation.question_type, QuestionType::Radio);
        assert_eq!(motivation.options.len(), 5);
        assert_eq!(motivation.option_links.len(), 5);
    }

    #[test]
    fn every_template_question_is_complete() {
        for form_type in FormType::all() {
            for question in form_type.built_in_questions() {
                assert!(
                    is_question_complete(&question).complete,
                    "{:?} question '{}' should be complete",
                    form_type,
                    question.text
                );
            }
        }
    }

    #[test]
    fn each_call_generates_fresh_ids() {
        let a = FormType::General.built_in_questions();
        let b = FormType::General.built_in_questions();
        assert_ne!(a[0].id, b[0].id);
    }

    #[test]
    fn parses_wire_names() {
        assert_eq!("product_feedback".parse::<FormType>().unwrap(), FormType::ProductFeedback);
        assert!("survey".parse::<FormType>().is_err());
        assert_eq!(FormType::ServiceFeedback.to_string(), "service_feedback");
    }
}
