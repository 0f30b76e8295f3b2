//! Completion rules for authored questions.
//!
//! A question is complete when a visitor could meaningfully answer it:
//! it has text, and choice questions offer at least two distinct options.
//! Incomplete questions block adding further questions to their section
//! and block saving the form.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use super::{Form, Question, Section, StructureIssue};
use crate::domain::foundation::{DomainError, ErrorCode, QuestionId};

/// Something a question still lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingField {
    QuestionText,
    AtLeastTwoOptions,
    DistinctOptions,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MissingField::QuestionText => "Question text",
            MissingField::AtLeastTwoOptions => "At least 2 options",
            MissingField::DistinctOptions => "Distinct options",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionCompleteness {
    pub complete: bool,
    pub missing_fields: Vec<MissingField>,
}

/// An incomplete question located by 1-based section and question number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncompleteQuestion {
    pub section_number: usize,
    pub question_number: usize,
    pub question_id: QuestionId,
    pub missing_fields: Vec<MissingField>,
}

impl fmt::Display for IncompleteQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let missing: Vec<String> = self.missing_fields.iter().map(|m| m.to_string()).collect();
        write!(
            f,
            "Section {}, Question {}: {}",
            self.section_number,
            self.question_number,
            missing.join(", ")
        )
    }
}

pub fn is_question_complete(question: &Question) -> QuestionCompleteness {
    let mut missing_fields = Vec::new();

    if question.text.trim().is_empty() {
        missing_fields.push(MissingField::QuestionText);
    }

    if question.question_type.is_choice() {
        let labels: Vec<String> = question
            .options
            .iter()
            .map(|o| o.trim().to_lowercase())
            .filter(|o| !o.is_empty())
            .collect();
        let distinct: HashSet<&String> = labels.iter().collect();

        if labels.len() < 2 {
            missing_fields.push(MissingField::AtLeastTwoOptions);
        } else if distinct.len() != labels.len() {
            missing_fields.push(MissingField::DistinctOptions);
        }
    }

    QuestionCompleteness {
        complete: missing_fields.is_empty(),
        missing_fields,
    }
}

/// Incomplete questions of one section, numbered with `section_number`.
pub fn incomplete_in_section(section: &Section, section_number: usize) -> Vec<IncompleteQuestion> {
    section
        .questions
        .iter()
        .enumerate()
        .filter_map(|(index, question)| {
            let completeness = is_question_complete(question);
            (!completeness.complete).then(|| IncompleteQuestion {
                section_number,
                question_number: index + 1,
                question_id: question.id.clone(),
                missing_fields: completeness.missing_fields,
            })
        })
        .collect()
}

/// Every incomplete question in the form, in form order.
pub fn are_all_questions_complete(form: &Form) -> Vec<IncompleteQuestion> {
    form.sections
        .iter()
        .enumerate()
        .flat_map(|(index, section)| incomplete_in_section(section, index + 1))
        .collect()
}

/// A reason the form cannot be saved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadinessIssue {
    MissingTitle,
    UntitledSection { section_number: usize },
    NoQuestions,
    Incomplete(IncompleteQuestion),
    Structure(StructureIssue),
}

impl fmt::Display for ReadinessIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadinessIssue::MissingTitle => write!(f, "Form title is required"),
            ReadinessIssue::UntitledSection { section_number } => {
                write!(f, "Section {} needs a title", section_number)
            }
            ReadinessIssue::NoQuestions => write!(f, "Add at least one question"),
            ReadinessIssue::Incomplete(q) => write!(f, "{}", q),
            ReadinessIssue::Structure(issue) => write!(f, "{}", issue),
        }
    }
}

pub fn readiness_issues(form: &Form) -> Vec<ReadinessIssue> {
    let mut issues = Vec::new();

    if form.title.trim().is_empty() {
        issues.push(ReadinessIssue::MissingTitle);
    }
    for (index, section) in form.sections.iter().enumerate() {
        if section.title.trim().is_empty() {
            issues.push(ReadinessIssue::UntitledSection {
                section_number: index + 1,
            });
        }
    }
    if form.question_count() == 0 {
        issues.push(ReadinessIssue::NoQuestions);
    }
    issues.extend(
        are_all_questions_complete(form)
            .into_iter()
            .map(ReadinessIssue::Incomplete),
    );
    issues.extend(form.structure_issues().into_iter().map(ReadinessIssue::Structure));

    issues
}

/// Gate applied before a form is created or updated upstream.
pub fn check_ready_for_submission(form: &Form) -> Result<(), DomainError> {
    let issues = readiness_issues(form);
    if issues.is_empty() {
        return Ok(());
    }

    let code = if issues.iter().all(|i| matches!(i, ReadinessIssue::Incomplete(_))) {
        ErrorCode::IncompleteQuestions
    } else {
        ErrorCode::ValidationFailed
    };
    let mut err = DomainError::new(code, "Please fix the following before saving the form");
    for (n, issue) in issues.iter().enumerate() {
        err = err.with_detail(format!("issue_{}", n + 1), issue.to_string());
    }
    Err(err)
}
