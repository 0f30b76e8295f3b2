//! The form graph: ordered sections linked by forward jumps.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use super::{FormType, Question, Section};
use crate::domain::foundation::{DomainError, ErrorCode, FormId, QuestionId, SectionId, Timestamp};

fn default_active() -> bool {
    true
}

/// A feedback form.
///
/// Fields are public because the graph travels over the wire and is
/// edited by callers other than [`FormBuilder`](super::FormBuilder).
/// Such writers must pass [`Form::validate_structure`] before a graph
/// is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FormId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub form_type: FormType,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// A violation of the graph's structural invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureIssue {
    #[error("form must have at least one section")]
    NoSections,

    #[error("section at position {index} has order {order}")]
    OrderMismatch { index: usize, order: u32 },

    #[error("section id '{0}' is used more than once")]
    DuplicateSectionId(SectionId),

    #[error("question id '{0}' is used more than once")]
    DuplicateQuestionId(QuestionId),

    #[error("question '{question}' has fewer option links than options")]
    MissingOptionLinks { question: QuestionId },

    #[error("section {section} links to unknown section '{target}'")]
    UnknownJumpTarget { section: usize, target: SectionId },

    #[error("section {section} links backwards to section {target}")]
    BackwardJump { section: usize, target: usize },
}

impl Form {
    /// Creates an untitled form with one empty section.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: String::new(),
            form_type: FormType::Empty,
            is_active: true,
            expires_at: None,
            sections: vec![Section::new(0)],
        }
    }

    /// Position of the section with this id.
    pub fn section_index(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }

    /// Finds a question anywhere in the form with its section position.
    pub fn find_question(&self, id: &QuestionId) -> Option<(usize, &Question)> {
        self.sections.iter().enumerate().find_map(|(index, section)| {
            section.question(id).map(|question| (index, question))
        })
    }

    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    /// Questions in form order: section by section, question by question.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at.map_or(false, |expiry| expiry.is_before(&now))
    }

    /// Whether visitors may fill the form at `now`.
    pub fn is_open(&self, now: Timestamp) -> bool {
        self.is_active && !self.is_expired(now)
    }

    /// Sorts sections and questions by their `order`, renumbers both
    /// contiguously and pads option links.
    ///
    /// Graphs arriving from outside may use gapped or 1-based orders.
    pub fn normalized(mut self) -> Self {
        self.sections.sort_by_key(|s| s.order);
        for section in &mut self.sections {
            section.questions.sort_by_key(|q| q.order);
            section.renumber_questions();
            for question in &mut section.questions {
                question.align_option_links();
            }
        }
        self.renumber_sections();
        self
    }

    /// Reassigns section `order` to match list position.
    pub(crate) fn renumber_sections(&mut self) {
        for (index, section) in self.sections.iter_mut().enumerate() {
            section.order = index as u32;
        }
    }

    /// Lists every structural invariant the graph violates.
    pub fn structure_issues(&self) -> Vec<StructureIssue> {
        let mut issues = Vec::new();

        if self.sections.is_empty() {
            issues.push(StructureIssue::NoSections);
        }

        let mut section_ids = HashSet::new();
        let mut question_ids = HashSet::new();

        for (index, section) in self.sections.iter().enumerate() {
            if section.order as usize != index {
                issues.push(StructureIssue::OrderMismatch {
                    index,
                    order: section.order,
                });
            }
            if !section_ids.insert(&section.id) {
                issues.push(StructureIssue::DuplicateSectionId(section.id.clone()));
            }

            for question in &section.questions {
                if !question_ids.insert(&question.id) {
                    issues.push(StructureIssue::DuplicateQuestionId(question.id.clone()));
                }
                if question.option_links.len() < question.options.len() {
                    issues.push(StructureIssue::MissingOptionLinks {
                        question: question.id.clone(),
                    });
                }
                for target in question.option_links.iter().filter_map(|l| l.next_section.as_ref()) {
                    if let Some(issue) = self.check_jump(index, target) {
                        issues.push(issue);
                    }
                }
            }

            if let Some(target) = &section.next_section {
                if let Some(issue) = self.check_jump(index, target) {
                    issues.push(issue);
                }
            }
        }

        issues
    }

    fn check_jump(&self, from: usize, target: &SectionId) -> Option<StructureIssue> {
        match self.section_index(target) {
            None => Some(StructureIssue::UnknownJumpTarget {
                section: from,
                target: target.clone(),
            }),
            Some(to) if to <= from => Some(StructureIssue::BackwardJump {
                section: from,
                target: to,
            }),
            Some(_) => None,
        }
    }

    /// Fails with every structural issue itemized in the error details.
    pub fn validate_structure(&self) -> Result<(), DomainError> {
        let issues = self.structure_issues();
        if issues.is_empty() {
            return Ok(());
        }

        let mut err = DomainError::new(
            ErrorCode::InvalidStructure,
            format!("Form structure has {} issue(s)", issues.len()),
        );
        for (n, issue) in issues.iter().enumerate() {
            err = err.with_detail(format!("issue_{}", n + 1), issue.to_string());
        }
        Err(err)
    }
}
