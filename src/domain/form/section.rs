//! Sections: ordered groups of questions shown as one step.

use serde::{Deserialize, Serialize};

use super::Question;
use crate::domain::foundation::{QuestionId, SectionId};

/// One page of a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default = "SectionId::generate")]
    pub id: SectionId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Default forward jump taken by "Next" when no option jump applies.
    #[serde(
        default,
        alias = "next_section_on_submit",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_section: Option<SectionId>,
}

impl Section {
    /// Creates an empty, untitled section at `order`.
    pub fn new(order: u32) -> Self {
        Self {
            id: SectionId::generate(),
            title: String::new(),
            description: String::new(),
            order,
            questions: Vec::new(),
            next_section: None,
        }
    }

    /// Creates a titled section holding `questions`.
    pub fn with_questions(title: impl Into<String>, questions: Vec<Question>) -> Self {
        let mut section = Self::new(0);
        section.title = title.into();
        section.questions = questions;
        section.renumber_questions();
        section
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| &q.id == id)
    }

    /// Display title, falling back to the 1-based position.
    pub fn display_title(&self) -> String {
        if self.title.trim().is_empty() {
            format!("Section {}", self.order + 1)
        } else {
            self.title.clone()
        }
    }

    /// Reassigns question `order` to match list position.
    pub(crate) fn renumber_questions(&mut self) {
        for (index, question) in self.questions.iter_mut().enumerate() {
            question.order = index as u32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::QuestionType;

    #[test]
    fn accepts_legacy_next_section_field() {
        let section: Section = serde_json::from_value(serde_json::json!({
            "id": "s1",
            "title": "Intro",
            "order": 0,
            "questions": [],
            "next_section_on_submit": "s3"
        }))
        .unwrap();
        assert_eq!(section.next_section.as_ref().map(|s| s.as_str()), Some("s3"));
    }

    #[test]
    fn missing_id_gets_generated() {
        let section: Section = serde_json::from_value(serde_json::json!({ "title": "T" })).unwrap();
        assert!(!section.id.as_str().is_empty());
    }

    #[test]
    fn with_questions_numbers_in_order() {
        let section = Section::with_questions(
            "About you",
            vec![
                Question::new(QuestionType::Text, "Name", true),
                Question::new(QuestionType::Email, "Email", false),
            ],
        );
        let orders: Vec<u32> = section.questions.iter().map(|q| q.order).collect();
        assert_eq!(orders, vec![0, 1]);
    }

    #[test]
    fn display_title_falls_back_to_position() {
        let section = Section::new(2);
        assert_eq!(section.display_title(), "Section 3");
    }
}
