//! Questions and their types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use super::OptionLink;
use crate::domain::foundation::{QuestionId, SectionId};

/// The kinds of question a form can ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Text,
    Textarea,
    Radio,
    Checkbox,
    Dropdown,
    Rating,
    #[serde(rename = "rating_10")]
    Rating10,
    YesNo,
    Email,
    Phone,
}

impl QuestionType {
    /// All question types in the order the builder offers them.
    pub fn all() -> &'static [QuestionType] {
        &[
            QuestionType::Text,
            QuestionType::Textarea,
            QuestionType::Radio,
            QuestionType::Checkbox,
            QuestionType::Dropdown,
            QuestionType::Rating,
            QuestionType::Rating10,
            QuestionType::YesNo,
            QuestionType::Email,
            QuestionType::Phone,
        ]
    }

    /// Types whose options are authored freely and must be complete.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            QuestionType::Radio | QuestionType::Checkbox | QuestionType::Dropdown
        )
    }

    /// Types whose answer is exactly one option label.
    ///
    /// Only these trigger option jumps while filling.
    pub fn is_single_choice(&self) -> bool {
        matches!(self, QuestionType::Radio | QuestionType::Dropdown)
    }

    /// Types whose options are generated and cannot be edited.
    pub fn has_fixed_options(&self) -> bool {
        matches!(
            self,
            QuestionType::YesNo | QuestionType::Rating | QuestionType::Rating10
        )
    }

    /// Types that carry an option list at all.
    pub fn has_options(&self) -> bool {
        self.is_choice() || self.has_fixed_options()
    }

    /// The numeric scale of rating questions.
    pub fn rating_scale(&self) -> Option<RangeInclusive<i64>> {
        match self {
            QuestionType::Rating => Some(1..=5),
            QuestionType::Rating10 => Some(1..=10),
            _ => None,
        }
    }

    /// Options a question receives when switched to this type.
    ///
    /// `None` means existing options are kept (radio, checkbox).
    pub fn default_options(&self) -> Option<Vec<String>> {
        match self {
            QuestionType::YesNo => Some(vec!["Yes".to_string(), "No".to_string()]),
            QuestionType::Rating | QuestionType::Rating10 => self
                .rating_scale()
                .map(|scale| scale.map(|n| n.to_string()).collect()),
            QuestionType::Dropdown => Some(vec!["Option 1".to_string(), "Option 2".to_string()]),
            QuestionType::Radio | QuestionType::Checkbox => None,
            _ => Some(Vec::new()),
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::Text => "Short Text",
            QuestionType::Textarea => "Long Text",
            QuestionType::Radio => "Multiple Choice",
            QuestionType::Checkbox => "Checkboxes",
            QuestionType::Dropdown => "Dropdown",
            QuestionType::Rating => "Rating (1-5)",
            QuestionType::Rating10 => "Rating (1-10)",
            QuestionType::YesNo => "Yes/No",
            QuestionType::Email => "Email",
            QuestionType::Phone => "Phone",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single question inside a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default = "QuestionId::generate")]
    pub id: QuestionId,
    #[serde(default)]
    pub text: String,
    #[serde(alias = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub option_links: Vec<OptionLink>,
}

impl Question {
    /// Creates a blank question of the given type with its default options.
    pub fn blank(question_type: QuestionType) -> Self {
        let options = question_type.default_options().unwrap_or_default();
        let option_links = options.iter().map(OptionLink::unlinked).collect();
        Self {
            id: QuestionId::generate(),
            text: String::new(),
            question_type,
            is_required: false,
            order: 0,
            options,
            option_links,
        }
    }

    /// Creates a question with text and explicit options.
    pub fn with_options(
        question_type: QuestionType,
        text: impl Into<String>,
        is_required: bool,
        options: Vec<String>,
    ) -> Self {
        let option_links = options.iter().map(OptionLink::unlinked).collect();
        Self {
            id: QuestionId::generate(),
            text: text.into(),
            question_type,
            is_required,
            order: 0,
            options,
            option_links,
        }
    }

    /// Creates a question with text, using the type's default options.
    pub fn new(question_type: QuestionType, text: impl Into<String>, is_required: bool) -> Self {
        let mut question = Self::blank(question_type);
        question.text = text.into();
        question.is_required = is_required;
        question
    }

    /// Index of the option with exactly this label.
    pub fn option_index(&self, label: &str) -> Option<usize> {
        self.options.iter().position(|o| o == label)
    }

    /// The jump target attached to the option with this label, if any.
    pub fn jump_target_for(&self, label: &str) -> Option<&SectionId> {
        let index = self.option_index(label)?;
        self.option_links
            .get(index)
            .and_then(|link| link.next_section.as_ref())
    }

    /// Pads `option_links` so every option has a link and mirrors its label.
    pub(crate) fn align_option_links(&mut self) {
        for (index, option) in self.options.iter().enumerate() {
            match self.option_links.get_mut(index) {
                Some(link) => link.text = option.clone(),
                None => self.option_links.push(OptionLink::unlinked(option)),
            }
        }
    }

    /// Resets options and links to the defaults of `question_type`.
    pub(crate) fn change_type(&mut self, question_type: QuestionType) {
        self.question_type = question_type;
        if let Some(options) = question_type.default_options() {
            self.option_links = options.iter().map(OptionLink::unlinked).collect();
            self.options = options;
        } else {
            self.align_option_links();
        }
    }
}
