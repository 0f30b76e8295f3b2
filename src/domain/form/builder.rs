//! Section graph builder.
//!
//! `FormBuilder` owns a single [`Form`] and is the only way the authoring
//! side mutates it. Every operation runs against a copy of the current
//! graph and is committed only when it succeeds, so a rejected operation
//! never leaves a partial change behind. Committed snapshots feed undo
//! and redo.
//!
//! Invariants maintained after every committed operation:
//!
//! - at least one section exists
//! - section and question `order` are contiguous from 0
//! - `option_links.len() >= options.len()` for every question
//! - every jump target exists and lies strictly after its source section

use serde::{Deserialize, Serialize};

use super::completion::incomplete_in_section;
use super::link_index::{clear_link, LinkIndex};
use super::{Form, FormType, OptionLink, Question, QuestionType, Section};
use crate::domain::foundation::{DomainError, ErrorCode, QuestionId, SectionId, Timestamp};

/// Number of snapshots kept for undo.
const HISTORY_LIMIT: usize = 50;

/// Minimum options a choice question may be reduced to.
const MIN_CHOICE_OPTIONS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// A section selectable as a jump target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JumpTarget {
    pub id: SectionId,
    pub title: String,
    pub order: u32,
}

#[derive(Debug, Clone)]
pub struct FormBuilder {
    form: Form,
    undo_stack: Vec<Form>,
    redo_stack: Vec<Form>,
}

impl FormBuilder {
    /// Starts a new form with one empty section.
    pub fn new(title: impl Into<String>) -> Self {
        Self::from_form(Form::new(title))
    }

    /// Starts editing an existing form.
    ///
    /// The graph is normalized first; a graph with no sections gets one.
    pub fn from_form(form: Form) -> Self {
        let mut form = form.normalized();
        if form.sections.is_empty() {
            form.sections.push(Section::new(0));
        }
        Self {
            form,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn into_form(self) -> Form {
        self.form
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Restores the previous snapshot. Returns false when there is none.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(previous) => {
                self.redo_stack.push(std::mem::replace(&mut self.form, previous));
                true
            }
            None => false,
        }
    }

    /// Re-applies the most recently undone snapshot.
    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(next) => {
                self.undo_stack.push(std::mem::replace(&mut self.form, next));
                true
            }
            None => false,
        }
    }

    fn commit<T>(
        &mut self,
        op: impl FnOnce(&mut Form) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let mut draft = self.form.clone();
        let value = op(&mut draft)?;

        if draft != self.form {
            self.undo_stack.push(std::mem::replace(&mut self.form, draft));
            if self.undo_stack.len() > HISTORY_LIMIT {
                self.undo_stack.remove(0);
            }
            self.redo_stack.clear();
        }
        Ok(value)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Form details
    // ─────────────────────────────────────────────────────────────────────

    pub fn update_details(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), DomainError> {
        let (title, description) = (title.into(), description.into());
        self.commit(|form| {
            form.title = title;
            form.description = description;
            Ok(())
        })
    }

    pub fn set_active(&mut self, is_active: bool) -> Result<(), DomainError> {
        self.commit(|form| {
            form.is_active = is_active;
            Ok(())
        })
    }

    pub fn set_expires_at(&mut self, expires_at: Option<Timestamp>) -> Result<(), DomainError> {
        self.commit(|form| {
            form.expires_at = expires_at;
            Ok(())
        })
    }

    /// Replaces the form body with the built-in questions of `form_type`.
    ///
    /// `Empty` resets to a single empty section.
    pub fn apply_form_type(&mut self, form_type: FormType) -> Result<(), DomainError> {
        self.commit(|form| {
            let mut section =
                Section::with_questions(form_type.label(), form_type.built_in_questions());
            if form_type == FormType::Empty {
                section.title.clear();
            }
            form.form_type = form_type;
            form.sections = vec![section];
            form.renumber_sections();
            Ok(())
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Sections
    // ─────────────────────────────────────────────────────────────────────

    /// Appends an empty section and returns its index.
    pub fn add_section(&mut self) -> Result<usize, DomainError> {
        self.commit(|form| {
            let index = form.sections.len();
            form.sections.push(Section::new(index as u32));
            Ok(index)
        })
    }

    pub fn update_section(
        &mut self,
        index: usize,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<(), DomainError> {
        let (title, description) = (title.into(), description.into());
        self.commit(|form| {
            let section = section_mut(form, index)?;
            section.title = title;
            section.description = description;
            Ok(())
        })
    }

    /// Removes a section, clearing every link that pointed at it.
    pub fn remove_section(&mut self, index: usize) -> Result<Section, DomainError> {
        self.commit(|form| {
            section_mut(form, index)?;
            if form.sections.len() == 1 {
                return Err(DomainError::new(
                    ErrorCode::LastSectionRequired,
                    "Cannot remove the last section",
                ));
            }

            let removed_id = form.sections[index].id.clone();
            let links = LinkIndex::build(form);
            for source in links.inbound(&removed_id) {
                clear_link(form, source);
            }

            let removed = form.sections.remove(index);
            form.renumber_sections();
            Ok(removed)
        })
    }

    /// Swaps a section with its neighbour. No-op at either boundary.
    ///
    /// Returns how many links were cleared because they no longer point
    /// forward after the swap.
    pub fn move_section(
        &mut self,
        index: usize,
        direction: MoveDirection,
    ) -> Result<usize, DomainError> {
        self.commit(|form| {
            section_mut(form, index)?;
            let Some(other) = neighbour(index, direction, form.sections.len()) else {
                return Ok(0);
            };

            form.sections.swap(index, other);
            form.renumber_sections();
            Ok(clear_backward_links(form))
        })
    }

    /// Sets the default jump taken by "Next" from this section.
    pub fn set_section_navigation(
        &mut self,
        index: usize,
        target: Option<SectionId>,
    ) -> Result<(), DomainError> {
        self.commit(|form| {
            section_mut(form, index)?;
            if let Some(target) = &target {
                ensure_forward(form, index, target)?;
            }
            form.sections[index].next_section = target;
            Ok(())
        })
    }

    /// Sections a link from section `index` may target.
    pub fn available_jump_targets(&self, index: usize) -> Vec<JumpTarget> {
        self.form
            .sections
            .iter()
            .skip(index + 1)
            .map(|s| JumpTarget {
                id: s.id.clone(),
                title: s.display_title(),
                order: s.order,
            })
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Questions
    // ─────────────────────────────────────────────────────────────────────

    /// Inserts a blank text question and returns its id.
    ///
    /// Rejected while any question already in the section is incomplete,
    /// unless `is_first` is set.
    pub fn add_question(
        &mut self,
        section_index: usize,
        insert_at: Option<usize>,
        is_first: bool,
    ) -> Result<QuestionId, DomainError> {
        self.commit(|form| {
            let section = section_mut(form, section_index)?;

            if !is_first {
                let incomplete = incomplete_in_section(section, section_index + 1);
                if !incomplete.is_empty() {
                    let mut err = DomainError::new(
                        ErrorCode::IncompleteQuestions,
                        "Please complete the following before adding a new question",
                    );
                    for (n, question) in incomplete.iter().enumerate() {
                        err = err.with_detail(format!("issue_{}", n + 1), question.to_string());
                    }
                    return Err(err);
                }
            }

            let position = insert_at.unwrap_or(section.questions.len());
            if position > section.questions.len() {
                return Err(DomainError::new(
                    ErrorCode::QuestionNotFound,
                    format!("Cannot insert a question at position {}", position),
                ));
            }

            let question = Question::blank(QuestionType::Text);
            let id = question.id.clone();
            section.questions.insert(position, question);
            section.renumber_questions();
            Ok(id)
        })
    }

    pub fn remove_question(
        &mut self,
        section_index: usize,
        question_index: usize,
    ) -> Result<Question, DomainError> {
        self.commit(|form| {
            question_mut(form, section_index, question_index)?;
            let section = &mut form.sections[section_index];
            let removed = section.questions.remove(question_index);
            section.renumber_questions();
            Ok(removed)
        })
    }

    /// Swaps a question with its neighbour. No-op at either boundary.
    pub fn move_question(
        &mut self,
        section_index: usize,
        question_index: usize,
        direction: MoveDirection,
    ) -> Result<(), DomainError> {
        self.commit(|form| {
            question_mut(form, section_index, question_index)?;
            let section = &mut form.sections[section_index];
            if let Some(other) = neighbour(question_index, direction, section.questions.len()) {
                section.questions.swap(question_index, other);
                section.renumber_questions();
            }
            Ok(())
        })
    }

    /// Copies a question right after itself and returns the copy's id.
    pub fn duplicate_question(
        &mut self,
        section_index: usize,
        question_index: usize,
    ) -> Result<QuestionId, DomainError> {
        self.commit(|form| {
            let mut copy = question_mut(form, section_index, question_index)?.clone();
            copy.id = QuestionId::generate();
            copy.text = format!("{} (Copy)", copy.text);
            let id = copy.id.clone();

            let section = &mut form.sections[section_index];
            section.questions.insert(question_index + 1, copy);
            section.renumber_questions();
            Ok(id)
        })
    }

    pub fn update_question_text(
        &mut self,
        section_index: usize,
        question_index: usize,
        text: impl Into<String>,
    ) -> Result<(), DomainError> {
        let text = text.into();
        self.commit(|form| {
            question_mut(form, section_index, question_index)?.text = text;
            Ok(())
        })
    }

    pub fn set_question_required(
        &mut self,
        section_index: usize,
        question_index: usize,
        is_required: bool,
    ) -> Result<(), DomainError> {
        self.commit(|form| {
            question_mut(form, section_index, question_index)?.is_required = is_required;
            Ok(())
        })
    }

    /// Changes a question's type, resetting options to the type's defaults.
    pub fn set_question_type(
        &mut self,
        section_index: usize,
        question_index: usize,
        question_type: QuestionType,
    ) -> Result<(), DomainError> {
        self.commit(|form| {
            let question = question_mut(form, section_index, question_index)?;
            if question.question_type != question_type {
                question.change_type(question_type);
            }
            Ok(())
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Options
    // ─────────────────────────────────────────────────────────────────────

    /// Appends `Option N` with an unlinked option link. Returns its index.
    pub fn add_option(
        &mut self,
        section_index: usize,
        question_index: usize,
    ) -> Result<usize, DomainError> {
        self.commit(|form| {
            let question = editable_options(form, section_index, question_index)?;
            let label = format!("Option {}", question.options.len() + 1);
            question.align_option_links();
            question.options.push(label.clone());
            question.option_links.insert(question.options.len() - 1, OptionLink::unlinked(label));
            Ok(question.options.len() - 1)
        })
    }

    /// Relabels an option and the text of its link.
    pub fn update_option(
        &mut self,
        section_index: usize,
        question_index: usize,
        option_index: usize,
        label: impl Into<String>,
    ) -> Result<(), DomainError> {
        let label = label.into();
        self.commit(|form| {
            let question = editable_options(form, section_index, question_index)?;
            let option = question
                .options
                .get_mut(option_index)
                .ok_or_else(|| option_not_found(option_index))?;
            *option = label;
            question.align_option_links();
            Ok(())
        })
    }

    pub fn remove_option(
        &mut self,
        section_index: usize,
        question_index: usize,
        option_index: usize,
    ) -> Result<(), DomainError> {
        self.commit(|form| {
            let question = editable_options(form, section_index, question_index)?;
            if option_index >= question.options.len() {
                return Err(option_not_found(option_index));
            }
            if question.options.len() <= MIN_CHOICE_OPTIONS {
                return Err(DomainError::new(
                    ErrorCode::MinimumOptionsRequired,
                    "Choice questions must have at least 2 options",
                ));
            }

            question.align_option_links();
            question.options.remove(option_index);
            question.option_links.remove(option_index);
            Ok(())
        })
    }

    /// Sets or clears the jump target of one option.
    pub fn update_option_navigation(
        &mut self,
        section_index: usize,
        question_index: usize,
        option_index: usize,
        target: Option<SectionId>,
    ) -> Result<(), DomainError> {
        self.commit(|form| {
            if let Some(target) = &target {
                section_mut(form, section_index)?;
                ensure_forward(form, section_index, target)?;
            }

            let question = question_mut(form, section_index, question_index)?;
            if option_index >= question.options.len() {
                return Err(option_not_found(option_index));
            }
            question.align_option_links();
            question.option_links[option_index].next_section = target;
            Ok(())
        })
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Helpers
// ═════════════════════════════════════════════════════════════════════════════

fn neighbour(index: usize, direction: MoveDirection, len: usize) -> Option<usize> {
    match direction {
        MoveDirection::Up => index.checked_sub(1),
        MoveDirection::Down => (index + 1 < len).then_some(index + 1),
    }
}

fn section_mut(form: &mut Form, index: usize) -> Result<&mut Section, DomainError> {
    form.sections.get_mut(index).ok_or_else(|| {
        DomainError::new(
            ErrorCode::SectionNotFound,
            format!("No section at position {}", index),
        )
    })
}

fn question_mut(
    form: &mut Form,
    section_index: usize,
    question_index: usize,
) -> Result<&mut Question, DomainError> {
    section_mut(form, section_index)?
        .questions
        .get_mut(question_index)
        .ok_or_else(|| {
            DomainError::new(
                ErrorCode::QuestionNotFound,
                format!(
                    "No question at position {} in section {}",
                    question_index,
                    section_index + 1
                ),
            )
        })
}

fn editable_options(
    form: &mut Form,
    section_index: usize,
    question_index: usize,
) -> Result<&mut Question, DomainError> {
    let question = question_mut(form, section_index, question_index)?;
    if !question.question_type.is_choice() {
        return Err(DomainError::new(
            ErrorCode::OptionsNotEditable,
            format!("{} questions do not have editable options", question.question_type),
        ));
    }
    Ok(question)
}

fn option_not_found(index: usize) -> DomainError {
    DomainError::new(
        ErrorCode::OptionNotFound,
        format!("No option at position {}", index),
    )
}

fn ensure_forward(form: &Form, from: usize, target: &SectionId) -> Result<(), DomainError> {
    let to = form.section_index(target).ok_or_else(|| {
        DomainError::new(
            ErrorCode::SectionNotFound,
            format!("Section '{}' does not exist", target),
        )
    })?;

    if form.sections[to].order <= form.sections[from].order {
        return Err(DomainError::new(
            ErrorCode::InvalidJumpTarget,
            "Jumps may only target a later section",
        )
        .with_detail("from", (from + 1).to_string())
        .with_detail("to", (to + 1).to_string()));
    }
    Ok(())
}

/// Clears links whose target no longer lies after their source section.
fn clear_backward_links(form: &mut Form) -> usize {
    let links = LinkIndex::build(form);
    let stale: Vec<_> = links
        .iter()
        .filter(|(target, source)| {
            form.section_index(target)
                .map_or(true, |to| to <= source.section())
        })
        .map(|(_, source)| *source)
        .collect();

    for source in &stale {
        clear_link(form, source);
    }
    stale.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder_with_sections(count: usize) -> FormBuilder {
        let mut builder = FormBuilder::new("Survey");
        for _ in 1..count {
            builder.add_section().unwrap();
        }
        builder
    }

    fn orders(builder: &FormBuilder) -> Vec<u32> {
        builder.form().sections.iter().map(|s| s.order).collect()
    }

    /// Section 0 holds a complete radio question "Route" with options X/Y.
    fn builder_with_route_question(sections: usize) -> FormBuilder {
        let mut builder = builder_with_sections(sections);
        builder.add_question(0, None, true).unwrap();
        builder.update_question_text(0, 0, "Route").unwrap();
        builder.set_question_type(0, 0, QuestionType::Radio).unwrap();
        builder.add_option(0, 0).unwrap();
        builder.add_option(0, 0).unwrap();
        builder.update_option(0, 0, 0, "X").unwrap();
        builder.update_option(0, 0, 1, "Y").unwrap();
        builder
    }

    // ───────────────────────────────────────────────────────────────
    // Sections
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn add_section_appends_with_next_order() {
        let mut builder = FormBuilder::new("Survey");
        let index = builder.add_section().unwrap();
        assert_eq!(index, 1);
        assert_eq!(orders(&builder), vec![0, 1]);
    }

    #[test]
    fn removing_only_section_is_rejected_without_change() {
        let mut builder = FormBuilder::new("Survey");
        let before = builder.form().clone();

        let err = builder.remove_section(0).unwrap_err();

        assert_eq!(err.code, ErrorCode::LastSectionRequired);
        assert_eq!(builder.form(), &before);
        assert!(!builder.can_undo());
    }

    #[test]
    fn remove_section_renumbers() {
        let mut builder = builder_with_sections(4);
        builder.remove_section(1).unwrap();
        assert_eq!(orders(&builder), vec![0, 1, 2]);
    }

    #[test]
    fn remove_section_clears_inbound_links() {
        let mut builder = builder_with_route_question(3);
        let target = builder.form().sections[2].id.clone();
        builder.update_option_navigation(0, 0, 0, Some(target.clone())).unwrap();
        builder.set_section_navigation(1, Some(target)).unwrap();

        builder.remove_section(2).unwrap();

        let form = builder.form();
        assert!(form.sections[0].questions[0].option_links.iter().all(|l| !l.is_jump()));
        assert_eq!(form.sections[1].next_section, None);
        assert!(form.structure_issues().is_empty());
    }

    #[test]
    fn move_section_swaps_and_is_noop_at_boundaries() {
        let mut builder = builder_with_sections(3);
        let first = builder.form().sections[0].id.clone();

        builder.move_section(0, MoveDirection::Up).unwrap();
        assert_eq!(builder.form().sections[0].id, first);

        builder.move_section(0, MoveDirection::Down).unwrap();
        assert_eq!(builder.form().sections[1].id, first);
        assert_eq!(orders(&builder), vec![0, 1, 2]);

        let last = builder.form().sections[2].id.clone();
        builder.move_section(2, MoveDirection::Down).unwrap();
        assert_eq!(builder.form().sections[2].id, last);
    }

    #[test]
    fn move_section_clears_links_that_turn_backward() {
        let mut builder = builder_with_route_question(3);
        let target = builder.form().sections[1].id.clone();
        builder.update_option_navigation(0, 0, 0, Some(target)).unwrap();

        let cleared = builder.move_section(1, MoveDirection::Up).unwrap();

        assert_eq!(cleared, 1);
        assert!(builder.form().structure_issues().is_empty());
    }

    #[test]
    fn available_targets_are_strictly_later() {
        let builder = builder_with_sections(4);
        let targets = builder.available_jump_targets(1);
        let target_orders: Vec<u32> = targets.iter().map(|t| t.order).collect();
        assert_eq!(target_orders, vec![2, 3]);
        assert!(builder.available_jump_targets(3).is_empty());
    }

    #[test]
    fn section_navigation_rejects_backward_targets() {
        let mut builder = builder_with_sections(3);
        let first = builder.form().sections[0].id.clone();

        let err = builder.set_section_navigation(2, Some(first)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidJumpTarget);
    }

    // ───────────────────────────────────────────────────────────────
    // Questions
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn add_question_blocked_by_incomplete_question() {
        let mut builder = FormBuilder::new("Survey");
        builder.add_question(0, None, true).unwrap();

        let err = builder.add_question(0, None, false).unwrap_err();
        assert_eq!(err.code, ErrorCode::IncompleteQuestions);
        assert_eq!(builder.form().sections[0].questions.len(), 1);

        builder.update_question_text(0, 0, "Name").unwrap();
        builder.add_question(0, None, false).unwrap();
        assert_eq!(builder.form().sections[0].questions.len(), 2);
    }

    #[test]
    fn add_question_inserts_at_position() {
        let mut builder = FormBuilder::new("Survey");
        builder.add_question(0, None, true).unwrap();
        builder.update_question_text(0, 0, "Second").unwrap();
        let id = builder.add_question(0, Some(0), false).unwrap();

        let questions = &builder.form().sections[0].questions;
        assert_eq!(questions[0].id, id);
        assert_eq!(questions[1].order, 1);
    }

    #[test]
    fn add_question_past_end_is_rejected() {
        let mut builder = FormBuilder::new("Survey");
        let err = builder.add_question(0, Some(3), true).unwrap_err();
        assert_eq!(err.code, ErrorCode::QuestionNotFound);
    }

    #[test]
    fn duplicate_inserts_copy_after_source() {
        let mut builder = builder_with_route_question(1);
        let copy_id = builder.duplicate_question(0, 0).unwrap();

        let questions = &builder.form().sections[0].questions;
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].id, copy_id);
        assert_eq!(questions[1].text, "Route (Copy)");
        assert_eq!(questions[1].options, questions[0].options);
        assert_ne!(questions[1].id, questions[0].id);
    }

    #[test]
    fn move_question_swaps_neighbours() {
        let mut builder = builder_with_route_question(1);
        builder.duplicate_question(0, 0).unwrap();
        let first = builder.form().sections[0].questions[0].id.clone();

        builder.move_question(0, 0, MoveDirection::Down).unwrap();
        assert_eq!(builder.form().sections[0].questions[1].id, first);
        assert_eq!(builder.form().sections[0].questions[1].order, 1);
    }

    #[test]
    fn switching_to_yes_no_installs_fixed_options() {
        let mut builder = FormBuilder::new("Survey");
        builder.add_question(0, None, true).unwrap();
        builder.set_question_type(0, 0, QuestionType::YesNo).unwrap();

        let question = &builder.form().sections[0].questions[0];
        assert_eq!(question.options, vec!["Yes", "No"]);
        assert_eq!(question.option_links.len(), 2);
    }

    // ───────────────────────────────────────────────────────────────
    // Options
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn add_option_labels_by_position() {
        let mut builder = builder_with_route_question(1);
        let index = builder.add_option(0, 0).unwrap();

        let question = &builder.form().sections[0].questions[0];
        assert_eq!(index, 2);
        assert_eq!(question.options[2], "Option 3");
        assert_eq!(question.option_links[2], OptionLink::unlinked("Option 3"));
    }

    #[test]
    fn update_option_mirrors_link_text() {
        let builder = builder_with_route_question(1);
        let question = &builder.form().sections[0].questions[0];
        assert_eq!(question.option_links[0].text, "X");
        assert_eq!(question.option_links[1].text, "Y");
    }

    #[test]
    fn remove_option_keeps_minimum_of_two() {
        let mut builder = builder_with_route_question(1);
        let err = builder.remove_option(0, 0, 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::MinimumOptionsRequired);

        builder.add_option(0, 0).unwrap();
        builder.remove_option(0, 0, 0).unwrap();
        let question = &builder.form().sections[0].questions[0];
        assert_eq!(question.options, vec!["Y", "Option 3"]);
        assert_eq!(question.option_links[0].text, "Y");
    }

    #[test]
    fn fixed_options_are_not_editable() {
        let mut builder = FormBuilder::new("Survey");
        builder.add_question(0, None, true).unwrap();
        builder.set_question_type(0, 0, QuestionType::Rating).unwrap();

        let err = builder.add_option(0, 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::OptionsNotEditable);
    }

    #[test]
    fn option_navigation_accepts_only_later_sections() {
        let mut builder = builder_with_route_question(3);
        let own = builder.form().sections[0].id.clone();
        let later = builder.form().sections[2].id.clone();

        let err = builder.update_option_navigation(0, 0, 0, Some(own)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidJumpTarget);

        builder.update_option_navigation(0, 0, 0, Some(later.clone())).unwrap();
        assert_eq!(
            builder.form().sections[0].questions[0].jump_target_for("X"),
            Some(&later)
        );

        builder.update_option_navigation(0, 0, 0, None).unwrap();
        assert_eq!(builder.form().sections[0].questions[0].jump_target_for("X"), None);
    }

    #[test]
    fn option_navigation_rejects_unknown_section() {
        let mut builder = builder_with_route_question(2);
        let err = builder
            .update_option_navigation(0, 0, 0, Some(SectionId::new("nope").unwrap()))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SectionNotFound);
    }

    // ───────────────────────────────────────────────────────────────
    // Templates and history
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn apply_form_type_replaces_sections() {
        let mut builder = builder_with_sections(3);
        builder.apply_form_type(FormType::ServiceFeedback).unwrap();

        let form = builder.form();
        assert_eq!(form.form_type, FormType::ServiceFeedback);
        assert_eq!(form.sections.len(), 1);
        assert_eq!(form.sections[0].title, "Service Feedback");
        assert_eq!(form.sections[0].questions.len(), 5);

        builder.apply_form_type(FormType::Empty).unwrap();
        assert!(builder.form().sections[0].questions.is_empty());
    }

    #[test]
    fn undo_and_redo_restore_snapshots() {
        let mut builder = FormBuilder::new("Survey");
        let initial = builder.form().clone();
        builder.add_section().unwrap();
        let with_two = builder.form().clone();

        assert!(builder.undo());
        assert_eq!(builder.form(), &initial);
        assert!(!builder.undo());

        assert!(builder.redo());
        assert_eq!(builder.form(), &with_two);
        assert!(!builder.redo());
    }

    #[test]
    fn new_change_discards_redo() {
        let mut builder = FormBuilder::new("Survey");
        builder.add_section().unwrap();
        builder.undo();
        builder.update_details("Renamed", "").unwrap();
        assert!(!builder.can_redo());
    }

    #[test]
    fn noop_changes_are_not_recorded() {
        let mut builder = FormBuilder::new("Survey");
        builder.move_section(0, MoveDirection::Up).unwrap();
        assert!(!builder.can_undo());
    }
}
