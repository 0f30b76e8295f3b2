//! Where a visitor is, where they have been, and how they got here.

use serde::Serialize;
use std::collections::BTreeSet;

use super::SectionHistory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    current_section_index: usize,
    visited_sections: BTreeSet<usize>,
    history: SectionHistory,
}

impl NavigationState {
    /// State on load: first section current, visited and on the history.
    pub fn new() -> Self {
        Self {
            current_section_index: 0,
            visited_sections: BTreeSet::from([0]),
            history: SectionHistory::new(0),
        }
    }

    pub fn current_section_index(&self) -> usize {
        self.current_section_index
    }

    pub fn visited_sections(&self) -> &BTreeSet<usize> {
        &self.visited_sections
    }

    pub fn history(&self) -> &SectionHistory {
        &self.history
    }

    pub fn has_visited(&self, section: usize) -> bool {
        self.visited_sections.contains(&section)
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    /// Moves to `target` from an option jump.
    pub(crate) fn jump(&mut self, target: usize) {
        self.visited_sections.insert(self.current_section_index);
        self.move_forward(target);
    }

    /// Moves to `target` through "Next".
    pub(crate) fn advance(&mut self, target: usize) {
        self.move_forward(target);
    }

    fn move_forward(&mut self, target: usize) {
        self.current_section_index = target;
        self.visited_sections.insert(target);
        self.history.push(target);
    }

    /// Returns to the previous entry of the history, if any.
    pub(crate) fn back(&mut self) -> Option<usize> {
        let previous = self.history.pop()?;
        self.current_section_index = previous;
        Some(previous)
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}
