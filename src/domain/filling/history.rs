//! Stack of displayed sections driving "Previous".

use serde::Serialize;

/// The sections a visitor has moved through, most recent last.
///
/// Never empty: the section the session started on stays at the bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SectionHistory(Vec<usize>);

impl SectionHistory {
    pub fn new(start: usize) -> Self {
        Self(vec![start])
    }

    pub fn push(&mut self, section: usize) {
        self.0.push(section);
    }

    /// Drops the top entry and returns the section now on top.
    ///
    /// Returns `None` and leaves the stack untouched when only the start
    /// entry remains.
    pub fn pop(&mut self) -> Option<usize> {
        if !self.can_go_back() {
            return None;
        }
        self.0.pop();
        self.0.last().copied()
    }

    pub fn top(&self) -> usize {
        self.0.last().copied().unwrap_or_default()
    }

    pub fn can_go_back(&self) -> bool {
        self.0.len() > 1
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}
