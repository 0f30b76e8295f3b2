//! Per-option jump metadata.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::SectionId;

/// Jump target attached to one option of a question.
///
/// Index-aligned with the owning question's `options`. A `None` target
/// means the visitor continues to the next section in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionLink {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub next_section: Option<SectionId>,
}

impl OptionLink {
    /// A link for `text` that does not jump anywhere.
    pub fn unlinked(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next_section: None,
        }
    }

    pub fn is_jump(&self) -> bool {
        self.next_section.is_some()
    }
}
