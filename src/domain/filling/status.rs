//! Lifecycle of a filling session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillingStatus {
    /// The visitor is on some section and may still navigate.
    #[default]
    InProgress,
    /// Answers are with the upstream API; the session is locked until it replies.
    Submitting,
    /// Answers were accepted upstream.
    Submitted,
}

impl StateMachine for FillingStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use FillingStatus::*;
        matches!(
            (self, target),
            (InProgress, Submitting) | (Submitting, InProgress) | (Submitting, Submitted)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use FillingStatus::*;
        match self {
            InProgress => vec![Submitting],
            Submitting => vec![InProgress, Submitted],
            Submitted => vec![],
        }
    }
}
