//! Filling session domain events.

use serde::Serialize;

use crate::domain::foundation::{FillingSessionId, FormId, QuestionId, ResponseId, SectionId};

/// Events recorded while a visitor fills a form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FillingEvent {
    Started {
        session_id: FillingSessionId,
        form_id: FormId,
    },

    /// An option jump moved the visitor forward.
    Jumped {
        session_id: FillingSessionId,
        question_id: QuestionId,
        from: usize,
        to: usize,
    },

    /// "Next" moved the visitor forward.
    Advanced {
        session_id: FillingSessionId,
        from: usize,
        to: usize,
    },

    /// "Previous" moved the visitor back.
    WentBack {
        session_id: FillingSessionId,
        from: usize,
        to: usize,
    },

    /// A link pointed at a section the form no longer has.
    StaleLinkIgnored {
        session_id: FillingSessionId,
        section: usize,
        target: SectionId,
    },

    Submitted {
        session_id: FillingSessionId,
        response_id: ResponseId,
    },
}
