//! Form authoring domain.
//!
//! A form is an ordered list of sections. Choice questions can attach a
//! forward jump to each option, and sections can carry a default forward
//! jump, which together make the sections a directed acyclic graph.

mod builder;
pub mod completion;
mod form_type;
mod graph;
mod link_index;
mod option_link;
mod question;
mod section;

pub use builder::{FormBuilder, JumpTarget, MoveDirection};
pub use completion::{
    are_all_questions_complete, check_ready_for_submission, is_question_complete,
    IncompleteQuestion, MissingField, QuestionCompleteness, ReadinessIssue,
};
pub use form_type::FormType;
pub use graph::{Form, StructureIssue};
pub use link_index::{LinkIndex, LinkSource};
pub use option_link::OptionLink;
pub use question::{Question, QuestionType};
pub use section::Section;
