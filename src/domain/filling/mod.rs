//! Form filling domain - a visitor's pass through a public form.

mod answer;
mod events;
mod history;
mod navigation;
mod session;
mod status;
mod submission;

pub use answer::{check_answer, is_valid_email, is_valid_phone, AnswerIssue, AnswerValue};
pub use events::FillingEvent;
pub use history::SectionHistory;
pub use navigation::NavigationState;
pub use session::{AnswerProblem, FillingSession, NavigationHint};
pub use status::FillingStatus;
pub use submission::{FeedbackSubmission, SubmissionReceipt, SubmittedAnswer};
