//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod filling;
pub mod forms;

pub use filling::{
    AnswerQuestionCommand, AnswerQuestionHandler, AnswerQuestionResult, EvictIdleSessionsCommand,
    EvictIdleSessionsHandler, FillingError, GetFillingSessionHandler, GetFillingSessionQuery,
    NavigateSectionCommand, NavigateSectionHandler, NavigateSectionResult, SectionStep,
    StartFillingCommand, StartFillingHandler, SubmitFeedbackCommand, SubmitFeedbackHandler,
    SubmitFeedbackResult,
};
pub use forms::{
    FormError, GetFormHandler, GetFormQuery, SaveFormCommand, SaveFormHandler, SaveFormResult,
};
