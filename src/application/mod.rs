//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    // Filling handlers
    AnswerQuestionCommand, AnswerQuestionHandler, AnswerQuestionResult, EvictIdleSessionsCommand,
    EvictIdleSessionsHandler, FillingError, GetFillingSessionHandler, GetFillingSessionQuery,
    NavigateSectionCommand, NavigateSectionHandler, NavigateSectionResult, SectionStep,
    StartFillingCommand, StartFillingHandler, SubmitFeedbackCommand, SubmitFeedbackHandler,
    SubmitFeedbackResult,
    // Form handlers
    FormError, GetFormHandler, GetFormQuery, SaveFormCommand, SaveFormHandler, SaveFormResult,
};
