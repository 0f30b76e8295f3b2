//! HTTP handlers for filling endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::application::handlers::filling::{
    AnswerQuestionCommand, AnswerQuestionHandler, GetFillingSessionHandler,
    GetFillingSessionQuery, NavigateSectionCommand, NavigateSectionHandler, SectionStep,
    StartFillingCommand, StartFillingHandler, SubmitFeedbackCommand, SubmitFeedbackHandler,
};
use crate::domain::foundation::{FillingSessionId, FormId, QuestionId};
use crate::ports::{FeedbackSubmitter, FillingSessionStore, PublicFormReader};

use super::dto::{AnswerRequest, AnswerResponse, NavigateResponse, SessionResponse, SubmitResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct FillingAppState {
    pub form_reader: Arc<dyn PublicFormReader>,
    pub session_store: Arc<dyn FillingSessionStore>,
    pub submitter: Arc<dyn FeedbackSubmitter>,
}

impl FillingAppState {
    pub fn new(
        form_reader: Arc<dyn PublicFormReader>,
        session_store: Arc<dyn FillingSessionStore>,
        submitter: Arc<dyn FeedbackSubmitter>,
    ) -> Self {
        Self {
            form_reader,
            session_store,
            submitter,
        }
    }

    pub fn start_filling_handler(&self) -> StartFillingHandler {
        StartFillingHandler::new(self.form_reader.clone(), self.session_store.clone())
    }

    pub fn get_session_handler(&self) -> GetFillingSessionHandler {
        GetFillingSessionHandler::new(self.session_store.clone())
    }

    pub fn answer_question_handler(&self) -> AnswerQuestionHandler {
        AnswerQuestionHandler::new(self.session_store.clone())
    }

    pub fn navigate_section_handler(&self) -> NavigateSectionHandler {
        NavigateSectionHandler::new(self.session_store.clone())
    }

    pub fn submit_feedback_handler(&self) -> SubmitFeedbackHandler {
        SubmitFeedbackHandler::new(self.session_store.clone(), self.submitter.clone())
    }
}

fn parse_session_id(raw: &str) -> Result<FillingSessionId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid session ID format".to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/sessions/:session_id - Current state of a filling session
pub async fn get_session(
    State(state): State<FillingAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = parse_session_id(&session_id)?;

    let session = state
        .get_session_handler()
        .handle(GetFillingSessionQuery { session_id })
        .await?;

    Ok(Json(SessionResponse::from(&session)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST/PUT endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/public/forms/:form_id/sessions - Start filling a public form
pub async fn start_session(
    State(state): State<FillingAppState>,
    Path(form_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let form_id: FormId = form_id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid form ID format".to_string()))?;

    let session = state
        .start_filling_handler()
        .handle(StartFillingCommand { form_id })
        .await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(&session))))
}

/// PUT /api/sessions/:session_id/answers/:question_id - Answer a question
pub async fn answer_question(
    State(state): State<FillingAppState>,
    Path((session_id, question_id)): Path<(String, String)>,
    Json(request): Json<AnswerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let question_id: QuestionId = question_id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid question ID format".to_string()))?;

    let result = state
        .answer_question_handler()
        .handle(AnswerQuestionCommand {
            session_id,
            question_id,
            value: request.value,
        })
        .await?;

    Ok(Json(AnswerResponse {
        jumped_to: result.jumped_to,
        session: SessionResponse::from(&result.session),
    }))
}

/// POST /api/sessions/:session_id/next - Advance to the next section
pub async fn next_section(
    State(state): State<FillingAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    navigate(state, &session_id, SectionStep::Next).await
}

/// POST /api/sessions/:session_id/previous - Return to the previous section
pub async fn previous_section(
    State(state): State<FillingAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    navigate(state, &session_id, SectionStep::Previous).await
}

async fn navigate(
    state: FillingAppState,
    session_id: &str,
    step: SectionStep,
) -> Result<Json<NavigateResponse>, ApiError> {
    let session_id = parse_session_id(session_id)?;

    let result = state
        .navigate_section_handler()
        .handle(NavigateSectionCommand { session_id, step })
        .await?;

    Ok(Json(NavigateResponse {
        moved_to: result.moved_to,
        session: SessionResponse::from(&result.session),
    }))
}

/// POST /api/sessions/:session_id/submit - Submit the response upstream
pub async fn submit_feedback(
    State(state): State<FillingAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = parse_session_id(&session_id)?;

    let result = state
        .submit_feedback_handler()
        .handle(SubmitFeedbackCommand { session_id })
        .await?;

    Ok(Json(SubmitResponse {
        message: result.receipt.message.clone(),
        response_id: result.receipt.response_id.to_string(),
        session: SessionResponse::from(&result.session),
    }))
}
