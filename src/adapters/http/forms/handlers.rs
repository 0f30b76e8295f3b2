//! HTTP handlers for form authoring endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::application::handlers::forms::{
    GetFormHandler, GetFormQuery, SaveFormCommand, SaveFormHandler,
};
use crate::domain::form::{Form, FormType};
use crate::domain::foundation::{FormId, ValidationError};
use crate::ports::FormRepository;

use super::dto::TemplateResponse;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct FormsAppState {
    pub form_repository: Arc<dyn FormRepository>,
}

impl FormsAppState {
    pub fn new(form_repository: Arc<dyn FormRepository>) -> Self {
        Self { form_repository }
    }

    pub fn get_form_handler(&self) -> GetFormHandler {
        GetFormHandler::new(self.form_repository.clone())
    }

    pub fn save_form_handler(&self) -> SaveFormHandler {
        SaveFormHandler::new(self.form_repository.clone())
    }
}

fn parse_form_id(raw: &str) -> Result<FormId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid form ID format".to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/forms/:form_id - Load a form graph for editing
pub async fn get_form(
    State(state): State<FormsAppState>,
    Path(form_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let form_id = parse_form_id(&form_id)?;

    let form = state
        .get_form_handler()
        .handle(GetFormQuery { form_id })
        .await?;

    Ok(Json(form))
}

/// GET /api/templates/:form_type - Built-in questions for a form type
pub async fn get_template(Path(form_type): Path<String>) -> Result<impl IntoResponse, ApiError> {
    let form_type: FormType = form_type
        .parse()
        .map_err(|e: ValidationError| ApiError::BadRequest(e.to_string()))?;

    Ok(Json(TemplateResponse::from(form_type)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST/PUT endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/forms - Create a form from a complete graph
pub async fn create_form(
    State(state): State<FormsAppState>,
    Json(form): Json<Form>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .save_form_handler()
        .handle(SaveFormCommand {
            form_id: None,
            form,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(result.form)))
}

/// PUT /api/forms/:form_id - Replace a form's graph
pub async fn update_form(
    State(state): State<FormsAppState>,
    Path(form_id): Path<String>,
    Json(form): Json<Form>,
) -> Result<impl IntoResponse, ApiError> {
    let form_id = parse_form_id(&form_id)?;

    let result = state
        .save_form_handler()
        .handle(SaveFormCommand {
            form_id: Some(form_id),
            form,
        })
        .await?;

    Ok(Json(result.form))
}
