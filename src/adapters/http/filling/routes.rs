//! Route configuration for filling endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::handlers::{
    answer_question, get_session, next_section, previous_section, start_session,
    submit_feedback, FillingAppState,
};

/// Creates the filling router with all endpoints.
///
/// Routes:
/// - `POST /api/public/forms/:form_id/sessions` - Start filling a form
/// - `GET /api/sessions/:session_id` - Session state
/// - `PUT /api/sessions/:session_id/answers/:question_id` - Answer a question
/// - `POST /api/sessions/:session_id/next` - Next section
/// - `POST /api/sessions/:session_id/previous` - Previous section
/// - `POST /api/sessions/:session_id/submit` - Submit the response
pub fn filling_router() -> Router<FillingAppState> {
    Router::new()
        .route("/api/public/forms/:form_id/sessions", post(start_session))
        .route("/api/sessions/:session_id", get(get_session))
        .route(
            "/api/sessions/:session_id/answers/:question_id",
            put(answer_question),
        )
        .route("/api/sessions/:session_id/next", post(next_section))
        .route("/api/sessions/:session_id/previous", post(previous_section))
        .route("/api/sessions/:session_id/submit", post(submit_feedback))
}
