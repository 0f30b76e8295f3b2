//! Route configuration for form authoring endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{create_form, get_form, get_template, update_form, FormsAppState};

/// Creates the forms router.
///
/// Routes:
/// - `POST /api/forms` - Create a form
/// - `GET /api/forms/:form_id` - Load a form
/// - `PUT /api/forms/:form_id` - Replace a form
/// - `GET /api/templates/:form_type` - Built-in questions for a form type
pub fn forms_router() -> Router<FormsAppState> {
    Router::new()
        .route("/api/forms", post(create_form))
        .route("/api/forms/:form_id", get(get_form).put(update_form))
        .route("/api/templates/:form_type", get(get_template))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryFormStore;
    use crate::application::handlers::filling::test_support::branching_form;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(store: Arc<InMemoryFormStore>) -> Router {
        forms_router().with_state(FormsAppState::new(store))
    }

    fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn create_form_returns_created() {
        let store = Arc::new(InMemoryFormStore::new());
        let mut form = branching_form();
        form.id = None;

        let response = app(store.clone())
            .oneshot(json_request("POST", "/api/forms", &serde_json::to_value(&form).unwrap()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(store.form_count().await, 1);
    }

    #[tokio::test]
    async fn incomplete_form_is_rejected() {
        let store = Arc::new(InMemoryFormStore::new());
        let body = serde_json::json!({
            "title": "Draft",
            "sections": [{
                "title": "One",
                "order": 0,
                "questions": [{ "text": "", "type": "text", "order": 0 }]
            }]
        });

        let response = app(store.clone())
            .oneshot(json_request("POST", "/api/forms", &body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.form_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_form_type_is_bad_request() {
        let response = app(Arc::new(InMemoryFormStore::new()))
            .oneshot(
                Request::builder()
                    .uri("/api/templates/quiz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn template_lookup_succeeds() {
        let response = app(Arc::new(InMemoryFormStore::new()))
            .oneshot(
                Request::builder()
                    .uri("/api/templates/employee_feedback")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
