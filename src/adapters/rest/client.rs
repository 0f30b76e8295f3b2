//! REST client for the upstream forms API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = RestApiConfig::new("https://forms.example.com/api")
//!     .with_api_token(token)
//!     .with_timeout(Duration::from_secs(15));
//!
//! let api = RestFormApi::new(config)?;
//! ```
//!
//! Every call is a single attempt. Transport failures and 5xx responses
//! surface as `UpstreamUnavailable` so the caller can let the visitor retry.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use super::wire::{rejection, FormPayload};
use crate::domain::filling::{FeedbackSubmission, SubmissionReceipt};
use crate::domain::form::Form;
use crate::domain::foundation::{DomainError, ErrorCode, FormId};
use crate::ports::{FeedbackSubmitter, FormRepository, PublicFormReader};

/// Configuration for the upstream API client.
#[derive(Debug, Clone)]
pub struct RestApiConfig {
    /// Base URL, e.g. `https://forms.example.com/api`.
    pub base_url: String,
    /// Token sent on authoring requests.
    api_token: Option<Secret<String>>,
    pub timeout: Duration,
}

impl RestApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_api_token(mut self, token: Secret<String>) -> Self {
        self.api_token = Some(token);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_token(&self) -> Option<&str> {
        self.api_token.as_ref().map(|t| t.expose_secret().as_str())
    }
}

/// Implements the form ports against the upstream REST API.
#[derive(Debug, Clone)]
pub struct RestFormApi {
    config: RestApiConfig,
    client: Client,
}

impl RestFormApi {
    pub fn new(config: RestApiConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self { config, client })
    }

    fn forms_url(&self) -> String {
        format!("{}/forms/", self.config.base_url)
    }

    fn form_url(&self, id: &FormId) -> String {
        format!("{}/forms/{}/", self.config.base_url, id)
    }

    fn public_url(&self, id: &FormId) -> String {
        format!("{}/public/feedback/{}/", self.config.base_url, id)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.api_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, DomainError> {
        let response = request.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!(
                    "Upstream API timed out after {}s",
                    self.config.timeout.as_secs()
                )
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            tracing::warn!("Upstream request failed: {}", message);
            DomainError::new(ErrorCode::UpstreamUnavailable, message)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = rejection(status.as_u16(), &body);
        if err.is_retryable() {
            tracing::warn!("Upstream API returned {}: {}", status, body);
        } else {
            tracing::debug!("Upstream API rejected request with {}", status);
        }
        Err(err)
    }

    async fn read_form(response: Response) -> Result<Form, DomainError> {
        let payload: FormPayload = response.json().await.map_err(|e| {
            DomainError::new(
                ErrorCode::UpstreamUnavailable,
                format!("Failed to parse form: {}", e),
            )
        })?;
        Ok(payload.into_form())
    }
}

#[async_trait]
impl FormRepository for RestFormApi {
    async fn find_by_id(&self, id: &FormId) -> Result<Option<Form>, DomainError> {
        tracing::debug!(form_id = %id, "Fetching form");
        match self.send(self.authorized(self.client.get(self.form_url(id)))).await {
            Ok(response) => Self::read_form(response).await.map(Some),
            Err(e) if e.code == ErrorCode::FormNotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create(&self, form: &Form) -> Result<Form, DomainError> {
        let request = self.authorized(self.client.post(self.forms_url()).json(form));
        Self::read_form(self.send(request).await?).await
    }

    async fn update(&self, id: &FormId, form: &Form) -> Result<Form, DomainError> {
        let request = self.authorized(self.client.patch(self.form_url(id)).json(form));
        Self::read_form(self.send(request).await?).await
    }
}

#[async_trait]
impl PublicFormReader for RestFormApi {
    async fn fetch_public_form(&self, id: &FormId) -> Result<Form, DomainError> {
        tracing::debug!(form_id = %id, "Fetching public form");
        let response = self.send(self.client.get(self.public_url(id))).await?;
        let mut form = Self::read_form(response).await?;
        form.id.get_or_insert(*id);
        Ok(form)
    }
}

#[async_trait]
impl FeedbackSubmitter for RestFormApi {
    async fn submit(
        &self,
        submission: &FeedbackSubmission,
    ) -> Result<SubmissionReceipt, DomainError> {
        let request = self
            .client
            .post(self.public_url(&submission.form))
            .json(submission);
        let response = self.send(request).await?;

        response.json().await.map_err(|e| {
            DomainError::new(
                ErrorCode::UpstreamUnavailable,
                format!("Failed to parse submission receipt: {}", e),
            )
        })
    }
}
