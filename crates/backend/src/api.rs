//! Backend API Client
//!
//! `BackendApi` is the full backend surface the orchestrator consumes;
//! `HttpBackend` implements it over reqwest. Tests substitute their own
//! `BackendApi` implementations, so nothing above this crate touches
//! reqwest directly.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use url::Url;

use insightflow_core::{ToolType, UploadFile};

use crate::error::{parse_http_error, BackendError, BackendResult};
use crate::http_client::build_http_client;
use crate::types::{CreateSessionRequest, SessionCreated};

/// The REST surface of the remote analysis backend.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// `POST /api/{tool}/session`: create a remote analysis session.
    async fn create_session(
        &self,
        tool: ToolType,
        request: &CreateSessionRequest,
    ) -> BackendResult<SessionCreated>;

    /// `POST /api/{tool}/validate-data?session_id=...`: upload a file for
    /// validation. `extra_fields` carries auxiliary multipart fields such
    /// as a best-effort column hint.
    async fn validate_data(
        &self,
        tool: ToolType,
        session_id: &str,
        file: &UploadFile,
        extra_fields: &[(String, String)],
    ) -> BackendResult<Value>;

    /// `POST {path}?session_id=...`: run a server-backed step. `path` is the
    /// already-resolved endpoint path for the active tool.
    async fn process_step(
        &self,
        path: &str,
        session_id: &str,
        payload: &Value,
    ) -> BackendResult<Value>;

    /// `GET /api/{tool}/export/{session_id}?format=...`: fetch the results
    /// export as raw bytes.
    async fn export(
        &self,
        tool: ToolType,
        session_id: &str,
        format: &str,
    ) -> BackendResult<Bytes>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> BackendResult<()>;
}

/// reqwest implementation of `BackendApi`.
pub struct HttpBackend {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Create a client against a backend origin, e.g. `https://api.example.com`.
    pub fn new(base_url: &str) -> BackendResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| BackendError::InvalidRequest {
            message: format!("invalid backend base URL '{}': {}", base_url, e),
        })?;
        Ok(Self {
            base_url,
            client: build_http_client(),
        })
    }

    /// Resolve an absolute endpoint URL with query parameters.
    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> BackendResult<Url> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| BackendError::InvalidRequest {
                message: format!("invalid endpoint path '{}': {}", path, e),
            })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Check the response status, mapping failures through the message
    /// fallback chain.
    async fn check_status(
        response: reqwest::Response,
        fallback: &str,
    ) -> BackendResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "backend request failed");
        Err(parse_http_error(status.as_u16(), &body, fallback))
    }

    fn network_error(e: reqwest::Error) -> BackendError {
        BackendError::NetworkError {
            message: e.to_string(),
        }
    }

    fn parse_error(e: reqwest::Error) -> BackendError {
        BackendError::ParseError {
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn create_session(
        &self,
        tool: ToolType,
        request: &CreateSessionRequest,
    ) -> BackendResult<SessionCreated> {
        let url = self.endpoint(&format!("/api/{}/session", tool), &[])?;
        tracing::debug!(%url, "POST create session");

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(Self::network_error)?;
        let response = Self::check_status(response, "Session creation failed").await?;

        response
            .json::<SessionCreated>()
            .await
            .map_err(Self::parse_error)
    }

    async fn validate_data(
        &self,
        tool: ToolType,
        session_id: &str,
        file: &UploadFile,
        extra_fields: &[(String, String)],
    ) -> BackendResult<Value> {
        let url = self.endpoint(
            &format!("/api/{}/validate-data", tool),
            &[("session_id", session_id)],
        )?;
        tracing::debug!(%url, file = %file.file_name, "POST validate data");

        let part = reqwest::multipart::Part::bytes(file.data.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| BackendError::InvalidRequest {
                message: format!("invalid MIME type '{}': {}", file.content_type, e),
            })?;
        let mut form = reqwest::multipart::Form::new().part("file", part);
        for (key, value) in extra_fields {
            form = form.text(key.clone(), value.clone());
        }

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(Self::network_error)?;
        let response = Self::check_status(response, "Upload failed").await?;

        response.json::<Value>().await.map_err(Self::parse_error)
    }

    async fn process_step(
        &self,
        path: &str,
        session_id: &str,
        payload: &Value,
    ) -> BackendResult<Value> {
        let url = self.endpoint(path, &[("session_id", session_id)])?;
        tracing::debug!(%url, "POST process step");

        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(Self::network_error)?;
        let response = Self::check_status(response, "Step processing failed").await?;

        response.json::<Value>().await.map_err(Self::parse_error)
    }

    async fn export(
        &self,
        tool: ToolType,
        session_id: &str,
        format: &str,
    ) -> BackendResult<Bytes> {
        let url = self.endpoint(
            &format!("/api/{}/export/{}", tool, session_id),
            &[("format", format)],
        )?;
        tracing::debug!(%url, "GET export");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(Self::network_error)?;
        let response = Self::check_status(response, "Export failed").await?;

        response.bytes().await.map_err(Self::network_error)
    }

    async fn health_check(&self) -> BackendResult<()> {
        let url = self.endpoint("/api/health", &[])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(Self::network_error)?;
        Self::check_status(response, "Backend unavailable").await?;
        Ok(())
    }
}
