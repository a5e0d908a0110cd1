use super::Backend;
use super::http_client::build_backend_client;
use super::types::{
    ConversationHistory, ErrorBody, HealthStatus, NewConversation, ProcessedDocuments,
    QueryRequest, QueryResponse, RecentSessions, UploadFile,
};
use crate::config::BackendConfig;
use crate::error::ApiError;
use crate::session::SessionId;
use crate::utils::text::truncate_with_ellipsis;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

const NEW_CONVERSATION: &str = "api/new-conversation";
const QUERY: &str = "api/query";
const UPLOAD_DOCUMENTS: &str = "api/upload-documents";
const INITIALIZE_EXISTING: &str = "api/initialize-with-existing-pdfs";
const RECENT_SESSIONS: &str = "api/recent-sessions";
const CONVERSATION_HISTORY: &str = "api/conversation-history";
const HEALTH: &str = "api/health";

const MAX_ERROR_CHARS: usize = 200;

/// `Backend` over HTTP+JSON.
pub struct HttpBackend {
    /// Always ends with `/` so relative joins keep any path prefix.
    base_url: Url,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: &str, client: Client) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url.trim())
            .map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url, client })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, ApiError> {
        Self::new(&config.base_url, build_backend_client(config))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    fn history_endpoint(&self, session_id: &SessionId) -> Result<Url, ApiError> {
        let mut url = self.endpoint(CONVERSATION_HISTORY)?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.to_string()))?
            .push(session_id.as_str());
        Ok(url)
    }
}

fn request_error(endpoint: &str, err: &reqwest::Error) -> ApiError {
    ApiError::Request {
        endpoint: endpoint.to_string(),
        message: err.to_string(),
    }
}

/// Pulls the backend's `{error}` text out of a failure body, falling back to
/// the (truncated) raw body or the status reason.
fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body)
        && !parsed.error.trim().is_empty()
    {
        return parsed.error;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return status
            .canonical_reason()
            .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string);
    }
    truncate_with_ellipsis(trimmed, MAX_ERROR_CHARS)
}

async fn read_json<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| request_error(endpoint, &e))?;

    if !status.is_success() {
        debug!(endpoint, status = status.as_u16(), "backend returned error status");
        return Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message: error_message(&body, status),
        });
    }

    serde_json::from_str(&body).map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

#[async_trait]
impl Backend for HttpBackend {
    async fn new_conversation(&self) -> Result<NewConversation, ApiError> {
        let url = self.endpoint(NEW_CONVERSATION)?;
        debug!(%url, "starting new conversation");
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| request_error(NEW_CONVERSATION, &e))?;
        read_json(NEW_CONVERSATION, response).await
    }

    async fn query(&self, request: &QueryRequest<'_>) -> Result<QueryResponse, ApiError> {
        let url = self.endpoint(QUERY)?;
        debug!(
            %url,
            question_chars = request.question.chars().count(),
            has_session = request.session_id.is_some(),
            "sending query"
        );
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| request_error(QUERY, &e))?;
        read_json(QUERY, response).await
    }

    async fn upload_documents(
        &self,
        files: Vec<UploadFile>,
    ) -> Result<ProcessedDocuments, ApiError> {
        let url = self.endpoint(UPLOAD_DOCUMENTS)?;
        debug!(%url, files = files.len(), "uploading documents");
        let form = files.into_iter().fold(Form::new(), |form, file| {
            form.part("files", Part::bytes(file.bytes).file_name(file.file_name))
        });
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| request_error(UPLOAD_DOCUMENTS, &e))?;
        read_json(UPLOAD_DOCUMENTS, response).await
    }

    async fn initialize_with_existing_pdfs(&self) -> Result<ProcessedDocuments, ApiError> {
        let url = self.endpoint(INITIALIZE_EXISTING)?;
        debug!(%url, "initializing with existing pdfs");
        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|e| request_error(INITIALIZE_EXISTING, &e))?;
        read_json(INITIALIZE_EXISTING, response).await
    }

    async fn recent_sessions(&self, limit: Option<u32>) -> Result<RecentSessions, ApiError> {
        let url = self.endpoint(RECENT_SESSIONS)?;
        let mut request = self.client.get(url);
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        let response = request
            .send()
            .await
            .map_err(|e| request_error(RECENT_SESSIONS, &e))?;
        read_json(RECENT_SESSIONS, response).await
    }

    async fn conversation_history(
        &self,
        session_id: &SessionId,
    ) -> Result<ConversationHistory, ApiError> {
        let url = self.history_endpoint(session_id)?;
        debug!(%url, "fetching conversation history");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error(CONVERSATION_HISTORY, &e))?;
        read_json(CONVERSATION_HISTORY, response).await
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.endpoint(HEALTH)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error(HEALTH, &e))?;
        read_json(HEALTH, response).await
    }
}
