//! Client side of the question-answering backend's HTTP contract.

pub mod http;
pub mod http_client;
pub mod types;

pub use http::HttpBackend;
pub use http_client::build_backend_client;
pub use types::{
    ConversationHistory, HealthStatus, HistoryEntry, NewConversation, ProcessedDocuments,
    QueryRequest, QueryResponse, RecentSessions, SessionSummary, Source, SourceMetadata,
    UploadFile,
};

use crate::error::ApiError;
use crate::session::SessionId;
use async_trait::async_trait;

/// Everything the client asks of the backend.
///
/// `HttpBackend` is the production implementation; the session controller
/// only sees this trait so it can be driven by any transport.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `POST /api/new-conversation`
    async fn new_conversation(&self) -> Result<NewConversation, ApiError>;

    /// `POST /api/query`
    async fn query(&self, request: &QueryRequest<'_>) -> Result<QueryResponse, ApiError>;

    /// `POST /api/upload-documents` (multipart, one `files` part per file)
    async fn upload_documents(&self, files: Vec<UploadFile>)
    -> Result<ProcessedDocuments, ApiError>;

    /// `POST /api/initialize-with-existing-pdfs`
    async fn initialize_with_existing_pdfs(&self) -> Result<ProcessedDocuments, ApiError>;

    /// `GET /api/recent-sessions`
    async fn recent_sessions(&self, limit: Option<u32>) -> Result<RecentSessions, ApiError>;

    /// `GET /api/conversation-history/{session_id}`
    async fn conversation_history(
        &self,
        session_id: &SessionId,
    ) -> Result<ConversationHistory, ApiError>;

    /// `GET /api/health`
    async fn health(&self) -> Result<HealthStatus, ApiError>;
}
