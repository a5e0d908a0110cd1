//! Wire shapes of the backend's JSON contract.
//!
//! Responses are decoded leniently: missing or `null` collections and
//! strings fall back to empty values so a sparse backend reply never turns
//! a successful round-trip into a decode failure.

use crate::session::SessionId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /api/query`. `session_id` is sent as JSON `null` when the
/// client has no session yet; the backend then creates one.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest<'a> {
    pub question: &'a str,
    pub session_id: Option<&'a SessionId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_follow_up: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewConversation {
    pub session_id: SessionId,
    #[serde(default)]
    pub message: Option<String>,
}

/// A cited document fragment attached to an answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: SourceMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    #[serde(default)]
    pub document_type: Option<String>,
    /// String or number depending on the loader that produced the chunk.
    #[serde(default)]
    pub page_number: Option<Value>,
    #[serde(default)]
    pub file_name: Option<String>,
}

impl SourceMetadata {
    pub fn document_type_label(&self) -> Option<&str> {
        self.document_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Blank strings and a page number of zero count as no page.
    pub fn page_label(&self) -> Option<String> {
        match self.page_number.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) if n.as_f64().is_some_and(|page| page.abs() > 0.0) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Result of `upload-documents` and `initialize-with-existing-pdfs`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessedDocuments {
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub files_processed: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentSessions {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sessions: Vec<SessionSummary>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preview: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_exchanges: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversationHistory {
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_question: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assistant_response: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

/// One file for the multipart `files` field.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}
