//! Contents API seam and wire format.
//!
//! Content travels as standard base64 of the UTF-8 bytes, so non-ASCII notes
//! and condition labels survive the round trip.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::SyncError;
use crate::domain::{Prediction, SyncCredentials};

/// Read/write access to one repository's files.
#[async_trait(?Send)]
pub trait ContentsApi {
    /// Probe the repository with the given credentials
    async fn check_repo(&self, credentials: &SyncCredentials) -> Result<(), SyncError>;

    /// Current file metadata, `None` when the file does not exist yet
    async fn get_file(
        &self,
        credentials: &SyncCredentials,
        path: &str,
        branch: Option<&str>,
    ) -> Result<Option<RemoteFile>, SyncError>;

    async fn put_file(
        &self,
        credentials: &SyncCredentials,
        path: &str,
        request: &PutFileRequest,
    ) -> Result<(), SyncError>;
}

/// Remote file metadata as returned by a contents read.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteFile {
    /// Revision token to send back on update
    pub sha: String,
    /// Base64 body, possibly wrapped with newlines
    #[serde(default)]
    pub content: Option<String>,
}

/// Body of a contents write.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PutFileRequest {
    pub message: String,
    pub content: String,
    /// Omitted to create the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

pub fn encode_content(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

pub fn decode_content(encoded: &str) -> Result<String, SyncError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| SyncError::Decode(format!("invalid base64 content: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| SyncError::Decode(format!("content is not UTF-8: {}", e)))
}

/// Pretty-printed JSON of the list, base64 encoded.
pub fn encode_predictions(predictions: &[Prediction]) -> Result<String, SyncError> {
    let json =
        serde_json::to_string_pretty(predictions).map_err(|e| SyncError::Encode(e.to_string()))?;
    Ok(encode_content(&json))
}

#[derive(Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

/// Map a non-success response to an error, keeping the remote's message verbatim.
pub fn error_from_response(status: u16, body: &str) -> SyncError {
    let message = serde_json::from_str::<ApiMessage>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("Remote sync failed (HTTP {})", status));

    if status == 409 {
        SyncError::Conflict { message }
    } else {
        SyncError::Rejected { status, message }
    }
}
