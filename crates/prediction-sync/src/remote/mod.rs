//! Remote Layer
//!
//! Baseline snapshot loading and the contents API mirror.

mod baseline;
mod contents;
mod github;
mod sync_client;

use std::time::Duration;

use thiserror::Error;

pub use baseline::{cache_busted, parse_baseline, BaselineSource, HttpBaseline};
pub use contents::{
    decode_content, encode_content, encode_predictions, error_from_response, ContentsApi,
    PutFileRequest, RemoteFile,
};
pub use github::GithubContentsApi;
pub use sync_client::{PushOutcome, RemoteSyncClient, SyncTarget};

/// Errors from remote calls. None of them undo a local mutation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    #[error("network failure: {0}")]
    Network(String),

    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The revision token was stale
    #[error("{message}")]
    Conflict { message: String },

    /// Any other non-success response; `message` is the remote's own text when it sent one
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("could not encode predictions: {0}")]
    Encode(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl SyncError {
    pub(crate) fn from_transport(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            SyncError::Timeout(timeout.as_millis() as u64)
        } else {
            SyncError::Network(error.to_string())
        }
    }
}

/// HTTP client shared by the baseline loader and the contents API. Timeouts
/// are applied per request so they hold on every target.
pub(crate) fn build_client() -> Result<reqwest::Client, SyncError> {
    #[cfg(not(target_arch = "wasm32"))]
    let builder = reqwest::Client::builder()
        .user_agent(concat!("weather-admin/", env!("CARGO_PKG_VERSION")));

    // Browsers set the user agent.
    #[cfg(target_arch = "wasm32")]
    let builder = reqwest::Client::builder();

    builder
        .build()
        .map_err(|e| SyncError::Network(format!("failed to build http client: {}", e)))
}
