//! Remote Sync Client
//!
//! Mirrors the full prediction list into one remote file. Each push fetches
//! the current revision token, then writes once with it. Only a conflict may
//! trigger a second attempt, and only when `retry_on_conflict` is set.

use log::{debug, info, warn};

use super::contents::{encode_predictions, ContentsApi, PutFileRequest};
use super::github::GithubContentsApi;
use super::SyncError;
use crate::config::AdminConfig;
use crate::domain::{Prediction, SyncCredentials};

/// Where and how the list is written.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncTarget {
    pub file_path: String,
    pub branch: Option<String>,
    pub commit_message: String,
    pub retry_on_conflict: bool,
}

impl SyncTarget {
    pub fn from_config(config: &AdminConfig) -> Self {
        Self {
            file_path: config.file_path.clone(),
            branch: config.branch.clone(),
            commit_message: config.commit_message.clone(),
            retry_on_conflict: config.retry_on_conflict,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// No credentials configured
    Skipped,
    /// Written without a revision token
    Created,
    /// Written over a known revision
    Updated,
}

pub struct RemoteSyncClient {
    api: Box<dyn ContentsApi>,
    target: SyncTarget,
}

impl RemoteSyncClient {
    pub fn new(api: impl ContentsApi + 'static, target: SyncTarget) -> Self {
        Self {
            api: Box::new(api),
            target,
        }
    }

    /// Client against the GitHub contents API described by `config`.
    pub fn github(config: &AdminConfig) -> Result<Self, SyncError> {
        let api = GithubContentsApi::new(config.api_base.clone(), config.request_timeout())?;
        Ok(Self::new(api, SyncTarget::from_config(config)))
    }

    pub fn target(&self) -> &SyncTarget {
        &self.target
    }

    pub async fn test_connection(&self, credentials: &SyncCredentials) -> Result<(), SyncError> {
        info!(
            "RemoteSync: testing connection to {}/{}",
            credentials.owner, credentials.repo
        );
        self.api.check_repo(credentials).await
    }

    /// Write `predictions` to the remote file. A missing or incomplete set of
    /// credentials makes this a successful no-op.
    pub async fn push(
        &self,
        credentials: Option<&SyncCredentials>,
        predictions: &[Prediction],
    ) -> Result<PushOutcome, SyncError> {
        let Some(credentials) = credentials.filter(|c| c.is_complete()) else {
            info!("RemoteSync: no credentials configured, skipping push");
            return Ok(PushOutcome::Skipped);
        };

        let content = encode_predictions(predictions)?;
        match self.write(credentials, &content).await {
            Err(SyncError::Conflict { message }) if self.target.retry_on_conflict => {
                warn!("RemoteSync: conflict ({}), retrying once with a fresh revision", message);
                self.write(credentials, &content).await
            }
            result => result,
        }
    }

    async fn write(
        &self,
        credentials: &SyncCredentials,
        content: &str,
    ) -> Result<PushOutcome, SyncError> {
        let sha = self.revision_token(credentials).await;
        let request = PutFileRequest {
            message: self.target.commit_message.clone(),
            content: content.to_string(),
            sha: sha.clone(),
            branch: self.target.branch.clone(),
        };

        self.api
            .put_file(credentials, &self.target.file_path, &request)
            .await?;

        let outcome = if sha.is_some() {
            PushOutcome::Updated
        } else {
            PushOutcome::Created
        };
        info!("RemoteSync: pushed {} ({:?})", self.target.file_path, outcome);
        Ok(outcome)
    }

    /// Best effort: a failed lookup is indistinguishable from a missing file.
    async fn revision_token(&self, credentials: &SyncCredentials) -> Option<String> {
        let lookup = self
            .api
            .get_file(
                credentials,
                &self.target.file_path,
                self.target.branch.as_deref(),
            )
            .await;

        match lookup {
            Ok(Some(file)) => Some(file.sha),
            Ok(None) => {
                debug!("RemoteSync: {} does not exist yet", self.target.file_path);
                None
            }
            Err(e) => {
                warn!("RemoteSync: revision lookup failed, writing without token: {}", e);
                None
            }
        }
    }
}
