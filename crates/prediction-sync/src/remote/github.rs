//! GitHub contents API over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::ACCEPT;
use reqwest::RequestBuilder;

use super::contents::{error_from_response, ContentsApi, PutFileRequest, RemoteFile};
use super::{build_client, SyncError};
use crate::domain::SyncCredentials;

const GITHUB_JSON: &str = "application/vnd.github+json";

pub struct GithubContentsApi {
    client: reqwest::Client,
    api_base: String,
    timeout: Duration,
}

impl GithubContentsApi {
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Result<Self, SyncError> {
        Ok(Self {
            client: build_client()?,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn repo_url(&self, credentials: &SyncCredentials) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_base, credentials.owner, credentials.repo
        )
    }

    fn contents_url(&self, credentials: &SyncCredentials, path: &str) -> String {
        format!(
            "{}/contents/{}",
            self.repo_url(credentials),
            path.trim_start_matches('/')
        )
    }

    fn authorized(&self, builder: RequestBuilder, credentials: &SyncCredentials) -> RequestBuilder {
        builder
            .bearer_auth(&credentials.token)
            .header(ACCEPT, GITHUB_JSON)
    }

    /// Send and collect status plus body text.
    async fn send(&self, builder: RequestBuilder) -> Result<(u16, String), SyncError> {
        let response = builder
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SyncError::from_transport(e, self.timeout))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SyncError::from_transport(e, self.timeout))?;
        Ok((status, body))
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

#[async_trait(?Send)]
impl ContentsApi for GithubContentsApi {
    async fn check_repo(&self, credentials: &SyncCredentials) -> Result<(), SyncError> {
        let request = self.authorized(self.client.get(self.repo_url(credentials)), credentials);
        let (status, body) = self.send(request).await?;
        if is_success(status) {
            Ok(())
        } else {
            Err(error_from_response(status, &body))
        }
    }

    async fn get_file(
        &self,
        credentials: &SyncCredentials,
        path: &str,
        branch: Option<&str>,
    ) -> Result<Option<RemoteFile>, SyncError> {
        let mut request = self.client.get(self.contents_url(credentials, path));
        if let Some(branch) = branch {
            request = request.query(&[("ref", branch)]);
        }
        let (status, body) = self.send(self.authorized(request, credentials)).await?;

        match status {
            404 => Ok(None),
            status if is_success(status) => {
                let file: RemoteFile =
                    serde_json::from_str(&body).map_err(|e| SyncError::Decode(e.to_string()))?;
                debug!("RemoteSync: {} is at revision {}", path, file.sha);
                Ok(Some(file))
            }
            status => Err(error_from_response(status, &body)),
        }
    }

    async fn put_file(
        &self,
        credentials: &SyncCredentials,
        path: &str,
        request: &PutFileRequest,
    ) -> Result<(), SyncError> {
        let builder = self
            .client
            .put(self.contents_url(credentials, path))
            .json(request);
        let (status, body) = self.send(self.authorized(builder, credentials)).await?;
        if is_success(status) {
            Ok(())
        } else {
            Err(error_from_response(status, &body))
        }
    }
}
