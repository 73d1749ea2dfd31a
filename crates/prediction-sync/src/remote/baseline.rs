//! Remote Snapshot Loader
//!
//! First-run fallback: a static JSON array of predictions served next to the
//! panel. Every failure degrades to an empty list.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};

use super::{build_client, SyncError};
use crate::domain::Prediction;

#[async_trait(?Send)]
pub trait BaselineSource {
    /// Baseline predictions, empty on any failure. Never retried.
    async fn fetch_baseline(&self) -> Vec<Prediction>;
}

pub struct HttpBaseline {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpBaseline {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SyncError> {
        Ok(Self {
            client: build_client()?,
            url: url.into(),
            timeout,
        })
    }

    /// Resolve `path` against the page URL (the browser client needs absolute URLs).
    pub fn relative_to(page_url: &str, path: &str, timeout: Duration) -> Result<Self, SyncError> {
        let url = reqwest::Url::parse(page_url)
            .and_then(|base| base.join(path))
            .map_err(|e| SyncError::Network(format!("invalid baseline url '{}': {}", path, e)))?;
        Self::new(url.to_string(), timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn try_fetch(&self) -> Result<Vec<Prediction>, SyncError> {
        let url = cache_busted(&self.url, Utc::now().timestamp_millis());
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SyncError::from_transport(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Rejected {
                status: status.as_u16(),
                message: format!("baseline returned HTTP {}", status.as_u16()),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SyncError::from_transport(e, self.timeout))?;
        parse_baseline(&body)
    }
}

#[async_trait(?Send)]
impl BaselineSource for HttpBaseline {
    async fn fetch_baseline(&self) -> Vec<Prediction> {
        info!("Baseline: fetching {}", self.url);
        match self.try_fetch().await {
            Ok(predictions) => {
                info!("Baseline: loaded {} predictions", predictions.len());
                predictions
            }
            Err(e) => {
                warn!("Baseline: unavailable, starting empty: {}", e);
                Vec::new()
            }
        }
    }
}

/// Append a `t=<stamp>` query parameter so caches never answer the fetch.
pub fn cache_busted(url: &str, stamp: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}t={}", url, separator, stamp)
}

pub fn parse_baseline(body: &str) -> Result<Vec<Prediction>, SyncError> {
    serde_json::from_str(body).map_err(|e| SyncError::Decode(e.to_string()))
}
