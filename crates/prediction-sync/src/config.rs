//! Admin panel configuration.
//!
//! Every field has a default; overrides are read from the local store as a
//! partial JSON object.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Static baseline document, relative to the page or absolute
    pub baseline_url: String,
    /// Contents API root
    pub api_base: String,
    /// Path of the mirrored file inside the repository
    pub file_path: String,
    /// Target branch; the repository default when unset
    pub branch: Option<String>,
    pub commit_message: String,
    pub request_timeout_ms: u64,
    /// Refetch the revision token and write once more after a conflict
    pub retry_on_conflict: bool,
    pub analytics_refresh_ms: u32,
    /// Shared secret for the panel gate
    pub admin_password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            baseline_url: "data.json".into(),
            api_base: "https://api.github.com".into(),
            file_path: "data.json".into(),
            branch: None,
            commit_message: "Update weather predictions via admin panel".into(),
            request_timeout_ms: 5_000,
            retry_on_conflict: false,
            analytics_refresh_ms: 5_000,
            admin_password: "2".into(),
        }
    }
}

impl AdminConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
