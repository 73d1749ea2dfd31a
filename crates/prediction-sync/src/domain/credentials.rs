//! Remote sync credentials entered by the operator.

use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCredentials {
    pub owner: String,
    pub repo: String,
    /// Bearer token; only ever sent in the Authorization header
    pub token: String,
}

impl SyncCredentials {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into().trim().to_string(),
            repo: repo.into().trim().to_string(),
            token: token.into().trim().to_string(),
        }
    }

    /// All three fields filled in
    pub fn is_complete(&self) -> bool {
        !self.owner.is_empty() && !self.repo.is_empty() && !self.token.is_empty()
    }
}

impl std::fmt::Debug for SyncCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncCredentials")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &"<redacted>")
            .finish()
    }
}
