//! Local Store
//!
//! Durable string-keyed persistence. The browser backend lives in the admin
//! panel crate; `MemoryStore` backs native use and tests.

mod local_store;
mod memory;

use thiserror::Error;

pub use local_store::LocalStore;
pub use memory::MemoryStore;

/// Key holding the JSON array of predictions
pub const PREDICTIONS_KEY: &str = "predictions-list";
/// Key holding the JSON object of sync credentials
pub const CREDENTIALS_KEY: &str = "sync-credentials";
/// Key holding today's page view counter
pub const PAGE_VIEWS_KEY: &str = "page-views";
/// Key holding optional configuration overrides
pub const CONFIG_KEY: &str = "admin-config";

#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying store refused the read or write
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Whole-value string store. A `set` replaces the previous value atomically
/// from the caller's point of view.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
