//! Prediction Sync
//!
//! Layered core of the weather admin panel:
//! - domain: prediction records, credentials, errors
//! - store: key-value persistence and its typed facade
//! - remote: baseline loader and contents API mirror
//! - repository: the list owner orchestrating the above
//! - analytics: page view counter

pub mod analytics;
pub mod config;
pub mod domain;
pub mod remote;
pub mod repository;
pub mod store;

pub use config::AdminConfig;
pub use domain::{
    DomainError, DomainResult, Prediction, PredictionDraft, PredictionId, SyncCredentials,
};
pub use remote::{PushOutcome, SyncError};
pub use repository::{MutationReport, PositionalRepository, PredictionRepo, RepoState, Repository};
pub use store::{KeyValueStore, LocalStore, MemoryStore, StoreError};
