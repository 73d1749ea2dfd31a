//! Repository Layer - Core Traits
//!
//! Abstract interfaces for the list-owning repository.

use async_trait::async_trait;

use crate::domain::{DomainResult, Entity};
use crate::remote::{PushOutcome, SyncError};

/// Result of a mutation: the affected record plus how the remote mirror fared.
///
/// The local change is committed whenever a report exists; `sync` only tells
/// the operator whether the mirror caught up.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationReport<T> {
    pub record: T,
    pub sync: Result<PushOutcome, SyncError>,
}

/// Core repository trait for list-owning stores
///
/// Single-threaded: futures are not `Send`, matching the browser event loop.
#[async_trait(?Send)]
pub trait Repository<T: Entity> {
    /// Unvalidated input accepted by `add`
    type Draft;

    /// Current list, most recent first
    async fn list(&self) -> DomainResult<Vec<T>>;

    async fn find_by_id(&self, id: &T::Id) -> DomainResult<Option<T>>;

    /// Validate and prepend a new entity
    async fn add(&self, draft: Self::Draft) -> DomainResult<MutationReport<T>>;

    async fn delete(&self, id: &T::Id) -> DomainResult<MutationReport<T>>;
}

/// Extension for repositories addressed by list position
#[async_trait(?Send)]
pub trait PositionalRepository<T: Entity>: Repository<T> {
    async fn delete_at(&self, index: usize) -> DomainResult<MutationReport<T>>;
}
