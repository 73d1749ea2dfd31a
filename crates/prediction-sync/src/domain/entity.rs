//! Domain Layer - Core Entity Trait
//!
//! Basic contract for records held by a repository, plus the domain error type.

use thiserror::Error;

use crate::store::StoreError;

/// Core trait for all domain entities
pub trait Entity: Sized + Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::hash::Hash + std::fmt::Display;

    /// Returns the entity's unique identifier
    fn id(&self) -> &Self::Id;
}

/// Position of the entity with `id` inside an ordered list.
pub fn position_of<T: Entity>(items: &[T], id: &T::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// A required field was missing or blank
    #[error("validation failed: {0} is required")]
    Validation(&'static str),

    #[error("index {index} is out of range for {len} predictions")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("prediction not found: {0}")]
    NotFound(String),

    /// Local persistence failed; the operation did not complete
    #[error("local storage failure: {0}")]
    Storage(#[from] StoreError),
}
