//! Domain Layer
//!
//! Prediction records, sync credentials and the errors raised when the
//! repository rejects an operation.

mod credentials;
mod entity;
mod page_views;
mod prediction;

pub use credentials::SyncCredentials;
pub use entity::{position_of, DomainError, DomainResult, Entity};
pub use page_views::PageViews;
pub use prediction::{Prediction, PredictionDraft, PredictionId};
