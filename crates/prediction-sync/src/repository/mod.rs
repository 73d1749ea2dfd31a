//! Repository Layer
//!
//! The in-memory prediction list and the orchestration of local store,
//! baseline loader and remote mirror around it.

mod prediction_repo;
mod traits;

#[cfg(test)]
mod tests;

pub use prediction_repo::{PredictionRepo, RepoState};
pub use traits::{MutationReport, PositionalRepository, Repository};
