//! Prediction Repository
//!
//! Owns the authoritative list. Loads lazily (local store, else baseline),
//! writes every mutation through to the local store as a whole list, then
//! mirrors the newest list to the remote.

use std::cell::Cell;

use async_trait::async_trait;
use log::{error, info, warn};
use tokio::sync::{Mutex, MutexGuard};

use super::traits::{MutationReport, PositionalRepository, Repository};
use crate::domain::{
    position_of, DomainError, DomainResult, Prediction, PredictionDraft, PredictionId,
    SyncCredentials,
};
use crate::remote::{BaselineSource, PushOutcome, RemoteSyncClient, SyncError, SyncTarget};
use crate::store::LocalStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoState {
    Uninitialized,
    Loading,
    Ready,
}

pub struct PredictionRepo {
    store: LocalStore,
    baseline: Box<dyn BaselineSource>,
    remote: RemoteSyncClient,
    state: Cell<RepoState>,
    items: Mutex<Vec<Prediction>>,
    /// Serializes pushes so the remote sees lists in commit order
    push_gate: Mutex<()>,
}

impl PredictionRepo {
    pub fn new(
        store: LocalStore,
        baseline: impl BaselineSource + 'static,
        remote: RemoteSyncClient,
    ) -> Self {
        Self {
            store,
            baseline: Box::new(baseline),
            remote,
            state: Cell::new(RepoState::Uninitialized),
            items: Mutex::new(Vec::new()),
            push_gate: Mutex::new(()),
        }
    }

    pub fn state(&self) -> RepoState {
        self.state.get()
    }

    /// Load the list if not loaded yet. Returns the number of predictions.
    pub async fn initialize(&self) -> DomainResult<usize> {
        let items = self.ready().await?;
        Ok(items.len())
    }

    /// Lock the list, loading it first when needed.
    async fn ready(&self) -> DomainResult<MutexGuard<'_, Vec<Prediction>>> {
        let mut items = self.items.lock().await;
        if self.state.get() != RepoState::Ready {
            self.state.set(RepoState::Loading);
            match self.load().await {
                Ok(loaded) => {
                    *items = loaded;
                    self.state.set(RepoState::Ready);
                }
                Err(e) => {
                    self.state.set(RepoState::Uninitialized);
                    return Err(e);
                }
            }
        }
        Ok(items)
    }

    async fn load(&self) -> DomainResult<Vec<Prediction>> {
        info!("Repository: initializing predictions");
        let predictions = match self.store.load()? {
            Some(stored) => {
                info!("Repository: loaded {} predictions from local store", stored.len());
                stored
            }
            None => self.baseline.fetch_baseline().await,
        };

        // Seeds the store on first run and persists ids assigned to legacy records.
        self.store.save(&predictions)?;
        Ok(predictions)
    }

    /// Persist `next`, then make it the in-memory list. A failed write leaves
    /// both copies as they were.
    fn replace(&self, items: &mut Vec<Prediction>, next: Vec<Prediction>) -> DomainResult<()> {
        self.store.save(&next)?;
        *items = next;
        Ok(())
    }

    /// Validate and prepend locally, without touching the remote.
    pub async fn commit_add(&self, draft: PredictionDraft) -> DomainResult<Prediction> {
        let mut items = self.ready().await?;
        let prediction = draft.validate()?;

        let mut next = Vec::with_capacity(items.len() + 1);
        next.push(prediction.clone());
        next.extend(items.iter().cloned());
        self.replace(&mut items, next)?;

        info!("Repository: added {} ({})", prediction.condition, prediction.date_range());
        Ok(prediction)
    }

    /// Remove by position locally, without touching the remote.
    pub async fn commit_delete_at(&self, index: usize) -> DomainResult<Prediction> {
        let mut items = self.ready().await?;
        self.remove_at(&mut items, index)
    }

    /// Remove by id locally, without touching the remote.
    pub async fn commit_delete(&self, id: &PredictionId) -> DomainResult<Prediction> {
        let mut items = self.ready().await?;
        let index = position_of(items.as_slice(), id)
            .ok_or_else(|| DomainError::NotFound(id.to_string()))?;
        self.remove_at(&mut items, index)
    }

    fn remove_at(&self, items: &mut Vec<Prediction>, index: usize) -> DomainResult<Prediction> {
        if index >= items.len() {
            warn!("Repository: delete rejected, index {} of {}", index, items.len());
            return Err(DomainError::IndexOutOfRange {
                index,
                len: items.len(),
            });
        }

        let mut next = items.clone();
        let removed = next.remove(index);
        self.replace(items, next)?;

        info!("Repository: deleted {} ({})", removed.condition, removed.date_range());
        Ok(removed)
    }

    /// Push the newest list to the remote mirror.
    pub async fn sync_remote(&self) -> Result<PushOutcome, SyncError> {
        let _gate = self.push_gate.lock().await;
        let snapshot = self.items.lock().await.clone();

        let credentials = self.store.load_credentials().unwrap_or_else(|e| {
            warn!("Repository: could not read sync credentials: {}", e);
            None
        });

        let result = self.remote.push(credentials.as_ref(), &snapshot).await;
        if let Err(e) = &result {
            error!("Repository: remote sync failed: {}", e);
        }
        result
    }

    async fn report(&self, record: Prediction) -> MutationReport<Prediction> {
        MutationReport {
            record,
            sync: self.sync_remote().await,
        }
    }

    pub fn credentials(&self) -> DomainResult<Option<SyncCredentials>> {
        Ok(self.store.load_credentials()?)
    }

    pub fn save_credentials(&self, credentials: &SyncCredentials) -> DomainResult<()> {
        info!(
            "Repository: saving sync credentials for {}/{}",
            credentials.owner, credentials.repo
        );
        Ok(self.store.save_credentials(credentials)?)
    }

    pub fn clear_credentials(&self) -> DomainResult<()> {
        Ok(self.store.clear_credentials()?)
    }

    /// File, branch and commit message used by `sync_remote`
    pub fn sync_target(&self) -> &SyncTarget {
        self.remote.target()
    }

    pub async fn test_connection(&self, credentials: &SyncCredentials) -> Result<(), SyncError> {
        self.remote.test_connection(credentials).await
    }
}

#[async_trait(?Send)]
impl Repository<Prediction> for PredictionRepo {
    type Draft = PredictionDraft;

    async fn list(&self) -> DomainResult<Vec<Prediction>> {
        Ok(self.ready().await?.clone())
    }

    async fn find_by_id(&self, id: &PredictionId) -> DomainResult<Option<Prediction>> {
        let items = self.ready().await?;
        Ok(items.iter().find(|p| &p.id == id).cloned())
    }

    async fn add(&self, draft: PredictionDraft) -> DomainResult<MutationReport<Prediction>> {
        let prediction = self.commit_add(draft).await?;
        Ok(self.report(prediction).await)
    }

    async fn delete(&self, id: &PredictionId) -> DomainResult<MutationReport<Prediction>> {
        let removed = self.commit_delete(id).await?;
        Ok(self.report(removed).await)
    }
}

#[async_trait(?Send)]
impl PositionalRepository<Prediction> for PredictionRepo {
    async fn delete_at(&self, index: usize) -> DomainResult<MutationReport<Prediction>> {
        let removed = self.commit_delete_at(index).await?;
        Ok(self.report(removed).await)
    }
}
