//! Admin Context
//!
//! The single repository instance and the panel-wide signals, provided to
//! every component via the Leptos Context API.

use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use prediction_sync::analytics::PageViewCounter;
use prediction_sync::remote::{HttpBaseline, RemoteSyncClient};
use prediction_sync::{
    AdminConfig, LocalStore, MemoryStore, Prediction, PredictionRepo, PushOutcome, Repository,
    SyncError,
};

use crate::storage::BrowserStorage;

/// Message shown in the panel banner
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

#[derive(Clone, Copy)]
pub struct AdminContext {
    repo: StoredValue<Rc<PredictionRepo>, LocalStorage>,
    counter: StoredValue<Rc<PageViewCounter>, LocalStorage>,
    pub config: StoredValue<AdminConfig>,
    /// Rendered copy of the repository list
    pub predictions: ReadSignal<Vec<Prediction>>,
    set_predictions: WriteSignal<Vec<Prediction>>,
    pub notice: ReadSignal<Option<Notice>>,
    set_notice: WriteSignal<Option<Notice>>,
}

impl AdminContext {
    /// Wire the browser store, baseline loader and remote mirror together.
    pub fn bootstrap() -> Result<Self, SyncError> {
        let store = match BrowserStorage::local() {
            Some(storage) => LocalStore::new(storage),
            None => {
                warn!("Admin: localStorage unavailable, changes will not survive a reload");
                LocalStore::new(MemoryStore::new())
            }
        };
        let config = store.load_config();

        let page_url = web_sys::window()
            .and_then(|window| window.location().href().ok())
            .unwrap_or_default();
        let baseline =
            HttpBaseline::relative_to(&page_url, &config.baseline_url, config.request_timeout())?;
        let remote = RemoteSyncClient::github(&config)?;
        let repo = PredictionRepo::new(store.clone(), baseline, remote);

        let (predictions, set_predictions) = signal(Vec::<Prediction>::new());
        let (notice, set_notice) = signal::<Option<Notice>>(None);

        Ok(Self {
            repo: StoredValue::new_local(Rc::new(repo)),
            counter: StoredValue::new_local(Rc::new(PageViewCounter::new(store))),
            config: StoredValue::new(config),
            predictions,
            set_predictions,
            notice,
            set_notice,
        })
    }

    pub fn repo(&self) -> Rc<PredictionRepo> {
        self.repo.get_value()
    }

    pub fn counter(&self) -> Rc<PageViewCounter> {
        self.counter.get_value()
    }

    pub fn notify(&self, notice: Notice) {
        self.set_notice.set(Some(notice));
    }

    /// Load (first call) and render the repository list.
    pub async fn refresh(&self) {
        match self.repo().list().await {
            Ok(list) => {
                info!("Admin: displaying {} predictions", list.len());
                self.set_predictions.set(list);
            }
            Err(e) => self.notify(Notice::Error(format!("Could not load predictions: {}", e))),
        }
    }

    /// Push the newest list and tell the operator how it went.
    pub async fn mirror(&self) {
        let notice = match self.repo().sync_remote().await {
            Ok(PushOutcome::Skipped) => Notice::Info("Saved locally. Remote sync is not configured.".into()),
            Ok(_) => Notice::Info("Saved and synced to the remote repository.".into()),
            Err(e) => Notice::Error(format!("Saved locally, but remote sync failed: {}", e)),
        };
        self.notify(notice);
    }
}

pub fn use_admin() -> AdminContext {
    expect_context::<AdminContext>()
}
