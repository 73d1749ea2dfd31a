//! Typed facade over a `KeyValueStore`.
//!
//! Every value is JSON. A value that fails to parse is purged and reported as
//! absent so the next write starts from a clean slate.

use std::rc::Rc;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{KeyValueStore, StoreError, CONFIG_KEY, CREDENTIALS_KEY, PAGE_VIEWS_KEY, PREDICTIONS_KEY};
use crate::config::AdminConfig;
use crate::domain::{PageViews, Prediction, SyncCredentials};

/// Clones share the same backend.
#[derive(Clone)]
pub struct LocalStore {
    backend: Rc<dyn KeyValueStore>,
}

impl LocalStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Rc::new(backend),
        }
    }

    /// Stored prediction list, `None` if absent or corrupt
    pub fn load(&self) -> Result<Option<Vec<Prediction>>, StoreError> {
        let predictions: Option<Vec<Prediction>> = self.read_json(PREDICTIONS_KEY)?;
        if let Some(list) = &predictions {
            debug!("LocalStore: loaded {} predictions", list.len());
        }
        Ok(predictions)
    }

    pub fn save(&self, predictions: &[Prediction]) -> Result<(), StoreError> {
        debug!("LocalStore: saving {} predictions", predictions.len());
        self.write_json(PREDICTIONS_KEY, predictions)
    }

    pub fn load_credentials(&self) -> Result<Option<SyncCredentials>, StoreError> {
        self.read_json(CREDENTIALS_KEY)
    }

    pub fn save_credentials(&self, credentials: &SyncCredentials) -> Result<(), StoreError> {
        self.write_json(CREDENTIALS_KEY, credentials)
    }

    pub fn clear_credentials(&self) -> Result<(), StoreError> {
        self.backend.remove(CREDENTIALS_KEY)
    }

    pub fn load_page_views(&self) -> Result<Option<PageViews>, StoreError> {
        self.read_json(PAGE_VIEWS_KEY)
    }

    pub fn save_page_views(&self, views: &PageViews) -> Result<(), StoreError> {
        self.write_json(PAGE_VIEWS_KEY, views)
    }

    /// Configuration with any stored overrides applied. Never fails: an
    /// unreadable override falls back to the defaults.
    pub fn load_config(&self) -> AdminConfig {
        match self.read_json::<AdminConfig>(CONFIG_KEY) {
            Ok(Some(config)) => config,
            Ok(None) => AdminConfig::default(),
            Err(e) => {
                warn!("LocalStore: could not read config overrides: {}", e);
                AdminConfig::default()
            }
        }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("LocalStore: corrupt entry '{}' discarded: {}", key, e);
                self.backend.remove(key)?;
                Ok(None)
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let serialized = serde_json::to_string(value)?;
        self.backend.set(key, &serialized)
    }
}
