//! Browser Local Store Backend
//!
//! `localStorage` behind the `KeyValueStore` seam. Scoped to the page origin.

use prediction_sync::{KeyValueStore, StoreError};
use wasm_bindgen::JsValue;

pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    /// `None` when the page has no window or storage is disabled
    pub fn local() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

fn js_error(value: JsValue) -> StoreError {
    StoreError::Backend(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.storage.remove_item(key).map_err(js_error)
    }
}
