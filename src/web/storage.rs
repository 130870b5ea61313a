//! `localStorage` / `sessionStorage` as `KeyValueStore`.

use crate::net::storage::KeyValueStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Area {
    Local,
    Session,
}

/// One of the window's storage areas. Unavailable storage (private mode,
/// sandboxed iframe) reads as empty and ignores writes.
#[derive(Clone, Copy, Debug)]
pub struct BrowserStorage {
    area: Area,
}

impl BrowserStorage {
    pub fn local() -> Self {
        Self { area: Area::Local }
    }

    pub fn session() -> Self {
        Self { area: Area::Session }
    }

    fn storage(self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        let storage = match self.area {
            Area::Local => window.local_storage(),
            Area::Session => window.session_storage(),
        };
        match storage {
            Ok(storage) => storage,
            Err(e) => {
                log::warn!("{:?} storage unavailable: {}", self.area, super::js_error_to_string(&e));
                None
            }
        }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.storage()?.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("storage read {key} failed: {}", super::js_error_to_string(&e));
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = self.storage() {
            if let Err(e) = storage.set_item(key, value) {
                log::warn!("storage write {key} failed: {}", super::js_error_to_string(&e));
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            if let Err(e) = storage.remove_item(key) {
                log::warn!("storage remove {key} failed: {}", super::js_error_to_string(&e));
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = self.storage() {
            if let Err(e) = storage.clear() {
                log::warn!("storage clear failed: {}", super::js_error_to_string(&e));
            }
        }
    }
}
