//! Page-local key/value storage shared with the host app.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host app writes `access_token` and `user_info` before the page loads;
//! this crate reads and deletes them but never assumes it owns the store.
//! Entries may be absent, partial, or malformed at any time.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::BTreeMap;

/// Opaque token written by the host app; only its presence is used.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// JSON-encoded `HostUserInfo` written by the host app.
pub const USER_INFO_KEY: &str = "user_info";

/// Minimal string key/value store (`localStorage` / `sessionStorage` shaped).
///
/// Implementations treat an unavailable backing store as empty and swallow
/// write failures; callers never branch on storage errors.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
    fn clear(&self);

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// In-memory store for the non-browser build.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        for (key, value) in entries {
            store.set(key, value);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }

    fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}
