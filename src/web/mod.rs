//! Browser implementations of the auth collaborators.
//!
//! SYSTEM CONTEXT
//! ==============
//! Compiled only with the `csr` feature. Everything here is thin `web-sys` /
//! `wasm-bindgen` glue; decisions stay in `crate::auth`.

pub mod firebase;
pub mod host;
pub mod storage;

use std::rc::Rc;

use wasm_bindgen::JsValue;

use crate::auth::reconciler::{Collaborators, now_ms};
use crate::config::FirebaseConfig;
use crate::net::backend::{DetachedBackend, IdentityBackend};

/// Wire the page to `window` storage, the host channel, and Firebase.
///
/// Without usable Firebase config the backend is detached, so a standalone
/// page settles at signed-out instead of failing to mount.
pub fn browser_collaborators() -> Collaborators {
    let backend: Rc<dyn IdentityBackend> = match FirebaseConfig::from_env() {
        Ok(config) => match firebase::FirebaseBackend::new(&config) {
            Ok(backend) => Rc::new(backend),
            Err(e) => {
                log::error!("{e}; continuing without identity backend");
                Rc::new(DetachedBackend)
            }
        },
        Err(e) => {
            log::error!("{e}; continuing without identity backend");
            Rc::new(DetachedBackend)
        }
    };

    Collaborators {
        bridge: Rc::new(host::WindowBridge),
        local: Rc::new(storage::BrowserStorage::local()),
        session: Rc::new(storage::BrowserStorage::session()),
        backend,
        clock: now_ms,
    }
}

/// Best-effort text for a thrown JS value.
pub fn js_error_to_string(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Ok(text) = js_sys::JSON::stringify(value) {
        if let Some(text) = text.as_string() {
            return text;
        }
    }
    format!("{value:?}")
}

/// Decode a plain JS object through its JSON text. `null`/`undefined` decode
/// to `None`.
///
/// # Errors
///
/// Returns a message if the value cannot be stringified or does not match `T`.
pub fn decode_js<T: serde::de::DeserializeOwned>(value: &JsValue) -> Result<Option<T>, String> {
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    let text = js_sys::JSON::stringify(value)
        .map_err(|e| js_error_to_string(&e))?
        .as_string()
        .ok_or_else(|| "value has no JSON form".to_owned())?;
    serde_json::from_str(&text).map(Some).map_err(|e| e.to_string())
}
