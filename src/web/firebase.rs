//! Firebase Auth as the identity backend.
//!
//! The SDK is JavaScript-only, so `js/firebase_auth.js` wraps the handful of
//! calls used here and hands back plain JSON-able objects. This module turns
//! those into `BackendUser` / `RedirectOutcome` and maps rejections onto
//! `BackendError`.

use async_trait::async_trait;
use serde::Deserialize;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::JsFuture;

use super::{decode_js, js_error_to_string};
use crate::config::FirebaseConfig;
use crate::net::backend::{
    AuthStateCallback, BackendError, IdentityBackend, Persistence, ProviderRequest, RedirectOutcome,
};
use crate::net::registration::Registration;
use crate::net::types::BackendUser;

#[wasm_bindgen(module = "/js/firebase_auth.js")]
extern "C" {
    #[wasm_bindgen(catch, js_name = initAuth)]
    fn init_auth(config_json: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_name = setAuthPersistence)]
    fn set_auth_persistence(mode: &str) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_name = pendingRedirectResult)]
    fn pending_redirect_result() -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_name = startRedirectSignIn)]
    fn start_redirect_sign_in(provider_id: &str, scopes: js_sys::Array) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_name = signOutUser)]
    fn sign_out_user() -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(js_name = subscribeAuthState)]
    fn subscribe_auth_state(callback: &Closure<dyn FnMut(JsValue)>) -> js_sys::Function;
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RedirectWire {
    user: BackendUser,
    has_credential: bool,
    has_access_token: bool,
}

/// Handle to the page's initialized Firebase Auth instance.
#[derive(Debug)]
pub struct FirebaseBackend;

impl FirebaseBackend {
    /// Initialize the Firebase app and auth instance.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotConfigured` if the SDK rejects the config.
    pub fn new(config: &FirebaseConfig) -> Result<Self, BackendError> {
        let json = serde_json::to_string(config).map_err(|_| BackendError::NotConfigured)?;
        init_auth(&json).map_err(|e| {
            log::error!("firebase init failed: {}", js_error_to_string(&e));
            BackendError::NotConfigured
        })?;
        log::info!("firebase auth initialized for project {}", config.project_id);
        Ok(Self)
    }
}

async fn settle(promise: Result<js_sys::Promise, JsValue>) -> Result<JsValue, String> {
    let promise = promise.map_err(|e| js_error_to_string(&e))?;
    JsFuture::from(promise).await.map_err(|e| js_error_to_string(&e))
}

#[async_trait(?Send)]
impl IdentityBackend for FirebaseBackend {
    async fn set_persistence(&self, persistence: Persistence) -> Result<(), BackendError> {
        settle(set_auth_persistence(persistence.as_str()))
            .await
            .map_err(BackendError::Persistence)?;
        Ok(())
    }

    async fn redirect_result(&self) -> Result<Option<RedirectOutcome>, BackendError> {
        let value = settle(pending_redirect_result())
            .await
            .map_err(BackendError::RedirectResult)?;
        let wire = decode_js::<RedirectWire>(&value).map_err(BackendError::RedirectResult)?;
        Ok(wire.map(|w| RedirectOutcome {
            user: w.user,
            has_credential: w.has_credential,
            has_access_token: w.has_access_token,
        }))
    }

    async fn sign_in_with_redirect(&self, request: &ProviderRequest) -> Result<(), BackendError> {
        let scopes: js_sys::Array = request.scopes.iter().map(|s| JsValue::from_str(s)).collect();
        settle(start_redirect_sign_in(&request.provider_id, scopes))
            .await
            .map_err(BackendError::SignIn)?;
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        settle(sign_out_user()).await.map_err(BackendError::SignOut)?;
        Ok(())
    }

    fn on_auth_state_changed(&self, callback: AuthStateCallback) -> Registration {
        let listener = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            match decode_js::<BackendUser>(&value) {
                Ok(user) => callback(user),
                Err(e) => {
                    log::error!("auth state user undecodable: {e}");
                    callback(None);
                }
            }
        });
        let unsubscribe = subscribe_auth_state(&listener);
        Registration::new(move || {
            if let Err(e) = unsubscribe.call0(&JsValue::NULL) {
                log::warn!("auth state unsubscribe failed: {}", js_error_to_string(&e));
            }
            drop(listener);
        })
    }
}
