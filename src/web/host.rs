//! Host app channel on `window`.
//!
//! The native shell injects `window.FlutterChannel` with a `postMessage`
//! method and dispatches `CustomEvent`s on `window` whose `detail` carries
//! the signed-in user.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use super::js_error_to_string;
use crate::net::bridge::{BridgeError, HostBridge, HostEventHandler, HostMessage};
use crate::net::registration::Registration;

/// Global name the host app injects its channel under.
pub const CHANNEL_GLOBAL: &str = "FlutterChannel";

#[derive(Clone, Copy, Debug, Default)]
pub struct WindowBridge;

impl WindowBridge {
    fn channel() -> Option<JsValue> {
        let window = web_sys::window()?;
        match js_sys::Reflect::get(&window, &JsValue::from_str(CHANNEL_GLOBAL)) {
            Ok(channel) if !channel.is_undefined() && !channel.is_null() => Some(channel),
            Ok(_) => None,
            Err(e) => {
                log::debug!("host channel lookup failed: {}", js_error_to_string(&e));
                None
            }
        }
    }
}

impl HostBridge for WindowBridge {
    fn is_present(&self) -> bool {
        Self::channel().is_some()
    }

    fn post_message(&self, message: &HostMessage) -> Result<(), BridgeError> {
        let channel = Self::channel().ok_or(BridgeError::Unavailable)?;
        let json = message.to_json()?;
        let post = js_sys::Reflect::get(&channel, &JsValue::from_str("postMessage"))
            .map_err(|e| BridgeError::Rejected(js_error_to_string(&e)))?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| BridgeError::Rejected("postMessage is not a function".to_owned()))?;
        post.call1(&channel, &JsValue::from_str(&json))
            .map_err(|e| BridgeError::Rejected(js_error_to_string(&e)))?;
        Ok(())
    }

    fn listen(&self, event: &str, handler: HostEventHandler) -> Registration {
        let Some(window) = web_sys::window() else {
            return Registration::noop();
        };
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
            handler(event_detail(&ev));
        });
        if let Err(e) = window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
            log::warn!("cannot listen for {event}: {}", js_error_to_string(&e));
            return Registration::noop();
        }

        let event = event.to_owned();
        Registration::new(move || {
            if let Err(e) = window.remove_event_listener_with_callback(&event, callback.as_ref().unchecked_ref()) {
                log::warn!("cannot remove {event} listener: {}", js_error_to_string(&e));
            }
            drop(callback);
        })
    }
}

fn event_detail(ev: &web_sys::Event) -> Option<serde_json::Value> {
    let custom = ev.dyn_ref::<web_sys::CustomEvent>()?;
    match super::decode_js::<serde_json::Value>(&custom.detail()) {
        Ok(detail) => detail,
        Err(e) => {
            log::warn!("host event {} detail undecodable: {e}", ev.type_());
            None
        }
    }
}
