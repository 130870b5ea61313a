//! Message channel exposed by the native host app when the page is embedded.
//!
//! DESIGN
//! ======
//! The host side is loosely typed: it fires named events on the page with an
//! attached JSON detail, and accepts JSON strings posted back to it. This
//! module pins down the Rust-side contract so the reconciler never touches
//! global window state directly.

#[cfg(test)]
#[path = "bridge_test.rs"]
mod bridge_test;

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::registration::Registration;

/// Host event fired when the app has a fresh access token and profile.
pub const AUTH_TOKEN_READY_EVENT: &str = "authTokenReady";
/// Host event fired when the app finished its own sign-in flow.
pub const HOST_AUTH_READY_EVENT: &str = "flutterAuthReady";

/// Both host auth events; listeners are registered for each.
pub const HOST_AUTH_EVENTS: [&str; 2] = [AUTH_TOKEN_READY_EVENT, HOST_AUTH_READY_EVENT];

/// Callback receiving an event's decoded `detail`, or `None` when the event
/// carried nothing decodable.
pub type HostEventHandler = Rc<dyn Fn(Option<serde_json::Value>)>;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("host bridge not available")]
    Unavailable,
    #[error("message encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("host rejected message: {0}")]
    Rejected(String),
}

/// Outbound messages posted to the host app.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
    /// The user signed out inside the page; `timestamp` is epoch millis.
    LogoutRequested { timestamp: i64 },
}

impl HostMessage {
    /// Encode as the JSON string the host channel expects.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// The host app's side of the page.
pub trait HostBridge {
    /// Whether the host channel object is currently reachable.
    fn is_present(&self) -> bool;

    /// Post a message to the host.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Unavailable` when no channel exists, or the
    /// channel's own failure.
    fn post_message(&self, message: &HostMessage) -> Result<(), BridgeError>;

    /// Listen for a named host event until the returned registration is
    /// released.
    fn listen(&self, event: &str, handler: HostEventHandler) -> Registration;
}

/// Bridge for pages with no host app: never present, never fires.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedBridge;

impl HostBridge for DetachedBridge {
    fn is_present(&self) -> bool {
        false
    }

    fn post_message(&self, _message: &HostMessage) -> Result<(), BridgeError> {
        Err(BridgeError::Unavailable)
    }

    fn listen(&self, _event: &str, _handler: HostEventHandler) -> Registration {
        Registration::noop()
    }
}
