//! Embedded vs. standalone detection.
//!
//! The answer is computed on first use and then pinned for the detector's
//! lifetime, so a bridge that appears or disappears mid-session cannot flip
//! the reconciler between branches.

#[cfg(test)]
#[path = "detect_test.rs"]
mod detect_test;

use std::cell::OnceCell;
use std::rc::Rc;

use crate::net::bridge::HostBridge;
use crate::net::storage::{ACCESS_TOKEN_KEY, KeyValueStore};
use crate::state::auth::EnvironmentMode;

/// Embedded when the host channel exists or the host already left a token.
pub fn detect_mode(bridge_present: bool, has_access_token: bool) -> EnvironmentMode {
    if bridge_present || has_access_token {
        EnvironmentMode::Embedded
    } else {
        EnvironmentMode::Standalone
    }
}

pub struct EnvironmentDetector {
    bridge: Rc<dyn HostBridge>,
    local: Rc<dyn KeyValueStore>,
    mode: OnceCell<EnvironmentMode>,
}

impl EnvironmentDetector {
    pub fn new(bridge: Rc<dyn HostBridge>, local: Rc<dyn KeyValueStore>) -> Self {
        Self { bridge, local, mode: OnceCell::new() }
    }

    pub fn detect(&self) -> EnvironmentMode {
        *self.mode.get_or_init(|| {
            let bridge_present = self.bridge.is_present();
            let has_access_token = self.local.contains(ACCESS_TOKEN_KEY);
            let mode = detect_mode(bridge_present, has_access_token);
            log::info!("environment detected: {mode:?} (bridge={bridge_present}, stored_token={has_access_token})");
            mode
        })
    }
}
