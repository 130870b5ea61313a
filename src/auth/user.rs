//! The single user shape shown by the page, and one normalization per source.
//!
//! DESIGN
//! ======
//! A signed-in user comes either from the identity backend or from the host
//! app, never both. `UserSource` tags the raw payload; after `normalize()`
//! nothing downstream knows or cares which variant produced it.

#[cfg(test)]
#[path = "user_test.rs"]
mod user_test;

use serde::{Deserialize, Serialize};

use crate::net::types::{BackendUser, HostAuthDetail, HostUserInfo};

/// An authenticated principal, normalized from exactly one source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedUser {
    /// Stable provider identifier.
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub email_verified: bool,
}

/// Raw user payload tagged by where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserSource {
    Backend(BackendUser),
    Host(HostUserInfo),
}

impl UserSource {
    pub fn normalize(self) -> NormalizedUser {
        match self {
            Self::Backend(user) => from_backend(user),
            Self::Host(info) => from_host(info),
        }
    }
}

fn from_backend(user: BackendUser) -> NormalizedUser {
    NormalizedUser {
        id: user.uid,
        display_name: user.display_name,
        email: user.email,
        avatar_url: user.photo_url,
        email_verified: user.email_verified,
    }
}

fn from_host(info: HostUserInfo) -> NormalizedUser {
    NormalizedUser {
        id: info.id,
        display_name: info.name,
        email: info.email,
        avatar_url: info.picture,
        // Only an explicit `false` from the host counts as unverified.
        email_verified: info.verified_email.unwrap_or(true),
    }
}

/// Decode the `user_info` storage entry.
///
/// # Errors
///
/// Returns the JSON error when the entry is not a valid host user record.
pub fn parse_stored_user(raw: &str) -> Result<HostUserInfo, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Extract the user from a host event `detail`. Any shape other than
/// `{ userInfo: { id, .. } }` yields `None`.
pub fn user_from_event_detail(detail: Option<serde_json::Value>) -> Option<HostUserInfo> {
    let detail = detail?;
    match serde_json::from_value::<HostAuthDetail>(detail) {
        Ok(parsed) => parsed.user_info,
        Err(e) => {
            log::debug!("host auth event without usable userInfo: {e}");
            None
        }
    }
}

/// Which sign-in path produced the current user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMethod {
    HostApp,
    IdentityBackend,
}
