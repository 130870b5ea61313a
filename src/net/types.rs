//! Wire shapes of the user payloads this page receives.
//!
//! DESIGN
//! ======
//! Host payloads are hand-built JSON from the native app. Only `id` must be
//! usable; it is accepted as either a string or a number. The profile fields
//! are optional and a value of the wrong JSON type reads as absent. Backend
//! users mirror the identity SDK's camelCase user object.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Provider profile handed over by the host app, in events and in the
/// `user_info` storage entry. A record without an `id` does not decode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostUserInfo {
    /// Provider account id.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub email: Option<String>,
    /// Profile image URL.
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub picture: Option<String>,
    /// Only a JSON boolean counts; anything else reads as unreported.
    #[serde(default, deserialize_with = "deserialize_lenient_bool")]
    pub verified_email: Option<bool>,
}

/// `detail` envelope of the host auth events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostAuthDetail {
    #[serde(rename = "userInfo")]
    pub user_info: Option<HostUserInfo>,
}

/// User object reported by the identity backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendUser {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected string or number id, got {other}"))),
    }
}

fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Bool(b) => Ok(Some(b)),
        _ => Ok(None),
    }
}
