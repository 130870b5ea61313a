//! Identity backend configuration.
//!
//! The WASM bundle has no process environment at runtime, so `from_env`
//! reads the `FIREBASE_*` variables at compile time. `from_vars` takes any
//! lookup so the parsing rules stay testable.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Serialize;

/// Auth domain used for development builds served by the local dev server.
pub const DEFAULT_DEV_AUTH_DOMAIN: &str = "localhost:5173";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required config var: {var}")]
    Missing { var: String },
}

/// Firebase web app settings, serialized in the SDK's own field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_bucket: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messaging_sender_id: Option<String>,
    pub app_id: String,
}

impl FirebaseConfig {
    /// Build from a variable lookup.
    ///
    /// Required: `FIREBASE_API_KEY`, `FIREBASE_PROJECT_ID`, `FIREBASE_APP_ID`,
    /// and `FIREBASE_AUTH_DOMAIN` outside dev mode.
    ///
    /// Optional:
    /// - `FIREBASE_STORAGE_BUCKET`
    /// - `FIREBASE_MESSAGING_SENDER_ID`
    /// - `FIREBASE_DEV_AUTH_DOMAIN`: dev mode auth domain, default `localhost:5173`
    ///
    /// Blank values count as missing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` naming the first absent required var.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>, dev_mode: bool) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let required = |key: &str| var(key).ok_or_else(|| ConfigError::Missing { var: key.to_owned() });

        let api_key = required("FIREBASE_API_KEY")?;
        let auth_domain = if dev_mode {
            var("FIREBASE_DEV_AUTH_DOMAIN").unwrap_or_else(|| DEFAULT_DEV_AUTH_DOMAIN.to_owned())
        } else {
            required("FIREBASE_AUTH_DOMAIN")?
        };
        let project_id = required("FIREBASE_PROJECT_ID")?;
        let app_id = required("FIREBASE_APP_ID")?;

        Ok(Self {
            api_key,
            auth_domain,
            project_id,
            storage_bucket: var("FIREBASE_STORAGE_BUCKET"),
            messaging_sender_id: var("FIREBASE_MESSAGING_SENDER_ID"),
            app_id,
        })
    }

    /// Build from variables captured at compile time. Debug builds use the
    /// dev auth domain.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if a required var was not set at build.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(build_var, cfg!(debug_assertions))
    }
}

fn build_var(key: &str) -> Option<String> {
    let value = match key {
        "FIREBASE_API_KEY" => option_env!("FIREBASE_API_KEY"),
        "FIREBASE_AUTH_DOMAIN" => option_env!("FIREBASE_AUTH_DOMAIN"),
        "FIREBASE_DEV_AUTH_DOMAIN" => option_env!("FIREBASE_DEV_AUTH_DOMAIN"),
        "FIREBASE_PROJECT_ID" => option_env!("FIREBASE_PROJECT_ID"),
        "FIREBASE_STORAGE_BUCKET" => option_env!("FIREBASE_STORAGE_BUCKET"),
        "FIREBASE_MESSAGING_SENDER_ID" => option_env!("FIREBASE_MESSAGING_SENDER_ID"),
        "FIREBASE_APP_ID" => option_env!("FIREBASE_APP_ID"),
        _ => None,
    };
    value.map(str::to_owned)
}
