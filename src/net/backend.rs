//! Identity backend surface (Firebase Auth in the browser build).
//!
//! SYSTEM CONTEXT
//! ==============
//! Only used in standalone mode. The backend owns tokens, refresh and
//! verification; this crate starts redirects, reads the pending redirect
//! result for diagnostics, signs out, and follows auth-state notifications.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::rc::Rc;

use async_trait::async_trait;

use super::registration::Registration;
use super::types::BackendUser;

/// Provider id for Google sign-in.
pub const GOOGLE_PROVIDER_ID: &str = "google.com";

/// Called with the current user (or `None`) on subscribe and on every change.
pub type AuthStateCallback = Rc<dyn Fn(Option<BackendUser>)>;

/// Cross-session persistence mode for the backend's own session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Persistence {
    /// Survives reloads and browser restarts.
    #[default]
    Local,
    /// Survives reloads within one tab.
    Session,
    /// Memory only.
    None,
}

impl Persistence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Session => "session",
            Self::None => "none",
        }
    }
}

/// OAuth provider and scopes for a redirect sign-in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderRequest {
    pub provider_id: String,
    pub scopes: Vec<String>,
}

impl ProviderRequest {
    pub fn new(provider_id: &str) -> Self {
        Self { provider_id: provider_id.to_owned(), scopes: Vec::new() }
    }

    /// Google with the `profile` and `email` scopes.
    pub fn google() -> Self {
        Self::new(GOOGLE_PROVIDER_ID)
            .with_scope("profile")
            .with_scope("email")
    }

    /// Add a scope unless it is already requested.
    #[must_use]
    pub fn with_scope(mut self, scope: &str) -> Self {
        if !self.scopes.iter().any(|s| s == scope) {
            self.scopes.push(scope.to_owned());
        }
        self
    }
}

/// Pending redirect result, reduced to what gets logged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectOutcome {
    pub user: BackendUser,
    pub has_credential: bool,
    pub has_access_token: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("identity backend not configured")]
    NotConfigured,
    #[error("set persistence failed: {0}")]
    Persistence(String),
    #[error("redirect result failed: {0}")]
    RedirectResult(String),
    #[error("redirect sign-in failed: {0}")]
    SignIn(String),
    #[error("sign-out failed: {0}")]
    SignOut(String),
}

#[async_trait(?Send)]
pub trait IdentityBackend {
    /// # Errors
    ///
    /// Returns `BackendError::Persistence` if the backend rejects the mode.
    async fn set_persistence(&self, persistence: Persistence) -> Result<(), BackendError>;

    /// Result of a redirect sign-in that just completed, if any.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::RedirectResult` if retrieval fails.
    async fn redirect_result(&self) -> Result<Option<RedirectOutcome>, BackendError>;

    /// Navigate away to the provider. On success control normally never
    /// comes back to this page instance.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::SignIn` if the redirect could not be started.
    async fn sign_in_with_redirect(&self, request: &ProviderRequest) -> Result<(), BackendError>;

    /// # Errors
    ///
    /// Returns `BackendError::SignOut` if the backend fails to sign out.
    async fn sign_out(&self) -> Result<(), BackendError>;

    /// Subscribe to auth-state changes until the registration is released.
    /// The callback fires once with the current user shortly after subscribing.
    fn on_auth_state_changed(&self, callback: AuthStateCallback) -> Registration;
}

/// Backend used when no identity provider is configured. Always signed out.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedBackend;

#[async_trait(?Send)]
impl IdentityBackend for DetachedBackend {
    async fn set_persistence(&self, _persistence: Persistence) -> Result<(), BackendError> {
        Ok(())
    }

    async fn redirect_result(&self) -> Result<Option<RedirectOutcome>, BackendError> {
        Ok(None)
    }

    async fn sign_in_with_redirect(&self, _request: &ProviderRequest) -> Result<(), BackendError> {
        Err(BackendError::NotConfigured)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        Ok(())
    }

    fn on_auth_state_changed(&self, callback: AuthStateCallback) -> Registration {
        callback(None);
        Registration::noop()
    }
}
