//! Sign-in state for the current page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Written only by the auth reconciler and mirrored into the app-wide
//! `RwSignal<AuthState>`; the sign-in page and user card read it to choose
//! between loading, signed-in and signed-out rendering.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::auth::user::{AuthMethod, NormalizedUser};

/// Runtime context, decided once at mount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvironmentMode {
    /// Inside the native app's WebView; the host app signs in.
    Embedded,
    /// Plain browser page; the identity backend signs in.
    #[default]
    Standalone,
}

/// Sign-in lifecycle. `Initializing` only ever resolves forward.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthLifecycle {
    #[default]
    Initializing,
    SignedOut,
    SignedIn(NormalizedUser),
}

/// Authentication state tracking the runtime mode and current user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub mode: EnvironmentMode,
    pub lifecycle: AuthLifecycle,
    /// A redirect sign-in was started and the page has not navigated yet.
    pub awaiting_redirect: bool,
}

impl AuthState {
    pub fn new(mode: EnvironmentMode) -> Self {
        Self { mode, ..Self::default() }
    }

    pub fn is_loading(&self) -> bool {
        self.awaiting_redirect || matches!(self.lifecycle, AuthLifecycle::Initializing)
    }

    pub fn user(&self) -> Option<&NormalizedUser> {
        match &self.lifecycle {
            AuthLifecycle::SignedIn(user) => Some(user),
            AuthLifecycle::Initializing | AuthLifecycle::SignedOut => None,
        }
    }

    pub fn auth_method(&self) -> AuthMethod {
        match self.mode {
            EnvironmentMode::Embedded => AuthMethod::HostApp,
            EnvironmentMode::Standalone => AuthMethod::IdentityBackend,
        }
    }
}
