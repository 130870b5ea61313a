//! Auth reconciler: the single owner of the sign-in lifecycle.
//!
//! ARCHITECTURE
//! ============
//! The environment mode is fixed at construction and selects one of two
//! writer sets for `AuthState`:
//! - Embedded: host events and the `user_info` storage entry.
//! - Standalone: the identity backend's auth-state subscription.
//!
//! The two sets never mix within one reconciler, so a signed-in user always
//! comes from exactly one source.
//!
//! LIFECYCLE
//! =========
//! `mount()` registers listeners/subscriptions, `unmount()` releases them and
//! flips the liveness flag. Every state write checks that flag first, so a
//! callback or continuation that lands after teardown is a no-op.
//!
//! Synchronous transitions happen inside the call; backend work is handed
//! back as a `LocalBoxFuture` for the caller to spawn on the UI event loop.
//!
//! TRADE-OFFS
//! ==========
//! Standalone sign-out does not touch state directly. The page keeps showing
//! the previous user until the backend's subscription reports `None`.

#[cfg(test)]
#[path = "reconciler_test.rs"]
mod reconciler_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use super::detect::EnvironmentDetector;
use super::user::{NormalizedUser, UserSource, parse_stored_user, user_from_event_detail};
use crate::net::backend::{BackendError, DetachedBackend, IdentityBackend, Persistence, ProviderRequest};
use crate::net::bridge::{DetachedBridge, HOST_AUTH_EVENTS, HostBridge, HostEventHandler, HostMessage};
use crate::net::registration::Registration;
use crate::net::storage::{ACCESS_TOKEN_KEY, KeyValueStore, MemoryStore, USER_INFO_KEY};
use crate::net::types::BackendUser;
use crate::state::auth::{AuthLifecycle, AuthState, EnvironmentMode};

/// Shown when sign-in is requested inside the host app.
pub const HOST_SIGN_IN_INSTRUCTION: &str = "Please use the 'Sign In' button in the app to authenticate.";

/// Receives a snapshot after every accepted state write.
pub type StateListener = Rc<dyn Fn(&AuthState)>;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("stored user record unreadable: {0}")]
    StoredUser(#[from] serde_json::Error),
}

/// Everything outside the page the reconciler talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub bridge: Rc<dyn HostBridge>,
    /// Persistent page-local storage shared with the host app.
    pub local: Rc<dyn KeyValueStore>,
    /// Session-scoped storage, wiped on embedded sign-out.
    pub session: Rc<dyn KeyValueStore>,
    pub backend: Rc<dyn IdentityBackend>,
    /// Epoch milliseconds.
    pub clock: fn() -> i64,
}

impl Collaborators {
    /// No host app, empty in-memory storage, unconfigured backend.
    pub fn detached() -> Self {
        Self {
            bridge: Rc::new(DetachedBridge),
            local: Rc::new(MemoryStore::new()),
            session: Rc::new(MemoryStore::new()),
            backend: Rc::new(DetachedBackend),
            clock: now_ms,
        }
    }

    pub fn detector(&self) -> EnvironmentDetector {
        EnvironmentDetector::new(self.bridge.clone(), self.local.clone())
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("bridge_present", &self.bridge.is_present())
            .finish_non_exhaustive()
    }
}

/// Current time in epoch milliseconds.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn now_ms() -> i64 {
    #[cfg(feature = "csr")]
    {
        js_sys::Date::now() as i64
    }
    #[cfg(not(feature = "csr"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as i64)
    }
}

/// Outcome of a sign-in request.
pub enum SignIn {
    /// Embedded: the host app must sign in; carries the user-facing text.
    HostManaged(&'static str),
    /// Standalone: drive this to start the provider redirect.
    Redirect(LocalBoxFuture<'static, Result<(), AuthError>>),
}

impl std::fmt::Debug for SignIn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HostManaged(text) => f.debug_tuple("HostManaged").field(text).finish(),
            Self::Redirect(_) => f.write_str("Redirect(..)"),
        }
    }
}

struct Inner {
    mode: EnvironmentMode,
    env: Collaborators,
    state: RefCell<AuthState>,
    alive: Cell<bool>,
    mounted: Cell<bool>,
    registrations: RefCell<Vec<Registration>>,
    on_change: StateListener,
}

impl Inner {
    fn update(&self, apply: impl FnOnce(&mut AuthState)) {
        if !self.alive.get() {
            log::debug!("auth state write after unmount dropped");
            return;
        }
        let snapshot = {
            let mut state = self.state.borrow_mut();
            apply(&mut state);
            state.clone()
        };
        (self.on_change)(&snapshot);
    }

    fn set_lifecycle(&self, lifecycle: AuthLifecycle) {
        self.update(|s| s.lifecycle = lifecycle);
    }

    /// Keep a registration until unmount; after unmount release it at once.
    fn hold(&self, mut registration: Registration) {
        if self.alive.get() {
            self.registrations.borrow_mut().push(registration);
        } else {
            registration.release();
        }
    }

    fn accept_host_event(&self, event: &str, detail: Option<serde_json::Value>) {
        match user_from_event_detail(detail) {
            Some(info) => {
                log::info!("host event {event}: received user info");
                self.set_lifecycle(AuthLifecycle::SignedIn(UserSource::Host(info).normalize()));
            }
            None => log::warn!("host event {event} carried no user info, ignored"),
        }
    }

    fn accept_backend_user(&self, user: Option<BackendUser>) {
        let lifecycle = match user {
            Some(user) => AuthLifecycle::SignedIn(UserSource::Backend(user).normalize()),
            None => AuthLifecycle::SignedOut,
        };
        self.update(|s| {
            s.lifecycle = lifecycle;
            s.awaiting_redirect = false;
        });
    }

    fn restore_stored_user(&self) -> Result<Option<NormalizedUser>, AuthError> {
        let Some(raw) = self.env.local.get(USER_INFO_KEY) else {
            return Ok(None);
        };
        let info = parse_stored_user(&raw)?;
        log::info!("restored host user from storage");
        Ok(Some(UserSource::Host(info).normalize()))
    }

    fn clear_host_credentials(&self) {
        self.env.local.remove(ACCESS_TOKEN_KEY);
        self.env.local.remove(USER_INFO_KEY);
    }
}

/// Owns `AuthState` for one page lifetime.
#[derive(Clone)]
pub struct AuthReconciler {
    inner: Rc<Inner>,
}

impl AuthReconciler {
    /// Build a reconciler; the mode is read from `detector` once, here.
    pub fn new(env: Collaborators, detector: &EnvironmentDetector, on_change: StateListener) -> Self {
        let mode = detector.detect();
        Self {
            inner: Rc::new(Inner {
                mode,
                env,
                state: RefCell::new(AuthState::new(mode)),
                alive: Cell::new(true),
                mounted: Cell::new(false),
                registrations: RefCell::new(Vec::new()),
                on_change,
            }),
        }
    }

    pub fn mode(&self) -> EnvironmentMode {
        self.inner.mode
    }

    pub fn state(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    pub fn is_alive(&self) -> bool {
        self.inner.alive.get()
    }

    /// Run the initialization protocol for the detected mode.
    ///
    /// Embedded completes before returning and yields `None`. Standalone
    /// yields the persistence, redirect-result and subscribe sequence. Calls
    /// after the first (or after unmount) do nothing.
    pub fn mount(&self) -> Option<LocalBoxFuture<'static, ()>> {
        if !self.inner.alive.get() || self.inner.mounted.replace(true) {
            log::warn!("auth reconciler mounted twice or after unmount");
            return None;
        }
        match self.inner.mode {
            EnvironmentMode::Embedded => {
                self.mount_embedded();
                None
            }
            EnvironmentMode::Standalone => Some(initialize_standalone(self.inner.clone()).boxed_local()),
        }
    }

    fn mount_embedded(&self) {
        let inner = &self.inner;
        for event in HOST_AUTH_EVENTS {
            let weak = Rc::downgrade(inner);
            let handler: HostEventHandler = Rc::new(move |detail| {
                if let Some(inner) = weak.upgrade() {
                    inner.accept_host_event(event, detail);
                }
            });
            inner.hold(inner.env.bridge.listen(event, handler));
        }
        log::debug!("listening for host auth events");

        let restored = match inner.restore_stored_user() {
            Ok(user) => user,
            Err(e) => {
                log::error!("{e}; clearing stored host credentials");
                inner.clear_host_credentials();
                None
            }
        };

        // A host event may already have resolved the state during registration.
        inner.update(|s| {
            if s.lifecycle == AuthLifecycle::Initializing {
                s.lifecycle = restored.map_or(AuthLifecycle::SignedOut, AuthLifecycle::SignedIn);
            }
        });
    }

    pub fn sign_in(&self) -> SignIn {
        match self.inner.mode {
            EnvironmentMode::Embedded => {
                log::info!("sign-in requested while embedded; deferring to host app");
                SignIn::HostManaged(HOST_SIGN_IN_INSTRUCTION)
            }
            EnvironmentMode::Standalone => {
                let inner = self.inner.clone();
                inner.update(|s| s.awaiting_redirect = true);
                let request = ProviderRequest::google();
                SignIn::Redirect(
                    async move {
                        if let Err(e) = inner.env.backend.sign_in_with_redirect(&request).await {
                            log::error!("{e}");
                            inner.update(|s| s.awaiting_redirect = false);
                            return Err(e.into());
                        }
                        Ok(())
                    }
                    .boxed_local(),
                )
            }
        }
    }

    /// Sign out of the detected mode.
    ///
    /// Embedded clears the host credentials, transitions to `SignedOut` and
    /// notifies the host before returning `None`. Standalone yields the
    /// backend sign-out; the subscription reports the transition.
    pub fn sign_out(&self) -> Option<LocalBoxFuture<'static, ()>> {
        match self.inner.mode {
            EnvironmentMode::Embedded => {
                self.sign_out_embedded();
                None
            }
            EnvironmentMode::Standalone => {
                let inner = self.inner.clone();
                Some(
                    async move {
                        if let Err(e) = inner.env.backend.sign_out().await {
                            log::error!("{e}");
                        }
                    }
                    .boxed_local(),
                )
            }
        }
    }

    fn sign_out_embedded(&self) {
        let inner = &self.inner;
        inner.clear_host_credentials();
        inner.env.session.clear();
        inner.set_lifecycle(AuthLifecycle::SignedOut);

        if inner.env.bridge.is_present() {
            let message = HostMessage::LogoutRequested { timestamp: (inner.env.clock)() };
            if let Err(e) = inner.env.bridge.post_message(&message) {
                log::debug!("logout notification not delivered: {e}");
            }
        }
    }

    /// Release every listener and subscription. Safe to call repeatedly.
    pub fn unmount(&self) {
        if !self.inner.alive.replace(false) {
            return;
        }
        let registrations = std::mem::take(&mut *self.inner.registrations.borrow_mut());
        log::debug!("auth reconciler unmounted, releasing {} registrations", registrations.len());
        drop(registrations);
    }
}

impl std::fmt::Debug for AuthReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthReconciler")
            .field("mode", &self.inner.mode)
            .field("state", &*self.inner.state.borrow())
            .field("alive", &self.inner.alive.get())
            .finish_non_exhaustive()
    }
}

async fn initialize_standalone(inner: Rc<Inner>) {
    let backend = inner.env.backend.clone();

    if let Err(e) = backend.set_persistence(Persistence::Local).await {
        log::error!("{e}");
    }
    if !inner.alive.get() {
        return;
    }

    match backend.redirect_result().await {
        Ok(Some(outcome)) => log::info!(
            "redirect result: user={} credential={} token={}",
            outcome.user.email.as_deref().unwrap_or("<none>"),
            outcome.has_credential,
            outcome.has_access_token
        ),
        Ok(None) => log::debug!("no pending redirect result"),
        Err(e) => log::error!("{e}"),
    }
    if !inner.alive.get() {
        return;
    }

    let weak = Rc::downgrade(&inner);
    let registration = backend.on_auth_state_changed(Rc::new(move |user| {
        if let Some(inner) = weak.upgrade() {
            inner.accept_backend_user(user);
        }
    }));
    inner.hold(registration);
}
