//! Release handle for event listeners and auth-state subscriptions.

#[cfg(test)]
#[path = "registration_test.rs"]
mod registration_test;

/// Owns the teardown of one listener or subscription.
///
/// The release closure runs at most once: on the first `release()` call or on
/// drop, whichever comes first.
#[must_use = "dropping a Registration releases it immediately"]
pub struct Registration {
    release: Option<Box<dyn FnOnce()>>,
}

impl Registration {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self { release: Some(Box::new(release)) }
    }

    /// A registration with nothing to release.
    pub fn noop() -> Self {
        Self { release: None }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    pub fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("active", &self.is_active())
            .finish()
    }
}
