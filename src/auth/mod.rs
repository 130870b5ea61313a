//! Dual-mode authentication.
//!
//! ARCHITECTURE
//! ============
//! `detect` decides once whether the page is embedded in the host app,
//! `user` normalizes both user sources into one shape, and `reconciler`
//! owns the sign-in lifecycle for whichever mode was detected.

pub mod detect;
pub mod reconciler;
pub mod user;
