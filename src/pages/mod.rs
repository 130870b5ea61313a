//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! The app has a single screen. `signin` owns the auth lifecycle for its
//! lifetime and delegates the signed-in card to `components`.

pub mod signin;
