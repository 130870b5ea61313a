//! Client-side state shared between the auth logic and the page.
//!
//! DESIGN
//! ======
//! `auth` is the only domain here; the reconciler writes it and the
//! presentation layer reads it through a reactive signal.

pub mod auth;
