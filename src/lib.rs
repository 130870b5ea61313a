//! # dual-signin
//!
//! Leptos + WASM Google sign-in page that runs either as a standalone web page
//! (redirect-based Firebase sign-in) or embedded in a native app's WebView
//! (the host app signs in and hands the user to the page).
//!
//! The auth logic in `auth` only talks to the narrow collaborator traits in
//! `net`; the browser implementations live in `web` and are compiled only with
//! the `csr` feature, so everything else runs under native `cargo test`.

pub mod app;
pub mod auth;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
#[cfg(feature = "csr")]
pub mod web;

/// WASM entry point: install the panic hook and logger, then mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already installed: {e}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
