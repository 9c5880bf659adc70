//! # admin-client
//!
//! Leptos + WASM frontend for the storefront administration console.
//!
//! This crate contains pages, components, application state, the REST
//! client and its wire types. The `hydrate` build runs in the browser; the
//! `ssr` build is linked into the host binary to render the initial HTML.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        leptos::logging::warn!("console logger already installed");
    }
    leptos::mount::hydrate_body(app::App);
}
