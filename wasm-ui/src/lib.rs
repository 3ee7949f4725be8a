//! Web UI for the Tasdeed extraction dashboard
//!
//! A Yew-based front end that uploads an accounts spreadsheet to the
//! extraction backend and follows the job over a WebSocket push channel.

mod alerts;
mod api;
mod app;
mod browser;
mod components;
mod push;
mod store;

use wasm_bindgen::prelude::*;

/// Entry point for the WASM application.
#[wasm_bindgen(start)]
pub fn run_app() {
    // Initialize panic hook for better error messages
    console_error_panic_hook::set_once();

    // Mount the Yew app
    yew::Renderer::<app::App>::new().render();
}
