//! AgriGuru Web Frontend
//!
//! Leptos-based WASM single page: dashboard, AI photo tools, chat widget.

mod api;
mod app;
mod browser;
mod components;
mod content;
mod pages;
mod sections;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
