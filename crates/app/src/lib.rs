//! `skillsight-app` — Leptos single-page frontend.
//!
//! Thin shell over the session core and the analysis client: routing, session
//! context, guard component, and form pages. Built for the browser with
//! Trunk; on native targets this crate is intentionally empty (all testable
//! logic lives in the lower crates).

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod context;
#[cfg(target_arch = "wasm32")]
pub mod firebase;
#[cfg(target_arch = "wasm32")]
pub mod layout;
#[cfg(target_arch = "wasm32")]
pub mod pages;

/// WASM entry point, called automatically when the module loads.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    // Panic messages land in the browser console instead of vanishing.
    console_error_panic_hook::set_once();

    leptos::mount_to_body(app::App);
}
