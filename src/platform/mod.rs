//! Platform abstraction layer
//!
//! The browser shell (renderer, asset loading, DOM overlays, raw event
//! capture) talks to the simulation through the `web` bindings. Native
//! builds drive [`crate::sim::World`] directly from `main.rs`.

#[cfg(target_arch = "wasm32")]
pub mod web;
