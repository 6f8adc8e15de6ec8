#![forbid(unsafe_code)]

//! Browser host for the folio portfolio page.
//!
//! This crate binds [`folio_core::Page`] to the live document:
//!
//! - `WebDom` implements [`folio_core::Dom`] over `web-sys`.
//! - `PortfolioPage` is the `wasm-bindgen` export. Its constructor mounts the
//!   page and attaches one listener per [`folio_core::Subscription`].
//! - [`console_layer`] routes `tracing` events to the devtools console.
//!
//! Everything touching JS types is gated on `wasm32`; native builds only
//! compile the log formatter so it can be tested without a browser.
//!
//! ```js
//! import init, { PortfolioPage } from "./pkg/folio_web.js";
//!
//! document.addEventListener("DOMContentLoaded", async () => {
//!   await init();
//!   window.portfolio = new PortfolioPage();
//! });
//! ```

pub mod console_layer;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use dom::WebDom;
#[cfg(target_arch = "wasm32")]
pub use wasm::PortfolioPage;
