#![forbid(unsafe_code)]

//! Platform-independent interactivity for the folio portfolio page.
//!
//! Each behavior of the page is a small component with explicit state that,
//! given a measured snapshot and an event, plans a list of
//! [`Mutation`](mutation::Mutation)s:
//!
//! | Component | State | Events |
//! |-----------|-------|--------|
//! | [`menu`] | [`MenuState`](menu::MenuState) | menu click, anchor click (close) |
//! | [`anchor`] | none | anchor click |
//! | [`form`] | none | submit |
//! | [`viewport`] | [`ActiveSectionTracker`](viewport::ActiveSectionTracker), [`RevealState`](viewport::RevealState) | scroll, card hover |
//! | [`back_to_top`] | [`BackToTop`](back_to_top::BackToTop) | scroll |
//!
//! [`Page`](page::Page) binds the components to a [`Dom`](dom::Dom): it
//! measures, dispatches, and applies. No JS/WASM types appear in this crate;
//! the browser binding lives in `folio-web`, and the `test-helpers` feature
//! provides an in-memory document for tests.

pub mod anchor;
pub mod back_to_top;
pub mod config;
pub mod dom;
pub mod error;
pub mod form;
pub mod menu;
pub mod mutation;
pub mod page;
pub mod viewport;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use config::PageConfig;
pub use dom::Dom;
pub use error::{ConfigError, PageError};
pub use mutation::{Mutation, ScrollBehavior, Target};
pub use page::{Features, Page, PageEvent, Subscription};
