//! Page bootstrap for the top navigation menu.
//!
//! Once the hosting document is ready, [`BootstrapHook`] looks up the menu
//! button (`#menuButton` by default) and registers a single non-capturing
//! `click` listener that forwards to the menu handler.
//!
//! The hook is written against the seams in [`host`], so the same code runs
//! against the browser (`menuhook-web`) and against the in-memory document
//! in [`sim`].

pub mod error;
pub mod hook;
pub mod host;
pub mod sim;

pub use error::BootError;
pub use hook::{bind_listener, Binding, BootstrapHook, HookState};
pub use host::{Document, EventTarget, Handler, ListenerOptions, Readiness, CLICK, MENU_BUTTON_ID};
