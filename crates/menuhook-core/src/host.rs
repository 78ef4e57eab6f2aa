//! Seams between the bootstrap hook and whatever hosts the page.

use std::rc::Rc;

use crate::error::BootError;

/// Identifier of the top navigation menu button.
pub const MENU_BUTTON_ID: &str = "menuButton";

/// Event type the menu button reacts to.
pub const CLICK: &str = "click";

/// An event listener. Two handlers are the same listener only if they are
/// the same `Rc` allocation.
pub type Handler<E> = Rc<dyn Fn(&E)>;

/// Returns true when both handlers point at the same allocation.
pub fn same_handler<E>(a: &Handler<E>, b: &Handler<E>) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

/// Listener registration flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    pub capture: bool,
}

impl ListenerOptions {
    pub const BUBBLE: Self = Self { capture: false };
    pub const CAPTURE: Self = Self { capture: true };
}

/// One-shot "document is ready" registration.
///
/// Implementations must run each callback exactly once after the document's
/// elements are queryable, and never from inside `on_ready` itself.
pub trait Readiness {
    fn on_ready(&self, callback: Box<dyn FnOnce()>);
}

impl<R: Readiness + ?Sized> Readiness for Rc<R> {
    fn on_ready(&self, callback: Box<dyn FnOnce()>) {
        (**self).on_ready(callback)
    }
}

/// A node that accepts event listeners.
pub trait EventTarget {
    type Event;

    /// Registers `handler` for `event_type`.
    ///
    /// # Errors
    /// Returns [`BootError::DuplicateListener`] when the same handler is
    /// already registered for `event_type` with the same capture flag.
    fn add_listener(
        &self,
        event_type: &str,
        handler: Handler<Self::Event>,
        options: ListenerOptions,
    ) -> Result<(), BootError>;
}

/// Element lookup by identifier.
pub trait Document {
    type Element: EventTarget;

    /// First element in tree order whose identifier is `id`.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
}
