use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, error, info};

use crate::error::BootError;
use crate::host::{Document, EventTarget, Handler, ListenerOptions, Readiness, CLICK, MENU_BUTTON_ID};

/// A completed listener registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub element_id: String,
    pub event_type: String,
    pub options: ListenerOptions,
}

/// Lifecycle of a [`BootstrapHook`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookState {
    /// `initialize` has not been called.
    Idle,
    /// Registered with the readiness facility, waiting for the document.
    Pending,
    /// The listener is attached.
    Bound(Binding),
    /// The deferred step failed; nothing was attached.
    Failed(BootError),
}

/// Attaches `handler` as a non-capturing listener on an already resolved
/// element.
///
/// `element` is `None` when the lookup for `element_id` came back empty.
pub fn bind_listener<T: EventTarget>(
    element: Option<&T>,
    element_id: &str,
    event_type: &str,
    handler: Handler<T::Event>,
) -> Result<Binding, BootError> {
    let element = element.ok_or_else(|| BootError::element_not_found(element_id))?;
    let options = ListenerOptions::BUBBLE;
    element.add_listener(event_type, handler, options)?;

    Ok(Binding {
        element_id: element_id.to_string(),
        event_type: event_type.to_string(),
        options,
    })
}

/// Binds the menu button to the menu handler once the document is ready.
///
/// One hook instance performs at most one lookup and attaches at most one
/// listener. A page that re-renders needs a new hook.
pub struct BootstrapHook<E> {
    element_id: String,
    event_type: String,
    handler: Handler<E>,
    state: Rc<RefCell<HookState>>,
}

impl<E: 'static> BootstrapHook<E> {
    /// Hook for `#menuButton` / `click`.
    pub fn new(handler: Handler<E>) -> Self {
        Self {
            element_id: MENU_BUTTON_ID.to_string(),
            event_type: CLICK.to_string(),
            handler,
            state: Rc::new(RefCell::new(HookState::Idle)),
        }
    }

    pub fn with_element_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = element_id.into();
        self
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn state(&self) -> HookState {
        self.state.borrow().clone()
    }

    /// Registers the lookup-and-bind step with `readiness` and returns
    /// immediately.
    ///
    /// The contents of `document` are not inspected here: a missing element
    /// shows up later as [`HookState::Failed`], reported through the error
    /// log.
    ///
    /// # Errors
    /// Returns [`BootError::AlreadyInitialized`] if this hook was initialized
    /// before. Nothing is registered in that case.
    pub fn initialize<R, D>(&self, readiness: &R, document: D) -> Result<(), BootError>
    where
        R: Readiness + ?Sized,
        D: Document + 'static,
        D::Element: EventTarget<Event = E>,
    {
        {
            let mut state = self.state.borrow_mut();
            if *state != HookState::Idle {
                return Err(BootError::AlreadyInitialized);
            }
            *state = HookState::Pending;
        }

        let state = Rc::clone(&self.state);
        let element_id = self.element_id.clone();
        let event_type = self.event_type.clone();
        let handler = Rc::clone(&self.handler);

        debug!("menu bootstrap waiting for document (#{element_id})");
        readiness.on_ready(Box::new(move || {
            let element = document.element_by_id(&element_id);
            let next = match bind_listener(element.as_ref(), &element_id, &event_type, handler) {
                Ok(binding) => {
                    info!("bound `{}` listener on #{}", binding.event_type, binding.element_id);
                    HookState::Bound(binding)
                }
                Err(err) => {
                    error!("menu bootstrap failed: {err}");
                    HookState::Failed(err)
                }
            };
            *state.borrow_mut() = next;
        }));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Button {
        listeners: RefCell<Vec<(String, ListenerOptions)>>,
    }

    impl EventTarget for Button {
        type Event = ();

        fn add_listener(
            &self,
            event_type: &str,
            _handler: Handler<()>,
            options: ListenerOptions,
        ) -> Result<(), BootError> {
            self.listeners
                .borrow_mut()
                .push((event_type.to_string(), options));
            Ok(())
        }
    }

    /// Runs callbacks only when told to.
    #[derive(Default)]
    struct Deferred {
        queue: RefCell<Vec<Box<dyn FnOnce()>>>,
        registrations: Cell<usize>,
    }

    impl Deferred {
        fn fire(&self) {
            let queue: Vec<_> = self.queue.borrow_mut().drain(..).collect();
            for callback in queue {
                callback();
            }
        }
    }

    impl Readiness for Deferred {
        fn on_ready(&self, callback: Box<dyn FnOnce()>) {
            self.registrations.set(self.registrations.get() + 1);
            self.queue.borrow_mut().push(callback);
        }
    }

    struct Empty;

    impl Document for Empty {
        type Element = Button;

        fn element_by_id(&self, _id: &str) -> Option<Button> {
            None
        }
    }

    #[test]
    fn test_bind_listener_missing_element() {
        let handler: Handler<()> = Rc::new(|_| {});
        let result = bind_listener::<Button>(None, "menuButton", CLICK, handler);
        assert_eq!(result, Err(BootError::element_not_found("menuButton")));
    }

    #[test]
    fn test_bind_listener_is_non_capturing() {
        let button = Button {
            listeners: RefCell::new(Vec::new()),
        };
        let handler: Handler<()> = Rc::new(|_| {});

        let binding = bind_listener(Some(&button), "menuButton", CLICK, handler).unwrap();

        assert_eq!(binding.options, ListenerOptions::BUBBLE);
        assert_eq!(
            *button.listeners.borrow(),
            vec![("click".to_string(), ListenerOptions { capture: false })]
        );
    }

    #[test]
    fn test_initialize_defers_lookup() {
        let readiness = Deferred::default();
        let handler: Handler<()> = Rc::new(|_| {});
        let hook = BootstrapHook::new(handler);

        assert!(hook.initialize(&readiness, Empty).is_ok());
        assert_eq!(hook.state(), HookState::Pending);

        readiness.fire();
        assert_eq!(
            hook.state(),
            HookState::Failed(BootError::element_not_found("menuButton"))
        );
    }

    #[test]
    fn test_initialize_twice_registers_once() {
        let readiness = Deferred::default();
        let handler: Handler<()> = Rc::new(|_| {});
        let hook = BootstrapHook::new(handler);

        hook.initialize(&readiness, Empty).unwrap();
        assert_eq!(
            hook.initialize(&readiness, Empty),
            Err(BootError::AlreadyInitialized)
        );
        assert_eq!(readiness.registrations.get(), 1);
    }

    #[test]
    fn test_with_element_id() {
        let handler: Handler<()> = Rc::new(|_| {});
        let hook = BootstrapHook::new(handler).with_element_id("navToggle");
        assert_eq!(hook.element_id(), "navToggle");
        assert_eq!(hook.event_type(), "click");
        assert_eq!(hook.state(), HookState::Idle);
    }
}
