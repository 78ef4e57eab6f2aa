//! Decisions the browser host makes, kept free of `web-sys` so they build
//! and test on any target.

use menuhook_core::host::same_handler;
use menuhook_core::{BootError, Handler, ListenerOptions};

/// How a readiness callback gets scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyPath {
    /// The parser is still running: wait for a one-shot `DOMContentLoaded`.
    ContentLoaded,
    /// Elements are already queryable: run on the next microtask.
    Microtask,
}

/// Picks the scheduling path from `document.readyState`.
pub fn ready_path(ready_state: &str) -> ReadyPath {
    if ready_state == "loading" {
        ReadyPath::ContentLoaded
    } else {
        ReadyPath::Microtask
    }
}

struct Registration<T, E> {
    target: T,
    event_type: String,
    capture: bool,
    handler: Handler<E>,
}

/// Listeners attached through the host, keyed by target, event type, phase
/// and handler identity. The DOM cannot enumerate listeners, so this is
/// what duplicate checks run against.
pub struct ListenerRegistry<T, E> {
    entries: Vec<Registration<T, E>>,
}

impl<T, E> Default for ListenerRegistry<T, E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: PartialEq, E> ListenerRegistry<T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fails with [`BootError::DuplicateListener`] if this exact
    /// registration already exists.
    pub fn check(
        &self,
        target: &T,
        event_type: &str,
        handler: &Handler<E>,
        options: ListenerOptions,
    ) -> Result<(), BootError> {
        let duplicate = self.entries.iter().any(|r| {
            r.target == *target
                && r.event_type == event_type
                && r.capture == options.capture
                && same_handler(&r.handler, handler)
        });
        if duplicate {
            return Err(BootError::DuplicateListener {
                event_type: event_type.to_string(),
                capture: options.capture,
            });
        }
        Ok(())
    }

    /// Records a registration the host has already performed.
    pub fn record(&mut self, target: T, event_type: &str, handler: Handler<E>, options: ListenerOptions) {
        self.entries.push(Registration {
            target,
            event_type: event_type.to_string(),
            capture: options.capture,
            handler,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_ready_path_from_ready_state() {
        assert_eq!(ready_path("loading"), ReadyPath::ContentLoaded);
        assert_eq!(ready_path("interactive"), ReadyPath::Microtask);
        assert_eq!(ready_path("complete"), ReadyPath::Microtask);
    }

    #[test]
    fn test_registry_rejects_exact_duplicate() {
        let mut registry: ListenerRegistry<u32, ()> = ListenerRegistry::new();
        let handler: Handler<()> = Rc::new(|_| {});

        assert!(registry
            .check(&1, "click", &handler, ListenerOptions::BUBBLE)
            .is_ok());
        registry.record(1, "click", Rc::clone(&handler), ListenerOptions::BUBBLE);

        assert_eq!(
            registry.check(&1, "click", &handler, ListenerOptions::BUBBLE),
            Err(BootError::DuplicateListener {
                event_type: "click".to_string(),
                capture: false,
            })
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_distinguishes_target_type_phase_and_handler() {
        let mut registry: ListenerRegistry<u32, ()> = ListenerRegistry::new();
        let handler: Handler<()> = Rc::new(|_| {});
        let other: Handler<()> = Rc::new(|_| {});
        registry.record(1, "click", Rc::clone(&handler), ListenerOptions::BUBBLE);

        assert!(registry.check(&2, "click", &handler, ListenerOptions::BUBBLE).is_ok());
        assert!(registry.check(&1, "keydown", &handler, ListenerOptions::BUBBLE).is_ok());
        assert!(registry.check(&1, "click", &handler, ListenerOptions::CAPTURE).is_ok());
        assert!(registry.check(&1, "click", &other, ListenerOptions::BUBBLE).is_ok());
        assert!(!registry.is_empty());
    }
}
