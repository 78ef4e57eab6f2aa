use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use log::debug;

use crate::host::Readiness;

type Task = Box<dyn FnOnce()>;

#[derive(Default)]
struct ReadyInner {
    ready: bool,
    waiting: Vec<Task>,
    tasks: VecDeque<Task>,
}

/// Document readiness for the in-memory host.
///
/// Callbacks registered while the document is loading wait for
/// [`mark_ready`](Self::mark_ready). Once ready, callbacks go to a task queue
/// that only [`flush`](Self::flush) drains, so `on_ready` never runs a
/// callback on the caller's stack.
#[derive(Clone, Default)]
pub struct SimReadiness {
    inner: Rc<RefCell<ReadyInner>>,
}

impl SimReadiness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callbacks registered but not yet run.
    pub fn pending(&self) -> usize {
        let inner = self.inner.borrow();
        inner.waiting.len() + inner.tasks.len()
    }

    /// Signals that the document finished parsing. Returns false if it was
    /// already ready.
    pub fn mark_ready(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.ready {
            return false;
        }
        inner.ready = true;
        let waiting = std::mem::take(&mut inner.waiting);
        debug!("document ready, {} callback(s) queued", waiting.len());
        inner.tasks.extend(waiting);
        true
    }

    /// Runs queued callbacks, including ones queued while flushing, and
    /// returns how many ran.
    pub fn flush(&self) -> usize {
        let mut ran = 0;
        loop {
            // Borrow ends before the callback runs so it may call `on_ready`.
            let next = self.inner.borrow_mut().tasks.pop_front();
            let Some(task) = next else {
                break;
            };
            task();
            ran += 1;
        }
        ran
    }
}

impl Readiness for SimReadiness {
    fn on_ready(&self, callback: Box<dyn FnOnce()>) {
        let mut inner = self.inner.borrow_mut();
        if inner.ready {
            inner.tasks.push_back(callback);
        } else {
            inner.waiting.push(callback);
        }
    }
}
