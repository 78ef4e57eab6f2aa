use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use log::{trace, warn};

use crate::error::BootError;
use crate::host::{same_handler, Document, EventTarget, Handler, ListenerOptions, CLICK};

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    None,
    Capturing,
    AtTarget,
    Bubbling,
}

/// An event travelling through a [`SimDocument`].
#[derive(Debug)]
pub struct SimEvent {
    event_type: String,
    target: NodeId,
    current_target: Cell<NodeId>,
    phase: Cell<EventPhase>,
    propagation_stopped: Cell<bool>,
    immediate_propagation_stopped: Cell<bool>,
}

impl SimEvent {
    fn new(event_type: &str, target: NodeId) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: Cell::new(target),
            phase: Cell::new(EventPhase::None),
            propagation_stopped: Cell::new(false),
            immediate_propagation_stopped: Cell::new(false),
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn current_target(&self) -> NodeId {
        self.current_target.get()
    }

    pub fn phase(&self) -> EventPhase {
        self.phase.get()
    }

    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn stop_immediate_propagation(&self) {
        self.propagation_stopped.set(true);
        self.immediate_propagation_stopped.set(true);
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

#[derive(Debug)]
struct Node {
    tag: String,
    id: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Clone)]
struct Listener {
    capture: bool,
    handler: Handler<SimEvent>,
}

#[derive(Default)]
struct ListenerStore {
    map: HashMap<NodeId, HashMap<String, Vec<Listener>>>,
}

impl ListenerStore {
    fn add(&mut self, node: NodeId, event_type: &str, listener: Listener) -> Result<(), BootError> {
        let listeners = self
            .map
            .entry(node)
            .or_default()
            .entry(event_type.to_string())
            .or_default();

        if listeners
            .iter()
            .any(|l| l.capture == listener.capture && same_handler(&l.handler, &listener.handler))
        {
            return Err(BootError::DuplicateListener {
                event_type: event_type.to_string(),
                capture: listener.capture,
            });
        }

        listeners.push(listener);
        Ok(())
    }

    fn get(&self, node: NodeId, event_type: &str, capture: bool) -> Vec<Handler<SimEvent>> {
        self.map
            .get(&node)
            .and_then(|events| events.get(event_type))
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|l| l.capture == capture)
                    .map(|l| Rc::clone(&l.handler))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn count(&self, node: NodeId, event_type: &str) -> usize {
        self.map
            .get(&node)
            .and_then(|events| events.get(event_type))
            .map_or(0, Vec::len)
    }
}

struct Tree {
    nodes: Vec<Node>,
    listeners: ListenerStore,
}

impl Tree {
    /// Nodes in document order (pre-order from the root).
    fn tree_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![0];
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(self.nodes[node].children.iter().rev());
        }
        order
    }

    /// Target's ancestors, root first, followed by the target.
    fn path(&self, target: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut cursor = Some(target);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.nodes[node].parent;
        }
        path.reverse();
        path
    }
}

/// A document tree owned by the in-memory host.
///
/// Clones share the same tree, like references to one page.
#[derive(Clone)]
pub struct SimDocument {
    tree: Rc<RefCell<Tree>>,
}

impl SimDocument {
    /// A document holding only its root element.
    pub fn new(root_tag: &str) -> Self {
        Self::with_root(root_tag, None)
    }

    pub fn with_root(root_tag: &str, id: Option<&str>) -> Self {
        let root = Node {
            tag: root_tag.to_string(),
            id: id.map(str::to_string),
            parent: None,
            children: Vec::new(),
        };
        Self {
            tree: Rc::new(RefCell::new(Tree {
                nodes: vec![root],
                listeners: ListenerStore::default(),
            })),
        }
    }

    pub fn root(&self) -> NodeId {
        0
    }

    /// Appends a child element under `parent` and returns it.
    ///
    /// # Panics
    /// Panics if `parent` does not belong to this document.
    pub fn append(&self, parent: NodeId, tag: &str, id: Option<&str>) -> NodeId {
        let mut tree = self.tree.borrow_mut();
        assert!(parent < tree.nodes.len(), "unknown parent node {parent}");
        let node = tree.nodes.len();
        tree.nodes.push(Node {
            tag: tag.to_string(),
            id: id.map(str::to_string),
            parent: Some(parent),
            children: Vec::new(),
        });
        tree.nodes[parent].children.push(node);
        node
    }

    /// # Panics
    /// Panics if `node` does not belong to this document.
    pub fn element(&self, node: NodeId) -> SimElement {
        self.check_node(node);
        SimElement {
            document: self.clone(),
            node,
        }
    }

    /// # Panics
    /// Panics if `node` does not belong to this document.
    pub fn tag(&self, node: NodeId) -> String {
        self.check_node(node);
        self.tree.borrow().nodes[node].tag.clone()
    }

    /// # Panics
    /// Panics if `node` does not belong to this document.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.check_node(node);
        self.tree.borrow().nodes[node].parent
    }

    /// Number of elements, root included.
    pub fn node_count(&self) -> usize {
        self.tree.borrow().nodes.len()
    }

    fn check_node(&self, node: NodeId) {
        let count = self.node_count();
        assert!(node < count, "unknown node {node} (document has {count})");
    }

    /// Listeners on `node` for `event_type`, both phases.
    pub fn listener_count(&self, node: NodeId, event_type: &str) -> usize {
        self.tree.borrow().listeners.count(node, event_type)
    }

    /// Listeners for `event_type` across the whole document.
    pub fn total_listeners(&self, event_type: &str) -> usize {
        let tree = self.tree.borrow();
        (0..tree.nodes.len())
            .map(|node| tree.listeners.count(node, event_type))
            .sum()
    }

    /// Dispatches a bubbling event at `target`: capture listeners from the
    /// root down, then the target, then bubble listeners back up.
    ///
    /// # Panics
    /// Panics if `target` does not belong to this document.
    pub fn dispatch(&self, target: NodeId, event_type: &str) -> SimEvent {
        self.check_node(target);
        let event = SimEvent::new(event_type, target);
        let path = self.tree.borrow().path(target);
        let (ancestors, _) = path.split_at(path.len() - 1);

        for &node in ancestors {
            event.phase.set(EventPhase::Capturing);
            if !self.invoke(node, &event, true) {
                return event;
            }
        }

        event.phase.set(EventPhase::AtTarget);
        if !self.invoke(target, &event, true) || !self.invoke(target, &event, false) {
            return event;
        }

        for &node in ancestors.iter().rev() {
            event.phase.set(EventPhase::Bubbling);
            if !self.invoke(node, &event, false) {
                return event;
            }
        }

        event.phase.set(EventPhase::None);
        event
    }

    /// # Panics
    /// Panics if `target` does not belong to this document.
    pub fn click(&self, target: NodeId) -> SimEvent {
        self.dispatch(target, CLICK)
    }

    /// Runs `node`'s listeners for one phase. Returns false once propagation
    /// was stopped.
    fn invoke(&self, node: NodeId, event: &SimEvent, capture: bool) -> bool {
        // Snapshot so handlers may add listeners while running.
        let handlers = self
            .tree
            .borrow()
            .listeners
            .get(node, &event.event_type, capture);

        event.current_target.set(node);
        for handler in handlers {
            trace!(
                "[event] {} target={} current={} capture={}",
                event.event_type,
                event.target,
                node,
                capture
            );
            handler(event);
            if event.immediate_propagation_stopped.get() {
                break;
            }
        }
        !event.propagation_stopped.get()
    }
}

impl Document for SimDocument {
    type Element = SimElement;

    fn element_by_id(&self, id: &str) -> Option<SimElement> {
        let tree = self.tree.borrow();
        let mut matches = tree
            .tree_order()
            .into_iter()
            .filter(|&node| tree.nodes[node].id.as_deref() == Some(id));

        let first = matches.next()?;
        let extra = matches.count();
        if extra > 0 {
            warn!("identifier #{id} is shared by {} elements; using the first", extra + 1);
        }
        Some(self.element(first))
    }
}

/// An element of a [`SimDocument`].
#[derive(Clone)]
pub struct SimElement {
    document: SimDocument,
    node: NodeId,
}

impl SimElement {
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn click(&self) -> SimEvent {
        self.document.click(self.node)
    }
}

impl EventTarget for SimElement {
    type Event = SimEvent;

    fn add_listener(
        &self,
        event_type: &str,
        handler: Handler<SimEvent>,
        options: ListenerOptions,
    ) -> Result<(), BootError> {
        self.document.tree.borrow_mut().listeners.add(
            self.node,
            event_type,
            Listener {
                capture: options.capture,
                handler,
            },
        )
    }
}
