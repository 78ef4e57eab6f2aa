use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use menuhook_core::{BootError, Document, EventTarget, Handler, ListenerOptions, Readiness};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::AddEventListenerOptions;

use crate::wiring::{ready_path, ListenerRegistry, ReadyPath};

fn host_error(err: JsValue) -> BootError {
    BootError::Host(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

thread_local! {
    static REGISTERED: RefCell<ListenerRegistry<web_sys::Element, web_sys::Event>> =
        RefCell::new(ListenerRegistry::new());
}

/// The page's `document`.
#[derive(Clone)]
pub struct WebDocument(web_sys::Document);

impl WebDocument {
    pub fn current() -> Result<Self, BootError> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self)
            .ok_or_else(|| BootError::Host("no window.document".to_string()))
    }

    pub fn ready_path(&self) -> ReadyPath {
        ready_path(&self.0.ready_state())
    }
}

impl Document for WebDocument {
    type Element = WebElement;

    fn element_by_id(&self, id: &str) -> Option<WebElement> {
        self.0.get_element_by_id(id).map(WebElement)
    }
}

pub struct WebElement(web_sys::Element);

impl EventTarget for WebElement {
    type Event = web_sys::Event;

    fn add_listener(
        &self,
        event_type: &str,
        handler: Handler<web_sys::Event>,
        options: ListenerOptions,
    ) -> Result<(), BootError> {
        REGISTERED.with(|registered| {
            registered
                .borrow()
                .check(&self.0, event_type, &handler, options)
        })?;

        let forward = Rc::clone(&handler);
        let cb = Closure::wrap(Box::new(move |event: web_sys::Event| {
            forward(&event);
        }) as Box<dyn Fn(web_sys::Event)>);

        self.0
            .add_event_listener_with_callback_and_bool(
                event_type,
                cb.as_ref().unchecked_ref(),
                options.capture,
            )
            .map_err(host_error)?;
        // Listeners live as long as the page.
        cb.forget();

        REGISTERED.with(|registered| {
            registered
                .borrow_mut()
                .record(self.0.clone(), event_type, handler, options)
        });
        Ok(())
    }
}

/// Readiness backed by `DOMContentLoaded`.
///
/// While the document is still loading, callbacks wait for a one-shot
/// `DOMContentLoaded` listener. After that they run on the microtask queue.
pub struct DocumentReadiness {
    document: WebDocument,
}

impl DocumentReadiness {
    pub fn new(document: WebDocument) -> Self {
        Self { document }
    }
}

impl Readiness for DocumentReadiness {
    fn on_ready(&self, callback: Box<dyn FnOnce()>) {
        if self.document.ready_path() == ReadyPath::Microtask {
            debug!("document already parsed, deferring to microtask");
            wasm_bindgen_futures::spawn_local(async move { callback() });
            return;
        }

        let options = AddEventListenerOptions::new();
        options.set_once(true);
        let listener = Closure::once_into_js(move || callback());

        if let Err(err) = self
            .document
            .0
            .add_event_listener_with_callback_and_add_event_listener_options(
                "DOMContentLoaded",
                listener.unchecked_ref(),
                &options,
            )
        {
            log::error!("could not wait for DOMContentLoaded: {}", host_error(err));
        }
    }
}
