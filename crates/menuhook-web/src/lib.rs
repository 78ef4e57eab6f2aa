//! Browser host for the menu bootstrap.
//!
//! Build with `--features web` for `wasm32-unknown-unknown`. Other targets
//! only get [`wiring`], the target-independent part of the host.

pub mod wiring;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod dom;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use dom::{DocumentReadiness, WebDocument, WebElement};

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod entry {
    use std::rc::Rc;

    use menuhook_core::{BootError, BootstrapHook, Handler};
    use wasm_bindgen::prelude::*;

    use crate::dom::{DocumentReadiness, WebDocument};

    #[wasm_bindgen(raw_module = "./topnav.js")]
    extern "C" {
        #[wasm_bindgen(js_name = showMenu)]
        fn show_menu(event: &web_sys::Event);
    }

    /// Entry point for the WASM module.
    ///
    /// Called automatically when the module is loaded. Sets up panic and log
    /// forwarding to the console, then waits for the document before binding
    /// `#menuButton` to `showMenu`.
    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        if let Err(err) = boot() {
            log::error!("menu bootstrap not started: {err}");
        }
    }

    fn boot() -> Result<(), BootError> {
        let document = WebDocument::current()?;
        let readiness = DocumentReadiness::new(document.clone());
        let handler: Handler<web_sys::Event> = Rc::new(|event: &web_sys::Event| show_menu(event));

        BootstrapHook::new(handler).initialize(&readiness, document)
    }
}
