use std::cell::Cell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use log::debug;
use menuhook_core::sim::{PageSpec, SimEvent, SimReadiness};
use menuhook_core::{BootstrapHook, Document, Handler, HookState, CLICK};
use serde::Serialize;

/// Outcome of running the bootstrap against a page fixture.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub element_id: String,
    pub state: &'static str,
    pub listeners: usize,
    pub clicks: usize,
    pub show_menu_calls: usize,
    pub error: Option<String>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

pub fn load_page(path: &Path) -> Result<PageSpec> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read page fixture: {}", path.display()))?;
    PageSpec::from_json(&contents)
        .with_context(|| format!("Failed to parse page fixture: {}", path.display()))
}

/// Loads `page`, fires readiness, then clicks the bound element `clicks`
/// times. `showMenu` is replaced by a counter.
pub fn run_check(page: &PageSpec, element_id: &str, clicks: usize) -> Result<CheckReport> {
    let document = page.build();
    let readiness = SimReadiness::new();

    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let show_menu: Handler<SimEvent> = Rc::new(move |event: &SimEvent| {
        debug!("showMenu <- {} on node {}", event.event_type(), event.target());
        counter.set(counter.get() + 1);
    });

    let hook = BootstrapHook::new(show_menu).with_element_id(element_id);
    hook.initialize(&readiness, document.clone())?;
    readiness.mark_ready();
    readiness.flush();

    let (state, error, clicked) = match hook.state() {
        HookState::Bound(_) => {
            let element = document
                .element_by_id(element_id)
                .context("Bound element disappeared from the document")?;
            for _ in 0..clicks {
                element.click();
            }
            ("bound", None, clicks)
        }
        HookState::Failed(err) => ("failed", Some(err.to_string()), 0),
        HookState::Idle | HookState::Pending => ("pending", Some("readiness never fired".to_string()), 0),
    };

    Ok(CheckReport {
        element_id: element_id.to_string(),
        state,
        listeners: document.total_listeners(CLICK),
        clicks: clicked,
        show_menu_calls: calls.get(),
        error,
    })
}
