//! In-memory host: a document tree with DOM event dispatch and a readiness
//! signal driven by explicit task flushes.

mod document;
mod fixture;
mod readiness;

pub use document::{EventPhase, NodeId, SimDocument, SimElement, SimEvent};
pub use fixture::{NodeSpec, PageSpec};
pub use readiness::SimReadiness;
