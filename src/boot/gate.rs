//! Boot gate

use super::log;
use crate::dom::Document;
use crate::host::Application;
use std::cell::Cell;
use std::rc::Rc;

/// What gets started once boot is allowed
#[derive(Clone)]
pub struct BootTarget {
    pub app: Rc<dyn Application>,
    /// Resolved application configuration
    pub config: serde_json::Value,
}

impl BootTarget {
    pub fn new(app: Rc<dyn Application>, config: serde_json::Value) -> Self {
        Self { app, config }
    }
}

/// One-shot latch in front of the application entry point
pub struct BootGate {
    booted: Cell<bool>,
    document: Rc<Document>,
    target: BootTarget,
}

impl BootGate {
    pub fn new(document: Rc<Document>, target: BootTarget) -> Self {
        Self {
            booted: Cell::new(false),
            document,
            target,
        }
    }

    /// Start the application once the document is ready; later calls do nothing
    pub fn allow_boot(&self) {
        if self.booted.replace(true) {
            return;
        }
        log("- Booting app");

        let target = self.target.clone();
        self.document
            .on_ready(Box::new(move || target.app.create(&target.config)));
    }

    pub fn has_booted(&self) -> bool {
        self.booted.get()
    }
}
