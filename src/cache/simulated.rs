//! In-process application cache
//!
//! Stands in for the browser's cache where there is no browser: the CLI
//! drives it from flags and the tests drive it step by step.

use super::{ApplicationCache, CacheEvent, CacheStatus, Listener};
use std::cell::{Cell, RefCell};
use tracing::debug;

/// Application cache whose status and events are driven by the caller
pub struct SimulatedCache {
    status: Cell<CacheStatus>,
    listeners: RefCell<Vec<(CacheEvent, Listener)>>,
}

impl SimulatedCache {
    pub fn new(status: CacheStatus) -> Self {
        Self {
            status: Cell::new(status),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn set_status(&self, status: CacheStatus) {
        self.status.set(status);
    }

    /// Fire `event`, returning how many listeners ran
    ///
    /// Listeners run after the listener list borrow is released, so they may
    /// attach further listeners or dispatch again.
    pub fn dispatch(&self, event: CacheEvent) -> usize {
        let matching: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(kind, _)| *kind == event)
            .map(|(_, listener)| listener.clone())
            .collect();

        debug!("Dispatching cache event {} to {} listener(s)", event, matching.len());
        for listener in &matching {
            listener();
        }
        matching.len()
    }

    /// Number of listeners attached for `event`
    pub fn listener_count(&self, event: CacheEvent) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(kind, _)| *kind == event)
            .count()
    }
}

impl ApplicationCache for SimulatedCache {
    fn status(&self) -> CacheStatus {
        self.status.get()
    }

    fn add_event_listener(&self, event: CacheEvent, listener: Listener) {
        self.listeners.borrow_mut().push((event, listener));
    }
}
