//! Script load tracking
//!
//! Dynamically inserted scripts have no reliable execution order relative to
//! the code that inserted them, so boot waits until every external script
//! from the shadow index has reported back.

use crate::dom::{Node, ScriptEvent};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::debug;

#[derive(Default)]
struct Inner {
    pending: Cell<usize>,
    all_done: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Inner {
    fn did_finish(&self) {
        let Some(remaining) = self.pending.get().checked_sub(1) else {
            return;
        };
        self.pending.set(remaining);
        if remaining == 0 {
            let callback = self.all_done.borrow_mut().take();
            if let Some(callback) = callback {
                callback();
            }
        }
    }
}

/// Counter of in-flight external scripts with a one-shot completion callback
#[derive(Clone, Default)]
pub struct ScriptWaitSet(Rc<Inner>);

impl ScriptWaitSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `script` if it loads from a `src`; must run before it is inserted
    ///
    /// Load, error and abort all count as finished; a script counts once.
    pub fn register(&self, script: &Node) {
        let Some(src) = script.get_attribute("src") else {
            return;
        };
        let finished = Rc::new(Cell::new(false));
        for event in ScriptEvent::ALL {
            let inner = self.0.clone();
            let finished = finished.clone();
            let src = src.clone();
            script.set_handler(
                event,
                Rc::new(move || {
                    if finished.replace(true) {
                        return;
                    }
                    debug!("Script {:?} finished: {}", event, src);
                    inner.did_finish();
                }),
            );
        }
        self.0.pending.set(self.0.pending.get() + 1);
    }

    /// Run `callback` once nothing is pending: immediately if that is already true
    pub fn on_all_done(&self, callback: impl FnOnce() + 'static) {
        if self.0.pending.get() == 0 {
            callback();
        } else {
            *self.0.all_done.borrow_mut() = Some(Box::new(callback));
        }
    }

    pub fn pending(&self) -> usize {
        self.0.pending.get()
    }
}
