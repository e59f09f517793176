//! Host pieces backed by a current-thread tokio runtime
//!
//! Everything here spawns with `spawn_local`, so callers must be running
//! inside a `tokio::task::LocalSet`.

use super::Timers;
use crate::dom::{Node, ScriptEvent, ScriptHost};
use std::time::Duration;
use tracing::debug;

/// `setTimeout` on tokio's timer wheel
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioTimers;

impl Timers for TokioTimers {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
    }
}

/// Reports `load` for every inserted external script on a later tick
///
/// Inline scripts are considered executed on insertion.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeferredScriptHost;

impl ScriptHost for DeferredScriptHost {
    fn script_inserted(&self, script: &Node) {
        let Some(src) = script.get_attribute("src") else {
            return;
        };
        let script = script.clone();
        tokio::task::spawn_local(async move {
            tokio::task::yield_now().await;
            debug!("Script loaded: {}", src);
            script.dispatch(ScriptEvent::Load);
        });
    }
}
