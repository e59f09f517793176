//! Grafting shadow index content into the live document

use super::scripts::ScriptWaitSet;
use crate::dom::{Document, Node};

/// Replace the children of `destination` with imports of `source`'s children
///
/// Children move in document order. Each child is imported into `live`
/// first, scripts among the imports are registered with `waits`, and only
/// then is the import appended: appending is what starts a script loading,
/// and handlers must already be attached to the node that gets inserted.
pub fn replace(source: &Node, destination: &Node, live: &Document, waits: &ScriptWaitSet) {
    while let Some(stale) = destination.first_child() {
        stale.remove();
    }

    while let Some(original) = source.first_child() {
        let child = live.import_node(&original);
        original.remove();
        if child.is_script() {
            waits.register(&child);
        }
        live.append_child(destination, &child);
    }
}
