//! Minimal live DOM
//!
//! Just enough of the document model for the bootloader: a document with a
//! head and body, element/text/comment nodes, script completion handlers and
//! a ready state with a content-loaded signal.
//!
//! Node ownership is tracked per document. Appending a node owned by another
//! document does not move it: the browser implicitly copies it, and anything
//! attached to the original (such as a script `onload` handler) is lost. To
//! keep handlers, import the node first and attach handlers to the import.

mod node;
mod parse;
mod serialize;

pub use node::{Attribute, Node, NodeData, ScriptEvent, ScriptHandler};
pub use parse::{parse_document, parse_html};

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Identity of a document, used for node ownership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// `document.readyState`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Interactive => write!(f, "interactive"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Receives script elements as they are inserted into a live document
///
/// The host decides when (and whether) to report `load`, `error` or `abort`
/// on external scripts. Inline scripts are announced too but report nothing.
pub trait ScriptHost {
    fn script_inserted(&self, script: &Node);
}

/// An HTML document
pub struct Document {
    id: DocumentId,
    html: Node,
    head: Node,
    body: Node,
    ready_state: Cell<ReadyState>,
    content_loaded: RefCell<Vec<Box<dyn FnOnce()>>>,
    script_host: RefCell<Option<Rc<dyn ScriptHost>>>,
}

impl Document {
    /// Empty document (`<html><head></head><body></body></html>`) in `loading` state
    pub fn new() -> Self {
        let id = DocumentId::next();
        let html = Node::new_element(id, "html", Vec::<(String, String)>::new());
        Self::with_root(id, html)
    }

    pub(crate) fn with_root(id: DocumentId, html: Node) -> Self {
        let find_or_create = |name: &str| {
            html.children()
                .into_iter()
                .find(|child| child.is_element(name))
                .unwrap_or_else(|| {
                    let node = Node::new_element(id, name, Vec::<(String, String)>::new());
                    html.push_child(&node);
                    node
                })
        };
        let head = find_or_create("head");
        let body = find_or_create("body");
        Self {
            id,
            html,
            head,
            body,
            ready_state: Cell::new(ReadyState::Loading),
            content_loaded: RefCell::new(Vec::new()),
            script_host: RefCell::new(None),
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn document_element(&self) -> &Node {
        &self.html
    }

    pub fn head(&self) -> &Node {
        &self.head
    }

    pub fn body(&self) -> &Node {
        &self.body
    }

    pub fn create_element(&self, name: &str) -> Node {
        Node::new_element(self.id, name, Vec::<(String, String)>::new())
    }

    pub fn create_element_with<I, K, V>(&self, name: &str, attrs: I) -> Node
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Node::new_element(self.id, name, attrs)
    }

    pub fn create_text_node(&self, text: &str) -> Node {
        Node::new_text(self.id, text)
    }

    pub fn create_comment(&self, text: &str) -> Node {
        Node::new_comment(self.id, text)
    }

    /// Deep copy of `node` owned by this document, with no handlers attached
    pub fn import_node(&self, node: &Node) -> Node {
        node.deep_clone(self.id)
    }

    /// Append `child` to `parent` and return the node actually inserted
    ///
    /// A child owned by another document is replaced by a handler-less copy.
    /// Script elements in the inserted subtree are announced to the script
    /// host, in document order, if `parent` belongs to this document.
    pub fn append_child(&self, parent: &Node, child: &Node) -> Node {
        let inserted = if child.owner() == self.id {
            child.clone()
        } else {
            debug!("Adopting {:?} from a foreign document by copy", child);
            child.deep_clone(self.id)
        };
        parent.push_child(&inserted);

        if parent.owner() == self.id {
            let host = self.script_host.borrow().clone();
            if let Some(host) = host {
                let scripts = std::iter::once(inserted.clone())
                    .chain(inserted.descendants())
                    .filter(Node::is_script);
                for script in scripts {
                    host.script_inserted(&script);
                }
            }
        }
        inserted
    }

    pub fn set_script_host(&self, host: Rc<dyn ScriptHost>) {
        *self.script_host.borrow_mut() = Some(host);
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state.get()
    }

    /// Advance the ready state; leaving `loading` fires content-loaded callbacks
    pub fn set_ready_state(&self, state: ReadyState) {
        let previous = self.ready_state.replace(state);
        if previous == ReadyState::Loading && state != ReadyState::Loading {
            let callbacks = std::mem::take(&mut *self.content_loaded.borrow_mut());
            debug!("Document is {}, running {} ready callback(s)", state, callbacks.len());
            for callback in callbacks {
                callback();
            }
        }
    }

    /// Run `callback` now if the document is past `loading`, otherwise on content loaded
    pub fn on_ready(&self, callback: Box<dyn FnOnce()>) {
        if self.ready_state.get() != ReadyState::Loading {
            callback();
        } else {
            self.content_loaded.borrow_mut().push(callback);
        }
    }

    /// Serialize the whole document, doctype included
    pub fn to_html(&self) -> String {
        format!("<!DOCTYPE html>\n{}", self.html.outer_html())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.id)
            .field("ready_state", &self.ready_state.get())
            .finish()
    }
}
