//! DOM nodes
//!
//! Nodes are reference-counted handles; cloning a `Node` clones the handle,
//! not the subtree. Use [`Document::import_node`](super::Document::import_node)
//! for a deep copy.

use super::DocumentId;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// Handler attached to a script element
pub type ScriptHandler = Rc<dyn Fn()>;

/// Completion events a script element can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptEvent {
    Load,
    Error,
    Abort,
}

impl ScriptEvent {
    pub const ALL: [ScriptEvent; 3] = [Self::Load, Self::Error, Self::Abort];

    fn slot(self) -> usize {
        match self {
            Self::Load => 0,
            Self::Error => 1,
            Self::Abort => 2,
        }
    }
}

/// A single attribute, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// What a node holds
#[derive(Debug)]
pub enum NodeData {
    Element {
        /// Lower-case local name
        name: String,
        attrs: RefCell<Vec<Attribute>>,
    },
    Text(RefCell<String>),
    Comment(String),
}

pub(crate) struct NodeInner {
    owner: Cell<DocumentId>,
    data: NodeData,
    parent: RefCell<Weak<NodeInner>>,
    children: RefCell<Vec<Node>>,
    // onload / onerror / onabort
    handlers: [RefCell<Option<ScriptHandler>>; 3],
}

/// Handle to a DOM node
#[derive(Clone)]
pub struct Node(Rc<NodeInner>);

impl Node {
    fn with_data(owner: DocumentId, data: NodeData) -> Self {
        Self(Rc::new(NodeInner {
            owner: Cell::new(owner),
            data,
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            handlers: Default::default(),
        }))
    }

    pub(crate) fn new_element<I, K, V>(owner: DocumentId, name: &str, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let attrs = attrs
            .into_iter()
            .map(|(name, value)| Attribute {
                name: name.into(),
                value: value.into(),
            })
            .collect();
        Self::with_data(
            owner,
            NodeData::Element {
                name: name.to_ascii_lowercase(),
                attrs: RefCell::new(attrs),
            },
        )
    }

    pub(crate) fn new_text(owner: DocumentId, text: impl Into<String>) -> Self {
        Self::with_data(owner, NodeData::Text(RefCell::new(text.into())))
    }

    pub(crate) fn new_comment(owner: DocumentId, text: impl Into<String>) -> Self {
        Self::with_data(owner, NodeData::Comment(text.into()))
    }

    pub fn data(&self) -> &NodeData {
        &self.0.data
    }

    /// Id of the document that owns this node
    pub fn owner(&self) -> DocumentId {
        self.0.owner.get()
    }

    /// Lower-case local name, if this is an element
    pub fn local_name(&self) -> Option<&str> {
        match &self.0.data {
            NodeData::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_element(&self, name: &str) -> bool {
        self.local_name()
            .is_some_and(|local| local.eq_ignore_ascii_case(name))
    }

    pub fn is_script(&self) -> bool {
        self.is_element("script")
    }

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        match &self.0.data {
            NodeData::Element { attrs, .. } => attrs
                .borrow()
                .iter()
                .find(|attr| attr.name.eq_ignore_ascii_case(name))
                .map(|attr| attr.value.clone()),
            _ => None,
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// Set or replace an attribute; no-op on non-elements
    pub fn set_attribute(&self, name: &str, value: &str) {
        if let NodeData::Element { attrs, .. } = &self.0.data {
            let mut attrs = attrs.borrow_mut();
            match attrs
                .iter_mut()
                .find(|attr| attr.name.eq_ignore_ascii_case(name))
            {
                Some(attr) => attr.value = value.to_string(),
                None => attrs.push(Attribute {
                    name: name.to_ascii_lowercase(),
                    value: value.to_string(),
                }),
            }
        }
    }

    pub fn attributes(&self) -> Vec<Attribute> {
        match &self.0.data {
            NodeData::Element { attrs, .. } => attrs.borrow().clone(),
            _ => Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<Node> {
        self.0.parent.borrow().upgrade().map(Node)
    }

    /// Snapshot of the child list
    pub fn children(&self) -> Vec<Node> {
        self.0.children.borrow().clone()
    }

    pub fn first_child(&self) -> Option<Node> {
        self.0.children.borrow().first().cloned()
    }

    pub fn child_count(&self) -> usize {
        self.0.children.borrow().len()
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        match &self.0.data {
            NodeData::Text(text) => text.borrow().clone(),
            NodeData::Comment(_) => String::new(),
            NodeData::Element { .. } => self
                .0
                .children
                .borrow()
                .iter()
                .map(Node::text_content)
                .collect(),
        }
    }

    /// Detach this node from its parent, if any
    pub fn remove(&self) {
        let Some(parent) = self.parent() else {
            return;
        };
        parent
            .0
            .children
            .borrow_mut()
            .retain(|child| !child.ptr_eq(self));
        *self.0.parent.borrow_mut() = Weak::new();
    }

    /// Append `child` as the last child, detaching it from any previous parent
    ///
    /// Ownership is not checked here; inserting into a live document goes
    /// through [`Document::append_child`](super::Document::append_child).
    pub(crate) fn push_child(&self, child: &Node) {
        child.remove();
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
    }

    /// Deep copy owned by `owner`; handlers are not copied
    pub(crate) fn deep_clone(&self, owner: DocumentId) -> Node {
        let copy = match &self.0.data {
            NodeData::Element { name, attrs } => Self::with_data(
                owner,
                NodeData::Element {
                    name: name.clone(),
                    attrs: RefCell::new(attrs.borrow().clone()),
                },
            ),
            NodeData::Text(text) => Self::new_text(owner, text.borrow().clone()),
            NodeData::Comment(text) => Self::new_comment(owner, text.clone()),
        };
        for child in self.0.children.borrow().iter() {
            copy.push_child(&child.deep_clone(owner));
        }
        copy
    }

    /// All descendants (excluding self) in document order
    pub fn descendants(&self) -> Vec<Node> {
        let mut out = Vec::new();
        for child in self.0.children.borrow().iter() {
            out.push(child.clone());
            out.extend(child.descendants());
        }
        out
    }

    pub fn set_handler(&self, event: ScriptEvent, handler: ScriptHandler) {
        *self.0.handlers[event.slot()].borrow_mut() = Some(handler);
    }

    pub fn has_handler(&self, event: ScriptEvent) -> bool {
        self.0.handlers[event.slot()].borrow().is_some()
    }

    /// Run the handler for `event`; returns false when none is attached
    pub fn dispatch(&self, event: ScriptEvent) -> bool {
        let handler = self.0.handlers[event.slot()].borrow().clone();
        match handler {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.data {
            NodeData::Element { name, .. } => {
                write!(f, "<{}> ({} children)", name, self.child_count())
            }
            NodeData::Text(text) => write!(f, "#text {:?}", text.borrow()),
            NodeData::Comment(text) => write!(f, "#comment {:?}", text),
        }
    }
}
