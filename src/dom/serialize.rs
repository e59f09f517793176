//! HTML serialization through html5ever's serializer

use super::{Node, NodeData};
use html5ever::serialize::{serialize, Serialize, SerializeOpts, Serializer, TraversalScope};
use html5ever::{LocalName, Namespace, QualName};
use std::io;
use tracing::debug;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

impl Node {
    /// Serialize this node and its subtree
    pub fn outer_html(&self) -> String {
        to_markup(self, TraversalScope::IncludeNode)
    }

    /// Serialize the children of this node
    pub fn inner_html(&self) -> String {
        // The parent's name decides whether text is raw (script, style)
        let parent = self.local_name().map(element_name);
        to_markup(self, TraversalScope::ChildrenOnly(parent))
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        match traversal_scope {
            TraversalScope::IncludeNode => write_node(self, serializer),
            TraversalScope::ChildrenOnly(_) => self
                .children()
                .iter()
                .try_for_each(|child| write_node(child, serializer)),
        }
    }
}

fn write_node<S: Serializer>(node: &Node, serializer: &mut S) -> io::Result<()> {
    match node.data() {
        NodeData::Text(text) => serializer.write_text(&text.borrow()),
        NodeData::Comment(text) => serializer.write_comment(text),
        NodeData::Element { name, attrs } => {
            let name = element_name(name);
            let attrs: Vec<(QualName, String)> = attrs
                .borrow()
                .iter()
                .map(|attr| (attribute_name(&attr.name), attr.value.clone()))
                .collect();

            serializer.start_elem(
                name.clone(),
                attrs.iter().map(|(name, value)| (name, value.as_str())),
            )?;
            for child in node.children() {
                write_node(&child, serializer)?;
            }
            serializer.end_elem(name)
        }
    }
}

fn element_name(name: &str) -> QualName {
    QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(name))
}

fn attribute_name(name: &str) -> QualName {
    QualName::new(None, Namespace::from(""), LocalName::from(name))
}

fn to_markup(node: &Node, traversal_scope: TraversalScope) -> String {
    let mut out = Vec::new();
    let opts = SerializeOpts {
        traversal_scope,
        ..SerializeOpts::default()
    };
    // Writes into a Vec never fail
    if let Err(e) = serialize(&mut out, node, opts) {
        debug!("Serializing {:?} stopped early: {}", node, e);
    }
    String::from_utf8_lossy(&out).into_owned()
}
