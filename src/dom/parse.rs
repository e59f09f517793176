//! HTML parsing into the live DOM model
//!
//! Parsing is delegated to `scraper` (html5ever); the resulting tree is then
//! copied into our own nodes so it can be imported into another document.

use super::{Document, DocumentId, Node};
use scraper::{ElementRef, Html};

/// Markers that make input a whole document rather than body markup
const DOCUMENT_MARKERS: [&str; 4] = ["<!doctype", "<html", "<head", "<body"];

/// Parse `html` as a whole document, the way a browser parses a page
///
/// Missing `<html>`, `<head>` or `<body>` tags are implied by the parser.
pub fn parse_document(html: &str) -> Document {
    let parsed = Html::parse_document(html);
    let id = DocumentId::next();
    let root = convert_element(id, parsed.root_element());
    Document::with_root(id, root)
}

/// Parse `html` into a detached document
///
/// Input with a doctype or an `<html>`, `<head>` or `<body>` tag is parsed as
/// a full document. Anything else is treated as body markup, so a bare
/// fragment never lands in `<head>`.
pub fn parse_html(html: &str) -> Document {
    let lowered = html.to_ascii_lowercase();
    if DOCUMENT_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        return parse_document(html);
    }

    let parsed = Html::parse_fragment(html);
    let document = Document::new();
    // The fragment root is a synthetic <html> holding the parsed nodes
    for child in convert_children(document.id(), parsed.root_element()) {
        document.body().push_child(&child);
    }
    document
}

fn convert_element(owner: DocumentId, element: ElementRef<'_>) -> Node {
    let value = element.value();
    let node = Node::new_element(owner, value.name(), value.attrs());
    for child in convert_children(owner, element) {
        node.push_child(&child);
    }
    node
}

fn convert_children(owner: DocumentId, element: ElementRef<'_>) -> Vec<Node> {
    element
        .children()
        .filter_map(|child| match child.value() {
            scraper::Node::Element(_) => {
                ElementRef::wrap(child).map(|element| convert_element(owner, element))
            }
            scraper::Node::Text(text) => Some(Node::new_text(owner, &**text)),
            scraper::Node::Comment(comment) => Some(Node::new_comment(owner, &**comment)),
            _ => None,
        })
        .collect()
}
