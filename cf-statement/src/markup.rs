//! Immutable markup trees
//!
//! A [`Document`] owns every node of a parsed page in a single arena. Nodes are stored in document
//! pre-order and refer to each other by [`NodeId`], so a [`NodeRef`] is just a borrowed document
//! and an index, and can never outlive the tree it points into.
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use encoding_rs::{Encoding, UTF_8};
use scraper::{Html, Node as HtmlNode};

use crate::error::ParseError;

/// Stable handle of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the position of the node in document pre-order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// An element, e.g. `<div class="title">`.
    Element(Element),
    /// A run of character data, with entities already decoded.
    Text(String),
}

/// An element's name and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
}

impl Element {
    /// The tag name, as produced by the tokenizer.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value of the attribute `name`, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates over the attributes as `(name, value)` pairs.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    next_sibling: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A parsed HTML document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    /// Parses raw bytes as UTF-8 encoded HTML.
    ///
    /// # Errors
    ///
    /// See [`Document::parse_with_charset`].
    pub fn parse(bytes: &[u8]) -> Result<Document, ParseError> {
        Document::parse_with_charset(bytes, None)
    }

    /// Parses raw bytes as HTML, decoding them with the encoding named by `charset`.
    ///
    /// A byte order mark takes precedence over `charset`, and unknown labels fall back to UTF-8.
    /// Malformed byte sequences are replaced rather than rejected.
    ///
    /// # Errors
    ///
    /// - [`ParseError::Empty`] if the input is empty or only whitespace.
    /// - [`ParseError::Binary`] if the decoded input contains NUL characters.
    pub fn parse_with_charset(bytes: &[u8], charset: Option<&str>) -> Result<Document, ParseError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ParseError::Empty);
        }

        let encoding = charset
            .and_then(|label| Encoding::for_label(label.trim().as_bytes()))
            .unwrap_or(UTF_8);
        let (text, _, _) = encoding.decode(bytes);

        Document::parse_str(&text)
    }

    /// Parses a string as HTML in recovery mode.
    ///
    /// Unclosed tags are closed implicitly, stray end tags are dropped and unknown entities are
    /// kept as literal text. Parse errors are never reported.
    ///
    /// # Errors
    ///
    /// - [`ParseError::Empty`] if the input is empty or only whitespace.
    /// - [`ParseError::Binary`] if the input contains NUL characters.
    pub fn parse_str(html: &str) -> Result<Document, ParseError> {
        if html.trim().is_empty() {
            return Err(ParseError::Empty);
        }

        if html.contains('\0') {
            return Err(ParseError::Binary);
        }

        let html = Html::parse_document(html);

        Document::from_html(&html)
    }

    /// Copies the element and text nodes of `html` into an arena.
    fn from_html(html: &Html) -> Result<Document, ParseError> {
        let mut nodes: Vec<Node> = Vec::new();
        let mut ids = HashMap::new();

        for node in html.tree.root().descendants() {
            let kind = match node.value() {
                HtmlNode::Element(element) => NodeKind::Element(Element {
                    name: element.name().to_string(),
                    attrs: element
                        .attrs()
                        .map(|(key, value)| (key.to_string(), value.to_string()))
                        .collect(),
                }),
                HtmlNode::Text(text) => NodeKind::Text(String::from(&**text)),
                // Comments, doctypes and processing instructions carry no content.
                _ => continue,
            };

            let id = NodeId(nodes.len());
            let parent = node
                .parent()
                .and_then(|parent| ids.get(&parent.id()).copied());

            if let Some(NodeId(parent)) = parent {
                if let Some(&NodeId(previous)) = nodes[parent].children.last() {
                    nodes[previous].next_sibling = Some(id);
                }

                nodes[parent].children.push(id);
            }

            ids.insert(node.id(), id);
            nodes.push(Node {
                kind,
                parent,
                next_sibling: None,
                children: Vec::new(),
            });
        }

        let root = nodes
            .iter()
            .position(|node| node.parent.is_none() && matches!(node.kind, NodeKind::Element(_)))
            .map(NodeId)
            .ok_or(ParseError::NoRoot)?;

        Ok(Document { nodes, root })
    }

    /// Returns the root element, usually `<html>`.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            document: self,
            id: self.root,
        }
    }

    /// Returns the node with the given `id`, if it belongs to this document.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { document: self, id })
    }

    /// Returns the number of element and text nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the document holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Document::parse_str(s)
    }
}

/// A borrowed node of a [`Document`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    document: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    /// Returns the handle of this node.
    #[must_use]
    pub const fn id(self) -> NodeId {
        self.id
    }

    /// Returns the document that owns this node.
    #[must_use]
    pub const fn document(self) -> &'a Document {
        self.document
    }

    /// Returns the payload of this node.
    #[must_use]
    pub fn kind(self) -> &'a NodeKind {
        &self.document.node(self.id).kind
    }

    /// Returns the element payload, or `None` for text nodes.
    #[must_use]
    pub fn as_element(self) -> Option<&'a Element> {
        match self.kind() {
            NodeKind::Element(element) => Some(element),
            NodeKind::Text(_) => None,
        }
    }

    /// Returns `true` if this is an element node.
    #[must_use]
    pub fn is_element(self) -> bool {
        self.as_element().is_some()
    }

    /// Returns `true` if this is a text node.
    #[must_use]
    pub fn is_text(self) -> bool {
        self.text().is_some()
    }

    /// The tag name of an element node.
    #[must_use]
    pub fn tag_name(self) -> Option<&'a str> {
        self.as_element().map(Element::name)
    }

    /// The value of the attribute `name` of an element node.
    #[must_use]
    pub fn attr(self, name: &str) -> Option<&'a str> {
        self.as_element().and_then(|element| element.attr(name))
    }

    /// The content of a text node.
    #[must_use]
    pub fn text(self) -> Option<&'a str> {
        match self.kind() {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element(_) => None,
        }
    }

    /// Returns the parent element, or `None` for the root.
    #[must_use]
    pub fn parent(self) -> Option<NodeRef<'a>> {
        self.document
            .node(self.id)
            .parent
            .map(|id| self.with_id(id))
    }

    /// Iterates over the direct children in document order.
    pub fn children(self) -> impl DoubleEndedIterator<Item = NodeRef<'a>> {
        self.document
            .node(self.id)
            .children
            .iter()
            .map(move |&id| self.with_id(id))
    }

    /// Returns the node that directly follows this one under the same parent.
    #[must_use]
    pub fn next_sibling(self) -> Option<NodeRef<'a>> {
        self.document
            .node(self.id)
            .next_sibling
            .map(|id| self.with_id(id))
    }

    /// Returns the first element that follows this node under the same parent, skipping text.
    #[must_use]
    pub fn next_element_sibling(self) -> Option<NodeRef<'a>> {
        std::iter::successors(self.next_sibling(), |node| node.next_sibling())
            .find(|node| node.is_element())
    }

    /// Iterates over this node and all of its descendants in pre-order.
    #[must_use]
    pub fn descendants(self) -> Descendants<'a> {
        Descendants {
            document: self.document,
            stack: vec![self.id],
        }
    }

    const fn with_id(self, id: NodeId) -> NodeRef<'a> {
        NodeRef {
            document: self.document,
            id,
        }
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.document, other.document) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            NodeKind::Element(element) => f
                .debug_struct("Element")
                .field("id", &self.id.0)
                .field("name", &element.name)
                .field("attrs", &element.attrs)
                .finish(),
            NodeKind::Text(text) => f
                .debug_struct("Text")
                .field("id", &self.id.0)
                .field("text", text)
                .finish(),
        }
    }
}

/// Pre-order depth-first iterator over a subtree, see [`NodeRef::descendants`].
pub struct Descendants<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<NodeRef<'a>> {
        let id = self.stack.pop()?;

        // Children are pushed in reverse so the first child is visited next.
        self.stack
            .extend(self.document.node(id).children.iter().rev());

        Some(NodeRef {
            document: self.document,
            id,
        })
    }
}
