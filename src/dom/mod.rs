// src/dom/mod.rs

//! Predicate-based selection over parsed HTML trees.
//!
//! Works directly on the `ego_tree::Tree<scraper::Node>` that `scraper`
//! produces. Selectors are pure predicates composed by conjunction; traversal
//! is lazy pre-order depth-first over the whole subtree, so a non-matching
//! ancestor never hides its descendants. There are no combinator semantics:
//! visit everything, test everything.

pub mod markdown;

use ego_tree::{NodeId, NodeRef};
use scraper::Node;

pub use markdown::to_markdown;

/// Coarse node classification used by [`Selector::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Doctype,
    Comment,
    Text,
    Element,
}

impl NodeKind {
    /// Classify a parsed node. Fragment roots count as documents.
    pub fn of(node: &Node) -> Option<NodeKind> {
        match node {
            Node::Document | Node::Fragment => Some(NodeKind::Document),
            Node::Doctype(_) => Some(NodeKind::Doctype),
            Node::Comment(_) => Some(NodeKind::Comment),
            Node::Text(_) => Some(NodeKind::Text),
            Node::Element(_) => Some(NodeKind::Element),
            _ => None,
        }
    }
}

/// A filter to select nodes in a DOM tree.
///
/// Stateless and reusable; a slice of selectors matches a node only when
/// every selector in the slice does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Element with the given tag name
    Tag(String),
    /// Element whose attribute `key` has exactly `value` (absent reads as "")
    Attr { key: String, value: String },
    /// Element whose `class` attribute contains the given whole token
    Class(String),
    /// Node of the given kind
    Kind(NodeKind),
}

impl Selector {
    /// Select element nodes by tag name.
    pub fn tag(name: impl Into<String>) -> Self {
        Self::Tag(name.into())
    }

    /// Select element nodes by attribute name and value.
    pub fn attr(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Attr {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Select element nodes by class name (exact token, not substring).
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    /// Select element nodes by id.
    pub fn id(value: impl Into<String>) -> Self {
        Self::attr("id", value)
    }

    /// Select nodes by kind.
    pub fn kind(kind: NodeKind) -> Self {
        Self::Kind(kind)
    }

    /// Test a single node against this selector.
    pub fn matches(&self, node: NodeRef<'_, Node>) -> bool {
        match self {
            Self::Tag(name) => node
                .value()
                .as_element()
                .is_some_and(|el| el.name() == name),
            Self::Attr { key, value } => {
                node.value().as_element().is_some() && attr(node, key) == value
            }
            Self::Class(name) => node.value().as_element().is_some_and(|el| {
                el.attr("class")
                    .unwrap_or("")
                    .split_whitespace()
                    .any(|token| token == name)
            }),
            Self::Kind(kind) => NodeKind::of(node.value()) == Some(*kind),
        }
    }
}

/// Lazy pre-order depth-first iterator over the nodes of a subtree that
/// satisfy all given selectors.
///
/// Implemented as an explicit stack of pending nodes rather than recursion:
/// popping a node pushes its next sibling (unless it is the traversal root)
/// and its first child, then tests the node itself. No work happens past the
/// last item a consumer observes, so early termination is free.
pub struct Matches<'a, 's> {
    stack: Vec<NodeRef<'a, Node>>,
    root: NodeId,
    selectors: &'s [Selector],
}

impl<'a> Iterator for Matches<'a, '_> {
    type Item = NodeRef<'a, Node>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            // Siblings of the root are outside the subtree.
            if node.id() != self.root {
                if let Some(sibling) = node.next_sibling() {
                    self.stack.push(sibling);
                }
            }
            if let Some(child) = node.first_child() {
                self.stack.push(child);
            }
            if self.selectors.iter().all(|s| s.matches(node)) {
                return Some(node);
            }
        }
        None
    }
}

/// Traverse the subtree rooted at `root` in document order, yielding every
/// node (the root included) that satisfies all `selectors`.
pub fn traverse<'a, 's>(root: NodeRef<'a, Node>, selectors: &'s [Selector]) -> Matches<'a, 's> {
    Matches {
        stack: vec![root],
        root: root.id(),
        selectors,
    }
}

/// First node of the subtree matching all selectors, in document order.
pub fn first<'a>(root: NodeRef<'a, Node>, selectors: &[Selector]) -> Option<NodeRef<'a, Node>> {
    traverse(root, selectors).next()
}

/// Attribute value of an element node, or "" when absent. Absence and an
/// empty value are indistinguishable by design.
pub fn attr<'a>(node: NodeRef<'a, Node>, key: &str) -> &'a str {
    node.value()
        .as_element()
        .and_then(|el| el.attr(key))
        .unwrap_or("")
}

/// Visible text of a subtree: all descendant text nodes concatenated, runs
/// of whitespace collapsed to single spaces, ends trimmed.
pub fn text(node: NodeRef<'_, Node>) -> String {
    let mut buf = String::new();
    for n in traverse(node, &[Selector::kind(NodeKind::Text)]) {
        if let Some(t) = n.value().as_text() {
            buf.push_str(t);
        }
    }
    buf.split_whitespace().collect::<Vec<_>>().join(" ")
}
