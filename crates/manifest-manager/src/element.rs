//! Generic XML element tree
//!
//! Lossless in-memory form of a manifest. Anything the patcher does not
//! understand is carried through untouched.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Android namespace prefix used for attribute keys
pub const ANDROID_PREFIX: &str = "android";

/// A child of an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
    /// `<!DOCTYPE ...>` body, without the keyword
    DocType(String),
    /// `<?target data?>` body
    ProcessingInstruction(String),
}

/// XML element with ordered attributes and children
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Qualified tag name (e.g., "uses-permission")
    pub name: String,

    /// Attributes keyed by qualified name (e.g., "android:name")
    pub attributes: IndexMap<String, String>,

    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element without attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder-style `android:` attribute setter
    pub fn with_android_attribute(self, name: &str, value: impl Into<String>) -> Self {
        self.with_attribute(android_key(name), value)
    }

    /// Builder-style child element append
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Set an attribute, keeping its position if it already exists
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Get an attribute by qualified name
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Get an `android:` namespaced attribute
    pub fn android_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(&android_key(name))
    }

    /// Child elements, skipping text and comments
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Child elements with the given tag name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |element| element.name == name)
    }

    /// First child element with the given tag name
    pub fn first_child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }

    /// Mutable access to the first child element with the given tag name
    pub fn first_child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(element) if element.name == name => Some(element),
            _ => None,
        })
    }

    /// Insert a child element next to its siblings of the same tag.
    ///
    /// The element goes directly after the last existing sibling with the same
    /// name. Without such a sibling it goes before the first child named
    /// `before` (when given and present), otherwise it is appended.
    pub fn insert_grouped(&mut self, element: Element, before: Option<&str>) {
        let last_same = self.children.iter().rposition(|node| {
            matches!(node, Node::Element(existing) if existing.name == element.name)
        });

        let index = match last_same {
            Some(index) => index + 1,
            None => before
                .and_then(|anchor| {
                    self.children.iter().position(|node| {
                        matches!(node, Node::Element(existing) if existing.name == anchor)
                    })
                })
                .unwrap_or(self.children.len()),
        };

        self.children.insert(index, Node::Element(element));
    }
}

/// Qualified key for an `android:` attribute
pub fn android_key(name: &str) -> String {
    format!("{}:{}", ANDROID_PREFIX, name)
}
