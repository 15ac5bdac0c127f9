// crates/feed-parser/src/xml.rs
//! Generic XML tree
//!
//! Feed text is read into a loosely-shaped tree before any field logic runs:
//! every child element name maps to a list of nodes (even when the element
//! appears once), attributes are kept in an ordered list, and mixed text is
//! concatenated. When serialized, attributes sit under [`ATTRIBUTES_KEY`]
//! and text under [`TEXT_KEY`], which is the shape uncleaned fields expose.

use crate::error::{FeedError, FeedResult};
use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Reserved key attributes are serialized under
pub const ATTRIBUTES_KEY: &str = "$";

/// Reserved key mixed text is serialized under
pub const TEXT_KEY: &str = "_";

/// One element of a parsed document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<(String, Vec<Node>)>,
}

impl Node {
    /// Creates an empty node
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a text-only node
    pub fn text_node(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Adds an attribute, returning the node
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Appends a child element, returning the node
    pub fn with_child(mut self, name: impl Into<String>, child: Node) -> Self {
        self.push_child(name, child);
        self
    }

    /// Sets an attribute, replacing any previous value under the same name
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Appends a child under `name`, keeping first-appearance order of names
    pub fn push_child(&mut self, name: impl Into<String>, child: Node) {
        let name = name.into();
        match self.children.iter_mut().find(|(key, _)| *key == name) {
            Some((_, list)) => list.push(child),
            None => self.children.push((name, vec![child])),
        }
    }

    /// Appends a run of text content
    pub fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// All attributes in document order
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Looks up one attribute by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns true if the element carried any attributes
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Returns true if the element has child elements
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns true if the element is plain text: no attributes, no children
    pub fn is_leaf(&self) -> bool {
        self.attributes.is_empty() && self.children.is_empty()
    }

    /// Concatenated text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// All children under `name`, or `None` if there are none
    pub fn children(&self, name: &str) -> Option<&[Node]> {
        self.children
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, list)| list.as_slice())
            .filter(|list| !list.is_empty())
    }

    /// First child under `name`
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children(name).and_then(|list| list.first())
    }

    /// Text of the first child under `name`
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(Node::text)
    }

    /// Child element names in first-appearance order
    pub fn element_names(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|(key, _)| key.as_str())
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_leaf() {
            return serializer.serialize_str(&self.text);
        }

        let mut map = serializer.serialize_map(None)?;
        if !self.attributes.is_empty() {
            map.serialize_entry(ATTRIBUTES_KEY, &Attributes(&self.attributes))?;
        }
        if !self.text.is_empty() {
            map.serialize_entry(TEXT_KEY, &self.text)?;
        }
        for (name, list) in &self.children {
            map.serialize_entry(name, list)?;
        }
        map.end()
    }
}

struct Attributes<'a>(&'a [(String, String)]);

impl Serialize for Attributes<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Parses feed text into a document node
///
/// The returned node is the document itself; its single child is the root
/// element (normally `rss`).
pub fn parse_document(content: &str) -> FeedResult<Node> {
    let mut reader = Reader::from_str(content);

    // The bottom entry is the document; everything above it is an open element.
    let mut stack: Vec<(String, Node)> = vec![(String::new(), Node::new())];

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                stack.push(open_element(&e)?);
            }
            Event::Empty(e) => {
                let (name, node) = open_element(&e)?;
                attach(&mut stack, name, node)?;
            }
            Event::End(_) => {
                if stack.len() < 2 {
                    return Err(FeedError::Parsing("unexpected closing tag".to_string()));
                }
                if let Some((name, node)) = stack.pop() {
                    attach(&mut stack, name, node)?;
                }
            }
            Event::Text(e) => {
                let text = match e.unescape() {
                    Ok(text) => text.into_owned(),
                    Err(err) => {
                        debug!("Keeping undecoded text after entity error: {}", err);
                        String::from_utf8_lossy(&e).into_owned()
                    }
                };
                if !text.trim().is_empty() {
                    current(&mut stack)?.push_text(&text);
                }
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                current(&mut stack)?.push_text(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if stack.len() > 1 {
        let open = stack.last().map(|(name, _)| name.clone()).unwrap_or_default();
        return Err(FeedError::Parsing(format!("unclosed element <{}>", open)));
    }

    let (_, document) = stack
        .pop()
        .ok_or_else(|| FeedError::Parsing("empty document".to_string()))?;

    if !document.has_children() {
        return Err(FeedError::Parsing("document has no root element".to_string()));
    }

    Ok(document)
}

fn open_element(e: &BytesStart<'_>) -> FeedResult<(String, Node)> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut node = Node::new();

    for attr in e.attributes() {
        let attr = attr.map_err(|err| FeedError::Parsing(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        node.set_attribute(key, value);
    }

    Ok((name, node))
}

fn current(stack: &mut [(String, Node)]) -> FeedResult<&mut Node> {
    stack
        .last_mut()
        .map(|(_, node)| node)
        .ok_or_else(|| FeedError::Parsing("no open element".to_string()))
}

fn attach(stack: &mut [(String, Node)], name: String, node: Node) -> FeedResult<()> {
    current(stack)?.push_child(name, node);
    Ok(())
}
