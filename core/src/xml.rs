//! Generic tag tree for hierarchical response documents.
//!
//! Responses of query-style cloud APIs are small XML documents whose leaves carry
//! text. [`XmlNode`] keeps only what extraction needs: the local tag name, the
//! concatenated text and the ordered children. Attributes and namespaces are dropped.

use crate::{Error, Result};
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::Reader;

/// A parsed element of a response document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    text: String,
    children: Vec<XmlNode>,
}

impl XmlNode {
    /// Create a new node without text and children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a complete document and return its root element.
    ///
    /// Leaf text is kept verbatim. Whitespace-only text is dropped from elements
    /// that have children, and from outside the root element.
    ///
    /// Returns [`ErrorKind::Parse`](crate::ErrorKind::Parse) if the payload is not
    /// a well-formed document with exactly one root element.
    pub fn parse(content: &[u8]) -> Result<XmlNode> {
        let mut reader = Reader::from_reader(content);

        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    if root.is_some() {
                        return Err(Error::parse("document has more than one root element"));
                    }
                    stack.push(XmlNode::new(local_name(&e)?));
                }
                Ok(Event::Empty(e)) => {
                    attach(&mut stack, &mut root, XmlNode::new(local_name(&e)?))?;
                }
                Ok(Event::End(_)) => {
                    let mut node = stack
                        .pop()
                        .ok_or_else(|| Error::parse("unexpected closing tag"))?;
                    if !node.children.is_empty() && is_blank(&node.text) {
                        node.text.clear();
                    }
                    attach(&mut stack, &mut root, node)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e
                        .unescape()
                        .map_err(|err| Error::parse("invalid text content").with_source(err))?;
                    push_text(&mut stack, &text)?;
                }
                Ok(Event::CData(e)) => {
                    let text = std::str::from_utf8(&e)
                        .map_err(|err| Error::parse("invalid cdata content").with_source(err))?;
                    push_text(&mut stack, text)?;
                }
                Ok(Event::Eof) => break,
                // Declarations, comments, processing instructions and doctypes.
                Ok(_) => {}
                Err(err) => {
                    return Err(Error::parse("malformed response document")
                        .with_source(err)
                        .with_context(format!("position: {}", reader.buffer_position())))
                }
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::parse(format!("element <{}> is not closed", open.name)));
        }
        root.ok_or_else(|| Error::parse("document has no root element"))
    }

    /// Local tag name of this element.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text content of this element.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// All child elements in document order.
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Returns true if this element has neither text nor children.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.children.is_empty()
    }

    /// Append a child element.
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set the text of this element.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// First child element with given name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All child elements with given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Walk down the tree following `path`, taking the first match at every level.
    pub fn find(&self, path: &[&str]) -> Option<&XmlNode> {
        path.iter().try_fold(self, |node, name| node.child(name))
    }

    /// Text of the element at `path`.
    pub fn find_text(&self, path: &[&str]) -> Option<&str> {
        self.find(path).map(|n| n.text())
    }

    /// Like [`XmlNode::find`] but a missing element is a parse error.
    pub fn require(&self, path: &[&str]) -> Result<&XmlNode> {
        self.find(path).ok_or_else(|| {
            Error::parse(format!(
                "missing element {}/{}",
                self.name,
                path.join("/")
            ))
        })
    }

    /// Like [`XmlNode::find_text`] but a missing element is a parse error.
    pub fn require_text(&self, path: &[&str]) -> Result<String> {
        self.require(path).map(|n| n.text.clone())
    }
}

fn local_name(e: &BytesStart<'_>) -> Result<String> {
    let name = e.local_name();
    std::str::from_utf8(name.as_ref())
        .map(|s| s.to_string())
        .map_err(|err| Error::parse("invalid element name").with_source(err))
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => return Err(Error::parse("document has more than one root element")),
    }
    Ok(())
}

fn push_text(stack: &mut [XmlNode], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(node) => {
            node.text.push_str(text);
            Ok(())
        }
        None if is_blank(text) => Ok(()),
        None => Err(Error::parse("text outside of root element")),
    }
}

fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_whitespace())
}
