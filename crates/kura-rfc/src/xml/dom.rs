//! A minimal owned XML document tree.
//!
//! Tag and attribute names keep their raw namespace prefix (`D:href`,
//! `lp1:getcontentlength`); no URI resolution happens here, because the
//! object layer keys off the prefixed names exactly as servers sent them.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::error::{XmlError, XmlResult};

/// One XML element: prefixed tag name, attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    /// Raw qualified tag name, e.g. `D:response`.
    pub name: String,
    /// Attributes in document order, `xmlns` declarations included.
    pub attributes: Vec<(String, String)>,
    /// Element and text children in document order.
    pub children: Vec<XmlChild>,
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlChild {
    Element(XmlNode),
    Text(String),
}

impl XmlNode {
    /// ## Summary
    /// Parses an XML document into its root element.
    ///
    /// Whitespace-only text runs between elements are dropped, and
    /// adjacent text runs (text followed by CDATA, for instance) are
    /// merged into a single text child.
    ///
    /// ## Errors
    /// Returns an error for malformed XML or a document without a root
    /// element.
    #[tracing::instrument(skip(xml), fields(xml_len = xml.len()))]
    pub fn parse(xml: &str) -> XmlResult<Self> {
        let mut reader = Reader::from_reader(xml.as_bytes());
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    stack.push(node_from_start(e)?);
                }
                Ok(Event::Empty(ref e)) => {
                    let node = node_from_start(e)?;
                    attach(&mut stack, &mut root, node);
                }
                Ok(Event::Text(ref e)) => {
                    let decoded = reader.decoder().decode(e.as_ref())?;
                    push_text(&mut stack, &unescape_entities(&decoded));
                }
                Ok(Event::CData(ref e)) => {
                    let text = std::str::from_utf8(e.as_ref())?.to_owned();
                    push_text(&mut stack, &text);
                }
                Ok(Event::End(_)) => {
                    let node = stack.pop().ok_or(XmlError::UnexpectedClose)?;
                    attach(&mut stack, &mut root, node);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(e.into()),
                _ => {}
            }
            buf.clear();
        }

        root.ok_or(XmlError::Empty)
    }

    /// Returns the concatenated text content of this element's direct
    /// text children.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            if let XmlChild::Text(t) = child {
                out.push_str(t);
            }
        }
        out
    }
}

fn node_from_start(e: &BytesStart<'_>) -> XmlResult<XmlNode> {
    let name = std::str::from_utf8(e.name().as_ref())?.to_owned();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_owned();
        let value = std::str::from_utf8(&attr.value)?;
        attributes.push((key, unescape_entities(value)));
    }
    Ok(XmlNode {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlChild::Element(node));
    } else if root.is_none() {
        *root = Some(node);
    } else {
        tracing::warn!(tag = %node.name, "Ignoring second top-level element");
    }
}

fn push_text(stack: &mut [XmlNode], text: &str) {
    if text.is_empty() {
        return;
    }
    let Some(parent) = stack.last_mut() else {
        return;
    };
    if let Some(XmlChild::Text(existing)) = parent.children.last_mut() {
        existing.push_str(text);
    } else {
        parent.children.push(XmlChild::Text(text.to_owned()));
    }
}

/// Resolves the five predefined XML entities in attribute values.
///
/// `&amp;` must go last so that already-escaped sequences such as
/// `&amp;lt;` come out as the literal `&lt;`.
fn unescape_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_owned();
    }
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
