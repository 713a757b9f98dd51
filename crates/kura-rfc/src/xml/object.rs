//! Generic element-to-object transformation.
//!
//! Converts an [`XmlNode`] tree into a nested [`serde_json::Value`]:
//! element children become keys derived from their prefixed tag name,
//! text content lands under a dedicated text key, and repeated siblings
//! collapse into arrays. The transform is purely structural; it knows
//! nothing about WebDAV.

use serde_json::{Map, Value};

use super::dom::{XmlChild, XmlNode};
use super::error::XmlResult;

/// Key derivation options for the object transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Replaces the first `:` of a qualified name, so `D:href` becomes
    /// `D$href` under the default.
    pub ns_separator: String,
    /// Key under which an element's text content is stored.
    pub text_node_name: String,
    /// Prefix distinguishing attribute keys from element keys.
    pub attribute_prefix: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            ns_separator: "$".to_string(),
            text_node_name: "$t".to_string(),
            attribute_prefix: String::new(),
        }
    }
}

impl ParseOptions {
    /// Derives the object key for an element tag name.
    #[must_use]
    pub fn node_key(&self, name: &str) -> String {
        name.replacen(':', &self.ns_separator, 1)
    }

    /// Derives the object key for an attribute name.
    #[must_use]
    pub fn attribute_key(&self, name: &str) -> String {
        format!("{}{}", self.attribute_prefix, self.node_key(name))
    }
}

/// The generic XML-to-object parser.
#[derive(Debug, Clone, Default)]
pub struct ObjectParser {
    options: ParseOptions,
}

impl ObjectParser {
    #[must_use]
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// ## Summary
    /// Transforms one element into its object representation.
    ///
    /// Attributes are written first, then children in document order.
    /// When a key is already present, the existing value is promoted to
    /// an array and the new value appended. Cardinality is inferred
    /// from repetition: a tag that appears once yields a scalar, one
    /// that appears twice yields a two-element array. An element with
    /// no attributes and no children yields an empty object.
    #[must_use]
    pub fn parse(&self, node: &XmlNode) -> Value {
        let mut obj = Map::new();

        for (name, value) in &node.attributes {
            merge(
                &mut obj,
                self.options.attribute_key(name),
                Value::String(value.clone()),
            );
        }

        for child in &node.children {
            let (key, value) = match child {
                XmlChild::Element(element) => {
                    (self.options.node_key(&element.name), self.parse(element))
                }
                XmlChild::Text(text) => (
                    self.options.text_node_name.clone(),
                    Value::String(text.clone()),
                ),
            };
            merge(&mut obj, key, value);
        }

        Value::Object(obj)
    }
}

/// Inserts under `key`, promoting an existing scalar to an array on
/// collision.
fn merge(obj: &mut Map<String, Value>, key: String, value: Value) {
    match obj.get_mut(&key) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            obj.insert(key, value);
        }
    }
}

/// ## Summary
/// Parses an XML document and transforms its root element.
///
/// The returned object is the root element's own mapping (its children
/// and attributes), not wrapped under the root's key.
///
/// ## Errors
/// Returns an error if the document cannot be parsed; the transform
/// itself is infallible.
pub fn parse_document(xml: &str, options: &ParseOptions) -> XmlResult<Value> {
    let root = XmlNode::parse(xml)?;
    Ok(ObjectParser::new(options.clone()).parse(&root))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(xml: &str) -> Value {
        parse_document(xml, &ParseOptions::default()).unwrap()
    }

    #[test]
    fn text_leaf_lands_under_text_key() {
        let obj = parse(r#"<D:multistatus><D:href>/dav/a/</D:href></D:multistatus>"#);
        assert_eq!(obj, json!({"D$href": {"$t": "/dav/a/"}}));
    }

    #[test]
    fn single_sibling_stays_scalar() {
        let obj = parse("<root><D:response><D:href>/a/</D:href></D:response></root>");
        assert!(obj["D$response"].is_object());
    }

    #[test]
    fn repeated_siblings_promote_to_array_in_document_order() {
        let obj = parse(
            "<root><item><v>1</v></item><item><v>2</v></item><item><v>3</v></item></root>",
        );
        let items = obj["item"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0]["v"]["$t"], "1");
        assert_eq!(items[2]["v"]["$t"], "3");
    }

    #[test]
    fn empty_element_is_empty_object() {
        let obj = parse("<root><D:collection/></root>");
        assert_eq!(obj["D$collection"], json!({}));
    }

    #[test]
    fn attributes_use_prefix_and_separator() {
        let options = ParseOptions {
            attribute_prefix: "@".to_string(),
            ..ParseOptions::default()
        };
        let obj =
            parse_document(r#"<root xmlns:D="DAV:"><a D:k="v"/></root>"#, &options).unwrap();
        assert_eq!(obj["@xmlns$D"], "DAV:");
        assert_eq!(obj["a"]["@D$k"], "v");
    }

    #[test]
    fn only_first_colon_is_replaced() {
        let options = ParseOptions::default();
        assert_eq!(options.node_key("D:href"), "D$href");
        assert_eq!(options.node_key("a:b:c"), "a$b:c");
        assert_eq!(options.node_key("plain"), "plain");
    }

    #[test]
    fn custom_separator_and_text_key() {
        let options = ParseOptions {
            ns_separator: "_".to_string(),
            text_node_name: "#text".to_string(),
            attribute_prefix: String::new(),
        };
        let obj = parse_document("<r><D:x>hi</D:x></r>", &options).unwrap();
        assert_eq!(obj["D_x"]["#text"], "hi");
    }
}
