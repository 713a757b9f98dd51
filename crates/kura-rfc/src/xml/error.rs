//! XML layer error types.

use thiserror::Error;

/// Result type for XML parsing.
pub type XmlResult<T> = std::result::Result<T, XmlError>;

/// An error raised while turning bytes into a document tree.
///
/// The generic object transformation itself cannot fail; everything here
/// belongs to the syntactic stage that precedes it.
#[derive(Error, Debug)]
pub enum XmlError {
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("XML encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    #[error("invalid UTF-8 in XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("unexpected closing tag")]
    UnexpectedClose,

    #[error("document has no root element")]
    Empty,
}
