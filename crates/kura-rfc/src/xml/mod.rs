//! Namespace-aware XML to object conversion.

mod dom;
mod error;
mod object;

pub use dom::{XmlChild, XmlNode};
pub use error::{XmlError, XmlResult};
pub use object::{ObjectParser, ParseOptions, parse_document};
