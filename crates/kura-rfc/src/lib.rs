//! WebDAV wire-format handling.
//!
//! `xml` is the protocol-agnostic layer: a small owned DOM built with
//! `quick-xml` and the generic element-to-object transformation. `dav`
//! interprets the result as WebDAV: multistatus annotation, the known
//! property table, status lines and outgoing request bodies.

pub mod dav;
pub mod xml;
