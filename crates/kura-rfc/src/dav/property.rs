//! The enumerated WebDAV property table.
//!
//! Servers disagree on the namespace prefix they emit for live
//! properties: Apache mod_dav uses `lp1:`/`lp2:`, others stay on the
//! `D:` prefix. Every known property is therefore looked up under each
//! observed variant. Unknown properties are ignored.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::xml::ParseOptions;

/// Namespace prefixes under which live properties have been observed.
pub const NS_PREFIX_VARIANTS: [&str; 3] = ["D", "lp1", "lp2"];

/// The typed property fields carried by one multistatus entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
    pub contenttype: Option<String>,
    pub contentlength: u64,
    pub is_collection: bool,
    pub creationdate: Option<DateTime<Utc>>,
    pub lastmodified: Option<DateTime<Utc>>,
    pub etag: Option<String>,
    pub executable: bool,
}

impl PropertySet {
    /// ## Summary
    /// Resolves the known properties out of a parsed `D:prop` object.
    ///
    /// `getcontentlength` values that fail to parse fall back to 0;
    /// `executable` follows mod_dav's `"T"` convention; `resourcetype`
    /// counts as a collection when it carries a `collection` child under
    /// any known prefix.
    #[must_use]
    pub fn extract(prop: &Value, options: &ParseOptions) -> Self {
        let mut set = Self::default();

        if let Some(value) = text_property(prop, "getcontenttype", options) {
            set.contenttype = Some(value.to_string());
        }
        if let Some(value) = text_property(prop, "getcontentlength", options) {
            set.contentlength = value.parse().unwrap_or(0);
        }
        if let Some(resourcetype) = lookup(prop, "resourcetype", options) {
            set.is_collection = lookup(resourcetype, "collection", options).is_some();
        }
        if let Some(value) = text_property(prop, "creationdate", options) {
            set.creationdate = parse_datetime(value);
        }
        if let Some(value) = text_property(prop, "getlastmodified", options) {
            set.lastmodified = parse_datetime(value);
        }
        if let Some(value) = text_property(prop, "getetag", options) {
            set.etag = Some(value.to_string());
        }
        if let Some(value) = text_property(prop, "executable", options) {
            set.executable = value == "T";
        }

        set
    }
}

/// Finds a property value under any known namespace prefix variant.
pub(crate) fn lookup<'a>(
    obj: &'a Value,
    local_name: &str,
    options: &ParseOptions,
) -> Option<&'a Value> {
    let map = obj.as_object()?;
    NS_PREFIX_VARIANTS
        .iter()
        .find_map(|prefix| map.get(&format!("{prefix}{}{local_name}", options.ns_separator)))
}

/// Returns a property's text content, if present and non-null.
pub(crate) fn text_of<'a>(value: &'a Value, options: &ParseOptions) -> Option<&'a str> {
    value.as_object()?.get(&options.text_node_name)?.as_str()
}

fn text_property<'a>(prop: &'a Value, local_name: &str, options: &ParseOptions) -> Option<&'a str> {
    lookup(prop, local_name, options).and_then(|value| text_of(value, options))
}

/// Parses a property timestamp.
///
/// `creationdate` is RFC 3339 and `getlastmodified` is an HTTP-date
/// (RFC 2822); each format is accepted for either field.
fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_rfc2822(value))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
