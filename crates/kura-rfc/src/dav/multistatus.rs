//! Multistatus response annotation.
//!
//! Takes the generic object form of a `D:multistatus` document and
//! derives the per-response semantics: the response list itself, hrefs,
//! path segment lists, status lines and typed properties.

use serde_json::Value;

use kura_core::util::path;

use crate::xml::ParseOptions;

use super::property::{self, PropertySet};
use super::status::{DEFAULT_NOT_FOUND, StatusLine};

/// One annotated `D:response` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEntry {
    /// Percent-encoded request path as sent by the server.
    pub href: String,
    /// Non-empty path segments of `href`; `["/"]` for the root.
    pub pathlist: Vec<String>,
    /// Propstat status line; `None` when the entry carried no propstat
    /// at all.
    pub status: Option<StatusLine>,
    /// Known properties of the entry.
    pub properties: PropertySet,
}

/// ## Summary
/// Normalizes the `D$response` key to a sequence.
///
/// The generic parser infers cardinality from repetition, so a
/// multistatus with exactly one response yields a scalar object where
/// one with several yields an array. This function is the single place
/// that ambiguity is resolved: absent becomes empty, a scalar becomes a
/// one-element sequence, an array is passed through.
#[must_use]
pub fn normalize_responses<'a>(doc: &'a Value, options: &ParseOptions) -> Vec<&'a Value> {
    let key = options.node_key("D:response");
    match doc.get(&key) {
        None => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single) => vec![single],
    }
}

/// ## Summary
/// Annotates every response entry of a parsed multistatus document.
///
/// Entries follow the tolerance rules for partial responses: a missing
/// propstat yields a minimal entry (href and pathlist only), a propstat
/// without a status line defaults to `HTTP/1.1 404 Not Found`, and a
/// missing prop block yields empty properties. An entry without an href
/// has no identity to attach anything to and is skipped with a warning.
#[must_use]
pub fn annotate(doc: &Value, options: &ParseOptions) -> Vec<ResponseEntry> {
    let responses = normalize_responses(doc, options);
    let mut entries = Vec::with_capacity(responses.len());

    for response in responses {
        let Some(href) = response
            .get(&options.node_key("D:href"))
            .and_then(|h| property::text_of(h, options))
        else {
            tracing::warn!("Skipping multistatus response without an href");
            continue;
        };

        let pathlist = path::split(href);

        let propstat = response
            .get(&options.node_key("D:propstat"))
            .map(first_of);

        let status = propstat.map(|ps| {
            let line = ps
                .get(&options.node_key("D:status"))
                .and_then(|s| property::text_of(s, options))
                .unwrap_or(DEFAULT_NOT_FOUND);
            StatusLine::parse(line)
        });

        let properties = propstat
            .and_then(|ps| ps.get(&options.node_key("D:prop")))
            .map(|prop| PropertySet::extract(prop, options))
            .unwrap_or_default();

        entries.push(ResponseEntry {
            href: href.to_string(),
            pathlist,
            status,
            properties,
        });
    }

    tracing::debug!(count = entries.len(), "Annotated multistatus responses");
    entries
}

/// Collapses a possibly-repeated value to its first occurrence.
///
/// A response can legally carry several propstat blocks (one per status
/// code); only the first carries the found properties in the servers
/// this client targets.
fn first_of(value: &Value) -> &Value {
    match value {
        Value::Array(items) => items.first().unwrap_or(value),
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn options() -> ParseOptions {
        ParseOptions::default()
    }

    #[test_log::test]
    fn single_response_becomes_one_element_sequence() {
        let doc = json!({"D$response": {"D$href": {"$t": "/dav/"}}});
        assert_eq!(normalize_responses(&doc, &options()).len(), 1);
        let entries = annotate(&doc, &options());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].href, "/dav/");
    }

    #[test_log::test]
    fn missing_response_key_is_empty() {
        let doc = json!({"xmlns$D": "DAV:"});
        assert!(normalize_responses(&doc, &options()).is_empty());
        assert!(annotate(&doc, &options()).is_empty());
    }

    #[test_log::test]
    fn array_of_responses_passes_through_in_order() {
        let doc = json!({"D$response": [
            {"D$href": {"$t": "/dav/"}},
            {"D$href": {"$t": "/dav/a.txt"}},
        ]});
        let entries = annotate(&doc, &options());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].href, "/dav/a.txt");
    }

    #[test_log::test]
    fn pathlist_never_empty_and_has_no_empty_segments() {
        let doc = json!({"D$response": [
            {"D$href": {"$t": "/"}},
            {"D$href": {"$t": "//dav//deep///file.txt"}},
        ]});
        let entries = annotate(&doc, &options());
        assert_eq!(entries[0].pathlist, vec!["/"]);
        assert_eq!(entries[1].pathlist, vec!["dav", "deep", "file.txt"]);
    }

    #[test_log::test]
    fn missing_propstat_yields_minimal_entry() {
        let doc = json!({"D$response": {"D$href": {"$t": "/dav/x"}}});
        let entry = &annotate(&doc, &options())[0];
        assert!(entry.status.is_none());
        assert_eq!(entry.properties, PropertySet::default());
    }

    #[test_log::test]
    fn missing_status_defaults_to_not_found() {
        let doc = json!({"D$response": {
            "D$href": {"$t": "/dav/x"},
            "D$propstat": {"D$prop": {}},
        }});
        let entry = &annotate(&doc, &options())[0];
        let status = entry.status.as_ref().unwrap();
        assert_eq!(status.code, 404);
        assert_eq!(status.protocol, "HTTP/1.1");
        assert_eq!(status.text, "Not Found");
    }

    #[test_log::test]
    fn full_entry_is_annotated() {
        let doc = json!({"D$response": {
            "D$href": {"$t": "/dav/docs/"},
            "D$propstat": {
                "D$status": {"$t": "HTTP/1.1 200 OK"},
                "D$prop": {
                    "lp1$resourcetype": {"D$collection": {}},
                    "D$getcontenttype": {"$t": "httpd/unix-directory"},
                },
            },
        }});
        let entry = &annotate(&doc, &options())[0];
        assert_eq!(entry.status.as_ref().unwrap().code, 200);
        assert!(entry.properties.is_collection);
        assert_eq!(
            entry.properties.contenttype.as_deref(),
            Some("httpd/unix-directory")
        );
    }

    #[test_log::test]
    fn hrefless_entry_is_skipped() {
        let doc = json!({"D$response": [
            {"D$propstat": {}},
            {"D$href": {"$t": "/dav/kept"}},
        ]});
        let entries = annotate(&doc, &options());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].href, "/dav/kept");
    }

    #[test_log::test]
    fn repeated_propstat_uses_first_block() {
        let doc = json!({"D$response": {
            "D$href": {"$t": "/dav/x"},
            "D$propstat": [
                {"D$status": {"$t": "HTTP/1.1 200 OK"}, "D$prop": {"D$getetag": {"$t": "\"e1\""}}},
                {"D$status": {"$t": "HTTP/1.1 404 Not Found"}},
            ],
        }});
        let entry = &annotate(&doc, &options())[0];
        assert_eq!(entry.status.as_ref().unwrap().code, 200);
        assert_eq!(entry.properties.etag.as_deref(), Some("\"e1\""));
    }
}
