//! The WebDAV resource data model.

pub mod controller;
pub mod tree;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use kura_core::util::path;
use kura_rfc::dav::ResponseEntry;

/// Marker for collection (directory-like) resources.
///
/// A plain resource carries no resourcetype at all, so the model keeps
/// an `Option<ResourceType>` rather than a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Collection,
}

/// One WebDAV resource as described by a multistatus response entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    /// Stable identity: SHA-256 of the percent-decoded href, hex-encoded.
    pub id: String,
    /// Last path segment.
    pub name: String,
    /// Percent-encoded request path as sent by the server.
    pub href: String,
    /// Non-empty path segments of `href`.
    pub pathlist: Vec<String>,
    /// Raw propstat status line, e.g. `HTTP/1.1 200 OK`.
    pub status: Option<String>,
    pub protocol: Option<String>,
    pub statuscode: u16,
    pub statustext: Option<String>,
    pub resourcetype: Option<ResourceType>,
    pub contenttype: Option<String>,
    pub contentlength: u64,
    pub creationdate: Option<DateTime<Utc>>,
    pub lastmodified: Option<DateTime<Utc>>,
    pub etag: Option<String>,
    pub executable: bool,
}

impl Resource {
    /// Creates a bare resource for a path, with identity fields filled
    /// in. Useful for operating on a resource that was never listed.
    #[must_use]
    pub fn for_path(href: impl Into<String>) -> Self {
        let href = href.into();
        let pathlist = path::split(&href);
        Self {
            id: stable_id(&href),
            name: pathlist.last().cloned().unwrap_or_default(),
            href,
            pathlist,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_collection(&self) -> bool {
        self.resourcetype == Some(ResourceType::Collection)
    }
}

impl From<ResponseEntry> for Resource {
    fn from(entry: ResponseEntry) -> Self {
        let ResponseEntry {
            href,
            pathlist,
            status,
            properties,
        } = entry;

        let (status_line, protocol, statuscode, statustext) = match status {
            Some(line) => (
                Some(line.to_string()),
                Some(line.protocol),
                line.code,
                Some(line.text),
            ),
            None => (None, None, 0, None),
        };

        Self {
            id: stable_id(&href),
            name: pathlist.last().cloned().unwrap_or_default(),
            href,
            pathlist,
            status: status_line,
            protocol,
            statuscode,
            statustext,
            resourcetype: properties
                .is_collection
                .then_some(ResourceType::Collection),
            contenttype: properties.contenttype,
            contentlength: properties.contentlength,
            creationdate: properties.creationdate,
            lastmodified: properties.lastmodified,
            etag: properties.etag,
            executable: properties.executable,
        }
    }
}

/// Hashes the percent-decoded href into a stable hex id.
fn stable_id(href: &str) -> String {
    let decoded = path::percent_decode(href);
    hex::encode(Sha256::digest(decoded.as_bytes()))
}
