//! Outgoing WebDAV request bodies and header vocabulary.

use std::fmt;

/// PROPFIND body requesting every property.
pub const PROPFIND_ALLPROP: &str =
    r#"<?xml version="1.0" encoding="UTF-8"?><D:propfind xmlns:D="DAV:"><D:allprop /></D:propfind>"#;

/// `Depth` header value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Depth {
    /// The resource itself only.
    #[default]
    Zero,
    /// The resource and its immediate children.
    One,
    /// The resource and all descendants.
    Infinity,
}

impl Depth {
    /// Returns the header value string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::One => "1",
            Self::Infinity => "infinity",
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `D:lockscope` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockScope {
    #[default]
    Exclusive,
    Shared,
}

impl LockScope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exclusive => "exclusive",
            Self::Shared => "shared",
        }
    }
}

/// `D:locktype` values. RFC 4918 defines only `write`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockType {
    #[default]
    Write,
}

impl LockType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Write => "write",
        }
    }
}

/// Builds a `D:lockinfo` request body for LOCK.
///
/// The scope and type names land inside `D:`-prefixed empty elements;
/// the owner element is left empty, as this client does not identify
/// lock owners.
#[must_use]
pub fn lockinfo(scope: LockScope, ty: LockType) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<D:lockinfo xmlns:D="DAV:">"#,
            "<D:lockscope><D:{scope} /></D:lockscope>",
            "<D:locktype><D:{ty} /></D:locktype>",
            "<D:owner></D:owner>",
            "</D:lockinfo>"
        ),
        scope = scope.as_str(),
        ty = ty.as_str(),
    )
}
