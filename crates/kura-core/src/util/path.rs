//! Path string utilities for WebDAV request paths.

/// Splits a path into its non-empty segments.
///
/// Consecutive, leading and trailing slashes collapse away. An input with
/// no segments at all (`""`, `"/"`, `"//"`) yields the single root
/// segment `"/"` so that callers always have a last segment to work with.
#[must_use]
pub fn split(path: &str) -> Vec<String> {
    let segments: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if segments.is_empty() {
        vec!["/".to_string()]
    } else {
        segments
    }
}

/// Removes a single trailing slash, keeping a bare `"/"` intact.
#[must_use]
pub fn remove_trailing_slash(path: &str) -> &str {
    if path.len() > 1 && path.ends_with('/') {
        &path[..path.len() - 1]
    } else {
        path
    }
}

/// Ensures the path ends with a slash.
#[must_use]
pub fn add_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Returns the parent collection path, with its trailing slash.
///
/// `"/dav/a/b.txt"` and `"/dav/a/b/"` both yield `"/dav/a/"`; the root
/// has no parent.
#[must_use]
pub fn parent(path: &str) -> Option<String> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    trimmed.rfind('/').map(|i| format!("{}/", &trimmed[..i]))
}

/// Percent-decodes a path, also mapping `+` to a space.
///
/// Invalid escape sequences are kept verbatim rather than rejected; a
/// server-supplied href is decoded on a best-effort basis.
#[must_use]
pub fn percent_decode(s: &str) -> String {
    let mut bytes = Vec::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '%' {
            let hex: String = chars.by_ref().take(2).collect();
            if hex.len() == 2 && let Ok(byte) = u8::from_str_radix(&hex, 16) {
                bytes.push(byte);
                continue;
            }
            bytes.push(b'%');
            bytes.extend_from_slice(hex.as_bytes());
        } else if c == '+' {
            bytes.push(b' ');
        } else {
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_filters_empty_segments() {
        assert_eq!(split("/dav/foo/bar.txt"), vec!["dav", "foo", "bar.txt"]);
        assert_eq!(split("//dav///foo/"), vec!["dav", "foo"]);
    }

    #[test]
    fn split_of_root_is_root() {
        assert_eq!(split("/"), vec!["/"]);
        assert_eq!(split(""), vec!["/"]);
    }

    #[test]
    fn trailing_slash_round_trip() {
        assert_eq!(remove_trailing_slash("/dav/foo/"), "/dav/foo");
        assert_eq!(remove_trailing_slash("/dav/foo"), "/dav/foo");
        assert_eq!(remove_trailing_slash("/"), "/");
        assert_eq!(add_trailing_slash("/dav/foo"), "/dav/foo/");
        assert_eq!(add_trailing_slash("/dav/foo/"), "/dav/foo/");
    }

    #[test]
    fn parent_of_file_and_collection() {
        assert_eq!(parent("/dav/a/b.txt").as_deref(), Some("/dav/a/"));
        assert_eq!(parent("/dav/a/b/").as_deref(), Some("/dav/a/"));
        assert_eq!(parent("/"), None);
    }

    #[test]
    fn percent_decode_basics() {
        assert_eq!(percent_decode("/dav/hello%20world.txt"), "/dav/hello world.txt");
        assert_eq!(percent_decode("/dav/a+b"), "/dav/a b");
        assert_eq!(percent_decode("/dav/%E8%94%B5/"), "/dav/蔵/");
        // Broken escapes survive untouched.
        assert_eq!(percent_decode("/dav/100%"), "/dav/100%");
        assert_eq!(percent_decode("/dav/%zz"), "/dav/%zz");
    }
}
