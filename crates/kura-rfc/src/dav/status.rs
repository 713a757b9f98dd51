//! `DAV:status` line parsing.

use std::fmt;

/// Default status line for a propstat that carries none.
pub const DEFAULT_NOT_FOUND: &str = "HTTP/1.1 404 Not Found";

/// A parsed WebDAV status line, e.g. `HTTP/1.1 200 OK`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub protocol: String,
    pub code: u16,
    pub text: String,
}

impl StatusLine {
    /// Parses a status line by splitting on the first two spaces.
    ///
    /// Missing pieces degrade to an empty protocol/text and code 0
    /// rather than failing; a multistatus entry with a mangled status
    /// line is still an entry.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let mut chunks = line.splitn(3, ' ');
        let protocol = chunks.next().unwrap_or_default().to_string();
        let code = chunks.next().and_then(|c| c.parse().ok()).unwrap_or(0);
        let text = chunks.next().unwrap_or_default().to_string();
        Self {
            protocol,
            code,
            text,
        }
    }

    /// Returns whether the code is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.protocol, self.code, self.text)
    }
}
