//! HTTP status classification and request error building.

use http::StatusCode;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::errors::{Errors, RequestError};
use crate::transport::{CompletionCallback, TransportResponse};

/// Which status codes count as success for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessSet {
    /// Content reads: 200 only.
    Read,
    /// Mutating operations: 200, 201, 204.
    Mutation,
    /// Listings: exactly 207 Multi-Status.
    Listing,
}

impl SuccessSet {
    #[must_use]
    pub fn contains(self, status: StatusCode) -> bool {
        match self {
            Self::Read => status == StatusCode::OK,
            Self::Mutation => matches!(
                status,
                StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT
            ),
            Self::Listing => status == StatusCode::MULTI_STATUS,
        }
    }
}

/// ## Summary
/// Classifies a completed response against a success set.
///
/// A status outside the set becomes the request-level error; per-entry
/// statuses inside a 207 body never count against the request (they are
/// collected separately while the body is interpreted).
#[must_use]
pub fn classify(expect: SuccessSet, status: StatusCode, body: &str, path: &str) -> Errors {
    let mut errors = Errors::new();
    if !expect.contains(status) {
        errors.set_request(build_request_error(status, body, path));
    }
    errors
}

/// ## Summary
/// Builds a request-level error record.
///
/// An HTML error page contributes its `<title>` as the summary and its
/// first `<p>` as the message; anything else synthesizes both from the
/// standard reason phrase.
#[must_use]
pub fn build_request_error(status: StatusCode, body: &str, path: &str) -> RequestError {
    let (summary, message) = match extract_html_error(body) {
        Some(parts) => parts,
        None => {
            let phrase = format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            );
            (phrase.clone(), phrase)
        }
    };
    RequestError {
        status: status.as_u16(),
        path: path.to_string(),
        summary,
        message,
    }
}

/// Wraps a mutation handler into a transport completion callback.
///
/// On 201 Created the `Location` header is passed through as the second
/// handler argument.
pub fn mutation_completion<H>(path: String, handler: H) -> CompletionCallback
where
    H: FnOnce(Errors, Option<String>) + Send + 'static,
{
    Box::new(move |response: TransportResponse| {
        let errors = classify(SuccessSet::Mutation, response.status, &response.body, &path);
        let location = if response.status == StatusCode::CREATED {
            response
                .headers
                .get(http::header::LOCATION)
                .and_then(|value| value.to_str().ok())
                .map(String::from)
        } else {
            None
        };
        handler(errors, location);
    })
}

/// Pulls `<title>` and the first `<p>` out of an HTML error body.
///
/// Server error pages are rarely well-formed XML, so the scan is
/// lenient: tag-name bookkeeping is off and any syntax error simply
/// ends the scan with whatever was collected so far.
fn extract_html_error(body: &str) -> Option<(String, String)> {
    if body.is_empty() {
        return None;
    }

    let mut reader = Reader::from_reader(body.as_bytes());
    let config = reader.config_mut();
    config.trim_text(true);
    config.check_end_names = false;

    let mut title: Option<String> = None;
    let mut paragraph: Option<String> = None;
    let mut capture: Option<&'static str> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                let name = String::from_utf8_lossy(name.as_ref()).to_ascii_lowercase();
                if name == "title" && title.is_none() {
                    capture = Some("title");
                } else if name == "p" && paragraph.is_none() {
                    capture = Some("p");
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some(target) = capture {
                    let text = String::from_utf8_lossy(e.as_ref()).trim().to_string();
                    if !text.is_empty() {
                        match target {
                            "title" => title = Some(text),
                            _ => paragraph = Some(text),
                        }
                    }
                }
            }
            Ok(Event::End(_)) => {
                capture = None;
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();

        if title.is_some() && paragraph.is_some() {
            break;
        }
    }

    let title = title?;
    let message = paragraph.unwrap_or_else(|| title.clone());
    Some((title, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_body_contributes_title_and_paragraph() {
        let error = build_request_error(
            StatusCode::NOT_FOUND,
            "<html><title>Not Found</title><p>The resource could not be found.</p></html>",
            "/dav/x",
        );
        assert_eq!(error.status, 404);
        assert_eq!(error.path, "/dav/x");
        assert_eq!(error.summary, "Not Found");
        assert_eq!(error.message, "The resource could not be found.");
    }

    #[test]
    fn empty_body_synthesizes_reason_phrase() {
        let error = build_request_error(StatusCode::FORBIDDEN, "", "/dav/");
        assert_eq!(error.summary, "403 Forbidden");
        assert_eq!(error.message, "403 Forbidden");
    }

    #[test]
    fn non_html_body_synthesizes_reason_phrase() {
        let error = build_request_error(StatusCode::BAD_GATEWAY, "upstream said no", "/dav/");
        assert_eq!(error.summary, "502 Bad Gateway");
    }

    #[test]
    fn title_without_paragraph_reuses_title() {
        let error = build_request_error(
            StatusCode::NOT_FOUND,
            "<html><title>Gone</title></html>",
            "/dav/x",
        );
        assert_eq!(error.summary, "Gone");
        assert_eq!(error.message, "Gone");
    }

    #[test]
    fn mutation_set_accepts_the_three_codes() {
        for code in [StatusCode::OK, StatusCode::CREATED, StatusCode::NO_CONTENT] {
            assert!(classify(SuccessSet::Mutation, code, "", "/p").is_empty());
        }
        assert!(
            classify(SuccessSet::Mutation, StatusCode::MULTI_STATUS, "", "/p").has_request()
        );
    }

    #[test]
    fn listing_set_accepts_only_207() {
        assert!(classify(SuccessSet::Listing, StatusCode::MULTI_STATUS, "", "/p").is_empty());
        assert!(classify(SuccessSet::Listing, StatusCode::OK, "", "/p").has_request());
    }

    #[test]
    fn read_set_accepts_only_200() {
        assert!(classify(SuccessSet::Read, StatusCode::OK, "", "/p").is_empty());
        assert!(classify(SuccessSet::Read, StatusCode::NO_CONTENT, "", "/p").has_request());
    }
}
