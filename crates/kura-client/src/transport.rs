//! The transport boundary.
//!
//! The core never performs I/O itself: every operation builds one
//! [`TransportRequest`] and hands it to the embedder's [`Transport`]
//! together with a completion callback. The transport must invoke the
//! callback exactly once per call, on success and on failure alike,
//! signaling network failure as a synthetic non-2xx status. Retries,
//! timeouts and cancellation all live behind this trait.

use http::{HeaderMap, Method, StatusCode};
use uuid::Uuid;

/// One outgoing HTTP request.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// Correlation id, fresh per dispatch.
    pub id: Uuid,
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// The completed response for one request.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
    pub headers: HeaderMap,
}

impl TransportResponse {
    /// Convenience constructor for transports and tests.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            status,
            body: body.into(),
            headers,
        }
    }
}

/// Completion callback invoked exactly once per dispatched request.
pub type CompletionCallback = Box<dyn FnOnce(TransportResponse) + Send>;

/// An HTTP transport supplied by the embedder.
pub trait Transport {
    /// Dispatches a request. Implementations must call `on_complete`
    /// exactly once.
    fn send(&self, request: TransportRequest, on_complete: CompletionCallback);
}

/// Per-call request overrides.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra request headers, applied after the operation's own.
    pub headers: Vec<(String, String)>,
    /// Query parameters appended to the request URL.
    pub query: Vec<(String, String)>,
    /// Sets the `Overwrite` header of COPY/MOVE to `T` instead of `F`.
    pub overwrite: bool,
}

impl RequestOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }
}
