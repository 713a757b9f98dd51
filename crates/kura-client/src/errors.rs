//! Error records surfaced to operation handlers.
//!
//! Request-level and per-property errors are values handed to the
//! caller's handler, never panics and never `Err` returns; only caller
//! misuse ([`PreconditionError`]) is reported through `Result`, before
//! any transport call is made.

use serde::Serialize;
use thiserror::Error;

/// A request-level failure: the operation as a whole did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestError {
    pub status: u16,
    pub path: String,
    pub summary: String,
    pub message: String,
}

/// A per-resource failure inside an otherwise successful 207 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyError {
    pub status: u16,
    pub path: String,
    pub message: String,
}

/// The error aggregate for one completed operation.
///
/// At most one request-level error, plus any number of property errors;
/// both empty means the operation succeeded outright.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Errors {
    pub request: Option<RequestError>,
    pub props: Vec<PropertyError>,
}

impl Errors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_request(&mut self, error: RequestError) {
        self.request = Some(error);
    }

    pub fn add_prop(&mut self, error: PropertyError) {
        self.props.push(error);
    }

    #[must_use]
    pub fn has_request(&self) -> bool {
        self.request.is_some()
    }

    #[must_use]
    pub fn has_props(&self) -> bool {
        !self.props.is_empty()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.has_request() && !self.has_props()
    }

    pub fn clear(&mut self) {
        self.request = None;
        self.props.clear();
    }
}

/// Caller misuse detected before any network traffic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("destination is not set")]
    MissingDestination,

    #[error("resource href is not set")]
    MissingHref,

    #[error("rename destination matches the current name: {0}")]
    IdenticalDestination(String),
}
