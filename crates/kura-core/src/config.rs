//! Client connection settings.

use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

/// Connection settings for one WebDAV site.
///
/// An explicit value handed to the client at construction time; there is
/// no global configuration registry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    pub scheme: String,
    pub domain: String,
    pub port: Option<u16>,
}

impl ClientConfig {
    /// ## Summary
    /// Creates a validated configuration for a WebDAV site.
    ///
    /// ## Errors
    /// Returns an error if `scheme` or `domain` is empty.
    pub fn new(
        scheme: impl Into<String>,
        domain: impl Into<String>,
        port: Option<u16>,
    ) -> CoreResult<Self> {
        let scheme = scheme.into();
        let domain = domain.into();
        if scheme.is_empty() {
            return Err(CoreError::ConfigError("scheme must not be empty".into()));
        }
        if domain.is_empty() {
            return Err(CoreError::ConfigError("domain must not be empty".into()));
        }
        tracing::debug!(%scheme, %domain, ?port, "Client configuration created");
        Ok(Self {
            scheme,
            domain,
            port,
        })
    }

    /// Returns the site origin, e.g. `http://dav.example.com:8080`.
    #[must_use]
    pub fn origin(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.scheme, self.domain, port),
            None => format!("{}://{}", self.scheme, self.domain),
        }
    }

    /// Returns the absolute URL for a server path.
    ///
    /// A missing leading slash on `path` is supplied.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.origin(), path)
        } else {
            format!("{}/{}", self.origin(), path)
        }
    }
}
