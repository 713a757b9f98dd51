//! Core configuration and shared utilities for the kura WebDAV client.

pub mod config;
pub mod error;
pub mod util;

pub use config::ClientConfig;
pub use error::{CoreError, CoreResult};
