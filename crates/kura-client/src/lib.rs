//! WebDAV client: resource model, response interpretation and
//! operations over an abstract HTTP transport.
//!
//! The embedder supplies a [`Transport`]; everything else is
//! synchronous. A typical flow:
//!
//! ```no_run
//! use kura_client::{DavClient, DavFs, RequestOptions};
//! use kura_core::ClientConfig;
//! # use kura_client::{Transport, TransportRequest, CompletionCallback};
//! # struct MyTransport;
//! # impl Transport for MyTransport {
//! #     fn send(&self, _request: TransportRequest, _on_complete: CompletionCallback) {}
//! # }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new("https", "dav.example.com", None)?;
//! let fs = DavFs::new(DavClient::new(config, MyTransport));
//!
//! fs.list_dir(
//!     "/dav/docs/",
//!     |errors, listing| {
//!         if errors.is_empty() {
//!             if let Some(listing) = listing {
//!                 for child in &listing.children {
//!                     println!("{}", child.name);
//!                 }
//!             }
//!         }
//!     },
//!     &RequestOptions::new(),
//! );
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod client;
pub mod errors;
pub mod fs;
pub mod resource;
pub mod transport;

pub use classify::SuccessSet;
pub use client::DavClient;
pub use errors::{Errors, PreconditionError, PropertyError, RequestError};
pub use fs::{DavFs, parse_multistatus};
pub use resource::controller::ResourceController;
pub use resource::tree::ResourceSet;
pub use resource::{Resource, ResourceType};
pub use transport::{
    CompletionCallback, RequestOptions, Transport, TransportRequest, TransportResponse,
};
