//! WebDAV interpretation of generically parsed XML.

pub mod build;
pub mod multistatus;
pub mod property;
pub mod status;

pub use build::{Depth, LockScope, LockType, PROPFIND_ALLPROP, lockinfo};
pub use multistatus::{ResponseEntry, annotate, normalize_responses};
pub use property::PropertySet;
pub use status::StatusLine;
