//! Per-resource operations.
//!
//! A controller composes a [`Resource`] with a caller-supplied
//! destination and a client handle; it never copies model fields onto
//! itself. All failure of the "caller forgot something" kind is
//! reported synchronously, before any transport call.

use kura_core::util::path;

use super::Resource;
use crate::classify::mutation_completion;
use crate::client::DavClient;
use crate::errors::{Errors, PreconditionError};
use crate::transport::{RequestOptions, Transport};

/// Wraps one resource with copy/move/rename/remove/mkdir operations.
pub struct ResourceController<'a, T: Transport> {
    resource: Resource,
    destination: Option<String>,
    client: &'a DavClient<T>,
}

impl<'a, T: Transport> ResourceController<'a, T> {
    #[must_use]
    pub fn new(resource: Resource, client: &'a DavClient<T>) -> Self {
        Self {
            resource,
            destination: None,
            client,
        }
    }

    #[must_use]
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    #[must_use]
    pub fn into_resource(self) -> Resource {
        self.resource
    }

    /// Sets the target path for a subsequent copy, move or rename.
    pub fn set_destination(&mut self, destination: impl Into<String>) {
        self.destination = Some(destination.into());
    }

    #[must_use]
    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    /// ## Summary
    /// Infers the full destination path for copy/move.
    ///
    /// The caller may set either a target directory (`/bar/`) to keep
    /// the source's name, or a full target path (`/bar/renamed.txt`).
    /// A destination ending in `/` is a directory target, as is any
    /// destination for a collection whose last segment differs from the
    /// source's; in both cases the source's last segment is appended.
    /// Collection destinations always end in `/`, and the result is
    /// re-joined with a leading `/`.
    ///
    /// ## Errors
    /// Fails when no destination has been set.
    pub fn build_new_destination(&self) -> Result<String, PreconditionError> {
        let destination = self
            .destination
            .as_deref()
            .filter(|d| !d.is_empty())
            .ok_or(PreconditionError::MissingDestination)?;

        let source_last = self.last_segment();
        let mut segments = path::split(destination);
        if segments == ["/"] {
            segments.clear();
        }

        let is_collection = self.resource.is_collection();
        let differs = segments.last() != Some(&source_last);
        let directory_target = destination.ends_with('/') || (is_collection && differs);
        if directory_target && differs {
            segments.push(source_last);
        }

        let joined = format!("/{}", segments.join("/"));
        if is_collection {
            Ok(path::add_trailing_slash(&joined))
        } else {
            Ok(joined)
        }
    }

    /// ## Summary
    /// Copies the resource to the inferred destination (COPY).
    ///
    /// ## Errors
    /// Fails fast when no destination has been set.
    pub fn copy<H>(&self, handler: H, options: &RequestOptions) -> Result<(), PreconditionError>
    where
        H: FnOnce(Errors, Option<String>) + Send + 'static,
    {
        let target = self.build_new_destination()?;
        self.client.copy(
            &self.resource.href,
            &target,
            options,
            mutation_completion(self.resource.href.clone(), handler),
        );
        Ok(())
    }

    /// ## Summary
    /// Moves the resource to the inferred destination (MOVE).
    ///
    /// ## Errors
    /// Fails fast when no destination has been set.
    pub fn r#move<H>(&self, handler: H, options: &RequestOptions) -> Result<(), PreconditionError>
    where
        H: FnOnce(Errors, Option<String>) + Send + 'static,
    {
        let target = self.build_new_destination()?;
        self.client.r#move(
            &self.resource.href,
            &target,
            options,
            mutation_completion(self.resource.href.clone(), handler),
        );
        Ok(())
    }

    /// ## Summary
    /// Renames the resource in place (a MOVE whose target keeps the
    /// parent collection).
    ///
    /// The destination may be a bare new name, resolved against the
    /// source's parent, or a full target path.
    ///
    /// ## Errors
    /// Fails fast when no destination has been set, or when the new
    /// last segment equals the current one: a no-op rename is caller
    /// error, not a request worth sending.
    pub fn rename<H>(&self, handler: H, options: &RequestOptions) -> Result<(), PreconditionError>
    where
        H: FnOnce(Errors, Option<String>) + Send + 'static,
    {
        let destination = self
            .destination
            .as_deref()
            .filter(|d| !d.is_empty())
            .ok_or(PreconditionError::MissingDestination)?;

        let full = if destination.contains('/') {
            destination.to_string()
        } else {
            let parent = path::parent(&self.resource.href).unwrap_or_else(|| "/".to_string());
            format!("{parent}{destination}")
        };

        let new_last = path::split(&full)
            .last()
            .cloned()
            .unwrap_or_else(|| "/".to_string());
        if new_last == self.last_segment() {
            return Err(PreconditionError::IdenticalDestination(new_last));
        }

        let target = if self.resource.is_collection() {
            path::add_trailing_slash(&full)
        } else {
            full
        };
        self.client.r#move(
            &self.resource.href,
            &target,
            options,
            mutation_completion(self.resource.href.clone(), handler),
        );
        Ok(())
    }

    /// ## Summary
    /// Deletes the resource (DELETE).
    ///
    /// ## Errors
    /// Fails fast when the resource has no href.
    pub fn remove<H>(&self, handler: H, options: &RequestOptions) -> Result<(), PreconditionError>
    where
        H: FnOnce(Errors, Option<String>) + Send + 'static,
    {
        let href = self.require_href()?;
        self.client.delete(
            href,
            options,
            mutation_completion(href.to_string(), handler),
        );
        Ok(())
    }

    /// ## Summary
    /// Creates the resource's path as a collection (MKCOL).
    ///
    /// ## Errors
    /// Fails fast when the resource has no href.
    pub fn mk_dir<H>(&self, handler: H, options: &RequestOptions) -> Result<(), PreconditionError>
    where
        H: FnOnce(Errors, Option<String>) + Send + 'static,
    {
        let href = self.require_href()?;
        self.client.mkcol(
            href,
            options,
            mutation_completion(href.to_string(), handler),
        );
        Ok(())
    }

    fn require_href(&self) -> Result<&str, PreconditionError> {
        if self.resource.href.is_empty() {
            return Err(PreconditionError::MissingHref);
        }
        Ok(&self.resource.href)
    }

    fn last_segment(&self) -> String {
        self.resource
            .pathlist
            .last()
            .cloned()
            .unwrap_or_else(|| "/".to_string())
    }
}
