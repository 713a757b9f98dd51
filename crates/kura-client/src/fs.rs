//! High-level, path-based WebDAV operations.
//!
//! `DavFs` pairs the verb wrappers with response interpretation: every
//! operation classifies the completed response and hands the caller an
//! [`Errors`] value plus the operation's payload. Listings run the
//! whole interpretation pipeline, from generic XML parse to the built
//! resource tree.

use http::StatusCode;

use kura_core::util::path;
use kura_rfc::dav::{self, Depth, LockScope, LockType};
use kura_rfc::xml::{ParseOptions, XmlResult, parse_document};

use crate::classify::{self, SuccessSet, mutation_completion};
use crate::client::DavClient;
use crate::errors::{Errors, PropertyError};
use crate::resource::controller::ResourceController;
use crate::resource::tree::ResourceSet;
use crate::resource::Resource;
use crate::transport::{RequestOptions, Transport};

/// ## Summary
/// Parses a multistatus body into a resource tree.
///
/// Entries whose own status is outside the 2xx range are reported as
/// property errors on the side; they still appear in the tree, because
/// the server did describe them.
///
/// ## Errors
/// Returns an error only for malformed XML; an empty or unrecognized
/// multistatus yields `(None, [])`.
pub fn parse_multistatus(
    xml: &str,
    options: &ParseOptions,
) -> XmlResult<(Option<ResourceSet>, Vec<PropertyError>)> {
    let doc = parse_document(xml, options)?;
    let entries = dav::annotate(&doc, options);

    let mut property_errors = Vec::new();
    let mut resources = Vec::with_capacity(entries.len());
    for entry in entries {
        if let Some(status) = &entry.status {
            if !status.is_success() {
                property_errors.push(PropertyError {
                    status: status.code,
                    path: entry.href.clone(),
                    message: status.text.clone(),
                });
            }
        }
        resources.push(Resource::from(entry));
    }

    Ok((ResourceSet::build(resources), property_errors))
}

/// Path-based WebDAV file-system operations.
pub struct DavFs<T: Transport> {
    client: DavClient<T>,
    parse_options: ParseOptions,
}

impl<T: Transport> DavFs<T> {
    #[must_use]
    pub fn new(client: DavClient<T>) -> Self {
        Self::with_parse_options(client, ParseOptions::default())
    }

    /// Creates a `DavFs` with non-default XML key derivation options.
    #[must_use]
    pub fn with_parse_options(client: DavClient<T>, parse_options: ParseOptions) -> Self {
        Self {
            client,
            parse_options,
        }
    }

    #[must_use]
    pub fn client(&self) -> &DavClient<T> {
        &self.client
    }

    /// Wraps a resource in a controller bound to this client.
    #[must_use]
    pub fn control(&self, resource: Resource) -> ResourceController<'_, T> {
        ResourceController::new(resource, &self.client)
    }

    /// Lists a collection: the resource itself plus its immediate
    /// children (PROPFIND, Depth 1).
    pub fn list_dir<H>(&self, dir_path: &str, handler: H, options: &RequestOptions)
    where
        H: FnOnce(Errors, Option<ResourceSet>) + Send + 'static,
    {
        self.propfind_request(dir_path, Depth::One, handler, options);
    }

    /// Fetches the properties of a single resource (PROPFIND, Depth 0).
    pub fn get_props<H>(&self, resource_path: &str, handler: H, options: &RequestOptions)
    where
        H: FnOnce(Errors, Option<ResourceSet>) + Send + 'static,
    {
        self.propfind_request(resource_path, Depth::Zero, handler, options);
    }

    /// Reads a resource's content (GET). The handler receives the body
    /// regardless of outcome; on error it is the server's error body.
    pub fn read<H>(&self, file_path: &str, handler: H, options: &RequestOptions)
    where
        H: FnOnce(Errors, String) + Send + 'static,
    {
        let request_path = path::remove_trailing_slash(file_path).to_string();
        let reported_path = request_path.clone();
        self.client.get(
            &request_path,
            options,
            Box::new(move |response| {
                let errors = classify::classify(
                    SuccessSet::Read,
                    response.status,
                    &response.body,
                    &reported_path,
                );
                handler(errors, response.body);
            }),
        );
    }

    /// Writes a resource's content (PUT).
    pub fn write<H>(&self, file_path: &str, content: String, handler: H, options: &RequestOptions)
    where
        H: FnOnce(Errors, Option<String>) + Send + 'static,
    {
        let request_path = path::remove_trailing_slash(file_path).to_string();
        self.client.put(
            &request_path,
            content,
            options,
            mutation_completion(request_path.clone(), handler),
        );
    }

    /// Checks resource existence (HEAD).
    pub fn exists<H>(&self, resource_path: &str, handler: H, options: &RequestOptions)
    where
        H: FnOnce(Errors, bool) + Send + 'static,
    {
        let reported_path = resource_path.to_string();
        self.client.head(
            resource_path,
            options,
            Box::new(move |response| {
                let errors = classify::classify(
                    SuccessSet::Mutation,
                    response.status,
                    &response.body,
                    &reported_path,
                );
                let found = !errors.has_request();
                handler(errors, found);
            }),
        );
    }

    /// Creates a collection (MKCOL).
    pub fn mk_dir<H>(&self, dir_path: &str, handler: H, options: &RequestOptions)
    where
        H: FnOnce(Errors, Option<String>) + Send + 'static,
    {
        self.client.mkcol(
            dir_path,
            options,
            mutation_completion(dir_path.to_string(), handler),
        );
    }

    /// Deletes a resource or collection (DELETE).
    pub fn remove<H>(&self, resource_path: &str, handler: H, options: &RequestOptions)
    where
        H: FnOnce(Errors, Option<String>) + Send + 'static,
    {
        self.client.delete(
            resource_path,
            options,
            mutation_completion(resource_path.to_string(), handler),
        );
    }

    /// Copies a resource to an explicit destination path (COPY).
    pub fn copy_to<H>(
        &self,
        source_path: &str,
        destination_path: &str,
        handler: H,
        options: &RequestOptions,
    ) where
        H: FnOnce(Errors, Option<String>) + Send + 'static,
    {
        self.client.copy(
            source_path,
            destination_path,
            options,
            mutation_completion(source_path.to_string(), handler),
        );
    }

    /// Moves a resource to an explicit destination path (MOVE).
    pub fn move_to<H>(
        &self,
        source_path: &str,
        destination_path: &str,
        handler: H,
        options: &RequestOptions,
    ) where
        H: FnOnce(Errors, Option<String>) + Send + 'static,
    {
        self.client.r#move(
            source_path,
            destination_path,
            options,
            mutation_completion(source_path.to_string(), handler),
        );
    }

    /// Locks a resource (LOCK). The handler receives the raw
    /// lockdiscovery body on success.
    pub fn lock<H>(
        &self,
        resource_path: &str,
        scope: LockScope,
        ty: LockType,
        handler: H,
        options: &RequestOptions,
    ) where
        H: FnOnce(Errors, String) + Send + 'static,
    {
        let reported_path = resource_path.to_string();
        self.client.lock(
            resource_path,
            scope,
            ty,
            options,
            Box::new(move |response| {
                let errors = classify::classify(
                    SuccessSet::Read,
                    response.status,
                    &response.body,
                    &reported_path,
                );
                handler(errors, response.body);
            }),
        );
    }

    fn propfind_request<H>(&self, request_path: &str, depth: Depth, handler: H, options: &RequestOptions)
    where
        H: FnOnce(Errors, Option<ResourceSet>) + Send + 'static,
    {
        let reported_path = request_path.to_string();
        let parse_options = self.parse_options.clone();
        self.client.propfind(
            request_path,
            depth,
            options,
            Box::new(move |response| {
                let (errors, resources) = process_multistatus(
                    &parse_options,
                    response.status,
                    &response.body,
                    &reported_path,
                );
                handler(errors, resources);
            }),
        );
    }
}

/// Interprets a completed PROPFIND response.
///
/// A non-207 status is a request-level error. A 207 whose body fails to
/// parse is reported as a synthetic 500, the way an unparseable success
/// body has always been treated here.
fn process_multistatus(
    parse_options: &ParseOptions,
    status: StatusCode,
    body: &str,
    reported_path: &str,
) -> (Errors, Option<ResourceSet>) {
    let mut errors = Errors::new();

    if status != StatusCode::MULTI_STATUS {
        errors.set_request(classify::build_request_error(status, body, reported_path));
        return (errors, None);
    }

    match parse_multistatus(body, parse_options) {
        Ok((resources, property_errors)) => {
            for error in property_errors {
                errors.add_prop(error);
            }
            (errors, resources)
        }
        Err(e) => {
            tracing::warn!(error = %e, path = reported_path, "Unparseable multistatus body");
            errors.set_request(classify::build_request_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "",
                reported_path,
            ));
            (errors, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use kura_rfc::xml::ParseOptions;

    use super::*;

    const SINGLE_FILE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<D:multistatus xmlns:D="DAV:">
  <D:response>
    <D:href>/dav/notes.txt</D:href>
    <D:propstat>
      <D:status>HTTP/1.1 200 OK</D:status>
      <D:prop>
        <D:getcontenttype>text/plain</D:getcontenttype>
        <lp1:getcontentlength xmlns:lp1="DAV:">42</lp1:getcontentlength>
      </D:prop>
    </D:propstat>
  </D:response>
</D:multistatus>"#;

    #[test]
    fn single_response_still_yields_a_tree() {
        let (set, errors) =
            parse_multistatus(SINGLE_FILE, &ParseOptions::default()).unwrap();
        let set = set.unwrap();
        assert!(errors.is_empty());
        assert_eq!(set.root.href, "/dav/notes.txt");
        assert_eq!(set.root.contentlength, 42);
        assert!(set.children.is_empty());
    }

    #[test]
    fn non_multistatus_status_is_a_request_error() {
        let (errors, set) = process_multistatus(
            &ParseOptions::default(),
            StatusCode::FORBIDDEN,
            "",
            "/dav/",
        );
        assert!(set.is_none());
        assert_eq!(errors.request.unwrap().status, 403);
    }

    #[test]
    fn unparseable_body_reports_synthetic_500() {
        let (errors, set) = process_multistatus(
            &ParseOptions::default(),
            StatusCode::MULTI_STATUS,
            "<D:multistatus><D:unclosed",
            "/dav/",
        );
        assert!(set.is_none());
        let request = errors.request.unwrap();
        assert_eq!(request.status, 500);
        assert_eq!(request.summary, "500 Internal Server Error");
    }
}
