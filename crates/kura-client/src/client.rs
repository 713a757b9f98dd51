//! Thin WebDAV verb wrappers over the transport.

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use uuid::Uuid;

use kura_core::ClientConfig;
use kura_core::util::path;
use kura_rfc::dav::{Depth, LockScope, LockType, PROPFIND_ALLPROP, lockinfo};

use crate::transport::{CompletionCallback, RequestOptions, Transport, TransportRequest};

/// A WebDAV client bound to one site and one transport.
///
/// Every method builds exactly one request and forwards it; response
/// interpretation happens in the caller's completion callback (see
/// [`crate::fs::DavFs`] for the interpreted API).
pub struct DavClient<T: Transport> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> DavClient<T> {
    #[must_use]
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Finds out which methods the server understands (OPTIONS).
    pub fn options(&self, path: &str, options: &RequestOptions, on_complete: CompletionCallback) {
        self.dispatch(
            Method::OPTIONS,
            path,
            &[("cache-control", "no-cache".to_string())],
            None,
            options,
            on_complete,
        );
    }

    /// Probes a resource (HEAD).
    pub fn head(&self, path: &str, options: &RequestOptions, on_complete: CompletionCallback) {
        self.dispatch(
            Method::HEAD,
            path,
            &[("cache-control", "no-cache".to_string())],
            None,
            options,
            on_complete,
        );
    }

    /// Reads a resource (GET).
    pub fn get(&self, path: &str, options: &RequestOptions, on_complete: CompletionCallback) {
        self.dispatch(Method::GET, path, &[], None, options, on_complete);
    }

    /// Writes a resource (PUT). A trailing slash on `path` is removed;
    /// collections are created with [`Self::mkcol`], not PUT.
    pub fn put(
        &self,
        path: &str,
        body: String,
        options: &RequestOptions,
        on_complete: CompletionCallback,
    ) {
        self.dispatch(
            Method::PUT,
            path::remove_trailing_slash(path),
            &[("cache-control", "no-cache".to_string())],
            Some(body),
            options,
            on_complete,
        );
    }

    /// Fetches properties (PROPFIND) with an allprop body.
    ///
    /// `Depth::Zero` describes the resource itself, `Depth::One` adds
    /// its immediate children.
    pub fn propfind(
        &self,
        path: &str,
        depth: Depth,
        options: &RequestOptions,
        on_complete: CompletionCallback,
    ) {
        self.dispatch(
            extension_method("PROPFIND"),
            path,
            &[
                ("content-type", "text/xml".to_string()),
                ("depth", depth.as_str().to_string()),
            ],
            Some(PROPFIND_ALLPROP.to_string()),
            options,
            on_complete,
        );
    }

    /// Locks a resource (LOCK) with a `D:lockinfo` body.
    pub fn lock(
        &self,
        path: &str,
        scope: LockScope,
        ty: LockType,
        options: &RequestOptions,
        on_complete: CompletionCallback,
    ) {
        self.dispatch(
            extension_method("LOCK"),
            path,
            &[
                ("content-type", "text/xml".to_string()),
                ("depth", Depth::Zero.as_str().to_string()),
            ],
            Some(lockinfo(scope, ty)),
            options,
            on_complete,
        );
    }

    /// Creates a collection (MKCOL). The path is normalized to end in
    /// a slash.
    pub fn mkcol(&self, path: &str, options: &RequestOptions, on_complete: CompletionCallback) {
        self.dispatch(
            extension_method("MKCOL"),
            &path::add_trailing_slash(path),
            &[],
            None,
            options,
            on_complete,
        );
    }

    /// Deletes a resource or collection (DELETE).
    pub fn delete(&self, path: &str, options: &RequestOptions, on_complete: CompletionCallback) {
        self.dispatch(Method::DELETE, path, &[], None, options, on_complete);
    }

    /// Copies a resource (COPY).
    pub fn copy(
        &self,
        path: &str,
        destination_path: &str,
        options: &RequestOptions,
        on_complete: CompletionCallback,
    ) {
        self.copy_or_move(extension_method("COPY"), path, destination_path, options, on_complete);
    }

    /// Moves a resource (MOVE).
    pub fn r#move(
        &self,
        path: &str,
        destination_path: &str,
        options: &RequestOptions,
        on_complete: CompletionCallback,
    ) {
        self.copy_or_move(extension_method("MOVE"), path, destination_path, options, on_complete);
    }

    fn copy_or_move(
        &self,
        method: Method,
        path: &str,
        destination_path: &str,
        options: &RequestOptions,
        on_complete: CompletionCallback,
    ) {
        // Destination carries the absolute URL of the target; Overwrite
        // is always sent, defaulting to the safe "F".
        let overwrite = if options.overwrite { "T" } else { "F" };
        self.dispatch(
            method,
            path,
            &[
                ("cache-control", "no-cache".to_string()),
                ("destination", self.config.url_for(destination_path)),
                ("overwrite", overwrite.to_string()),
            ],
            None,
            options,
            on_complete,
        );
    }

    fn dispatch(
        &self,
        method: Method,
        path: &str,
        operation_headers: &[(&str, String)],
        body: Option<String>,
        options: &RequestOptions,
        on_complete: CompletionCallback,
    ) {
        let url = self.build_url(path, &options.query);

        let mut headers = HeaderMap::new();
        for (name, value) in operation_headers {
            insert_header(&mut headers, name, value);
        }
        for (name, value) in &options.headers {
            insert_header(&mut headers, name, value);
        }

        let id = Uuid::new_v4();
        tracing::debug!(request_id = %id, %method, %url, "Dispatching WebDAV request");
        self.transport.send(
            TransportRequest {
                id,
                method,
                url,
                headers,
                body,
            },
            on_complete,
        );
    }

    fn build_url(&self, path: &str, query: &[(String, String)]) -> String {
        let mut url = self.config.url_for(path);
        for (i, (name, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(name);
            url.push('=');
            url.push_str(value);
        }
        url
    }
}

/// Resolves the WebDAV method tokens that `http::Method` has no
/// constants for.
fn extension_method(token: &'static str) -> Method {
    Method::from_bytes(token.as_bytes()).expect("method token is statically valid")
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) {
    match (HeaderName::try_from(name), HeaderValue::from_str(value)) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        }
        _ => tracing::warn!(header = name, "Skipping invalid request header"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::transport::TransportResponse;

    #[derive(Default)]
    struct RecordingTransport {
        requests: Mutex<Vec<TransportRequest>>,
    }

    impl Transport for RecordingTransport {
        fn send(&self, request: TransportRequest, on_complete: CompletionCallback) {
            self.requests.lock().unwrap().push(request);
            on_complete(TransportResponse::new(
                http::StatusCode::OK,
                "",
                HeaderMap::new(),
            ));
        }
    }

    fn client() -> DavClient<RecordingTransport> {
        let config = ClientConfig::new("http", "dav.example.com", Some(8080)).unwrap();
        DavClient::new(config, RecordingTransport::default())
    }

    fn last_request(client: &DavClient<RecordingTransport>) -> TransportRequest {
        client.transport().requests.lock().unwrap().last().cloned().unwrap()
    }

    #[test]
    fn propfind_sends_depth_and_allprop_body() {
        let client = client();
        client.propfind("/dav/", Depth::One, &RequestOptions::new(), Box::new(|_| {}));

        let request = last_request(&client);
        assert_eq!(request.method.as_str(), "PROPFIND");
        assert_eq!(request.url, "http://dav.example.com:8080/dav/");
        assert_eq!(request.headers.get("depth").unwrap(), "1");
        assert_eq!(request.headers.get("content-type").unwrap(), "text/xml");
        let body = request.body.unwrap();
        assert!(body.contains("<D:allprop />"));
        assert!(body.contains(r#"<D:propfind xmlns:D="DAV:">"#));
    }

    #[test]
    fn lock_sends_lockinfo_body() {
        let client = client();
        client.lock(
            "/dav/file.txt",
            LockScope::Exclusive,
            LockType::Write,
            &RequestOptions::new(),
            Box::new(|_| {}),
        );

        let request = last_request(&client);
        assert_eq!(request.method.as_str(), "LOCK");
        assert_eq!(request.headers.get("depth").unwrap(), "0");
        assert!(request.body.unwrap().contains("<D:exclusive />"));
    }

    #[test]
    fn put_strips_trailing_slash() {
        let client = client();
        client.put(
            "/dav/file.txt/",
            "hello".to_string(),
            &RequestOptions::new(),
            Box::new(|_| {}),
        );

        let request = last_request(&client);
        assert_eq!(request.url, "http://dav.example.com:8080/dav/file.txt");
        assert_eq!(request.body.as_deref(), Some("hello"));
    }

    #[test]
    fn mkcol_adds_trailing_slash() {
        let client = client();
        client.mkcol("/dav/newdir", &RequestOptions::new(), Box::new(|_| {}));
        assert_eq!(
            last_request(&client).url,
            "http://dav.example.com:8080/dav/newdir/"
        );
    }

    #[test]
    fn copy_sends_absolute_destination_and_overwrite() {
        let client = client();
        client.copy(
            "/dav/a.txt",
            "/dav/b.txt",
            &RequestOptions::new(),
            Box::new(|_| {}),
        );

        let request = last_request(&client);
        assert_eq!(request.method.as_str(), "COPY");
        assert_eq!(
            request.headers.get("destination").unwrap(),
            "http://dav.example.com:8080/dav/b.txt"
        );
        assert_eq!(request.headers.get("overwrite").unwrap(), "F");
    }

    #[test]
    fn overwrite_option_flips_the_header() {
        let client = client();
        client.r#move(
            "/dav/a.txt",
            "/dav/b.txt",
            &RequestOptions::new().with_overwrite(),
            Box::new(|_| {}),
        );

        let request = last_request(&client);
        assert_eq!(request.method.as_str(), "MOVE");
        assert_eq!(request.headers.get("overwrite").unwrap(), "T");
    }

    #[test]
    fn query_parameters_are_appended() {
        let client = client();
        client.get(
            "/dav/a.txt",
            &RequestOptions::new().with_query("version", "3").with_query("raw", "1"),
            Box::new(|_| {}),
        );
        assert_eq!(
            last_request(&client).url,
            "http://dav.example.com:8080/dav/a.txt?version=3&raw=1"
        );
    }

    #[test]
    fn caller_headers_override_operation_headers() {
        let client = client();
        client.propfind(
            "/dav/",
            Depth::Zero,
            &RequestOptions::new().with_header("depth", "1"),
            Box::new(|_| {}),
        );
        assert_eq!(last_request(&client).headers.get("depth").unwrap(), "1");
    }
}
