//! The client: verb entry points, per-verb handle cache, send pipeline.
//!
//! A [`Client`] owns everything one logical HTTP peer needs: an optional
//! base URL, the request factory, one cached [`TransportHandle`] per verb
//! that has been used so far, and the lifecycle listener registry. The
//! verb methods only build requests; the transfer itself runs when the
//! caller invokes [`Request::send`], which routes back here.
//!
//! Execution is strictly synchronous and single-threaded. The handle
//! cache is interior-mutable state scoped to one client, so a listener
//! must not re-enter [`Client::send`] for the same client from within a
//! dispatch — the cache borrow is still outstanding and the option set of
//! the active handle is mid-mutation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, error};

use crate::event::{Event, EventKind, EventRegistry};
use crate::protocol::{ClientError, Headers, Message, Request, RequestFactory, Response, ResponseFactory, Verb};
use crate::transport::{CurlTransport, Transport, TransportHandle, TransportOption};

/// Fixed user-agent string merged into every transfer.
pub const USER_AGENT: &str = concat!("micro-client/", env!("CARGO_PKG_VERSION"));

/// Factory for the native session opened per verb.
type TransportFactory = Box<dyn Fn() -> Box<dyn Transport>>;

/// A synchronous HTTP client.
///
/// Cloning is shallow: clones share the same handle cache and listener
/// registry, and requests keep a weak back-reference to that shared
/// state, so a request outlives its client only as an unbound request.
///
/// # Example
///
/// ```no_run
/// use micro_client::client::Client;
/// use micro_client::protocol::Message;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::with_base_url("http://localhost:8080");
/// let mut request = client.get("/todos")?;
/// request.add_header("Accept", "application/json");
/// let response = request.send()?;
/// println!("{}", response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Rc<ClientInner>,
}

pub(crate) struct ClientInner {
    base_url: Option<String>,
    factory: RequestFactory,
    handles: RefCell<HashMap<Verb, TransportHandle>>,
    listeners: RefCell<EventRegistry>,
    transport: TransportFactory,
}

impl Client {
    /// Client with no base URL over the default libcurl transport.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Client resolving request paths against `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::builder().base_url(base_url).build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.inner.base_url.as_deref()
    }

    /// The fixed user-agent string identifying this client.
    pub fn user_agent(&self) -> &'static str {
        USER_AGENT
    }

    pub fn get(&self, url: &str) -> Result<Request, ClientError> {
        self.create_request(Verb::Get, url, Headers::new())
    }

    pub fn post(&self, url: &str) -> Result<Request, ClientError> {
        self.create_request(Verb::Post, url, Headers::new())
    }

    pub fn head(&self, url: &str) -> Result<Request, ClientError> {
        self.create_request(Verb::Head, url, Headers::new())
    }

    pub fn put(&self, url: &str) -> Result<Request, ClientError> {
        self.create_request(Verb::Put, url, Headers::new())
    }

    pub fn delete(&self, url: &str) -> Result<Request, ClientError> {
        self.create_request(Verb::Delete, url, Headers::new())
    }

    /// Builds a request for `verb`, resolving `url` against the base URL
    /// and binding the result to this client.
    ///
    /// # Errors
    ///
    /// Invalid-argument when the resolved URL is empty, malformed, or not
    /// absolute.
    pub fn create_request(&self, verb: Verb, url: &str, headers: Headers) -> Result<Request, ClientError> {
        let resolved = match &self.inner.base_url {
            Some(base) => format!("{base}{url}"),
            None => url.to_string(),
        };
        let mut request = self.inner.factory.build(verb, &resolved, headers)?;
        request.bind(Rc::downgrade(&self.inner));

        debug!(verb = %verb, url = %request.url(), "request created");
        Ok(request)
    }

    /// Registers `listener` for `kind`.
    ///
    /// Listeners for one kind run in registration order; event names
    /// arriving as strings are validated by [`EventKind::from_str`]
    /// before they reach this point.
    pub fn register<F>(&self, kind: EventKind, listener: F)
    where
        F: FnMut(&Event<'_>) + 'static,
    {
        self.inner.listeners.borrow_mut().register(kind, Box::new(listener));
    }

    /// Sends a staged request through this client's cached handle for the
    /// request's verb.
    ///
    /// This is the raw pipeline entry point; [`Request::send`] is the
    /// normal path and runs the verb's option preparation first.
    pub fn send(&self, request: Request) -> Result<Response, ClientError> {
        self.inner.send(request)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").field("base_url", &self.inner.base_url).finish_non_exhaustive()
    }
}

impl ClientInner {
    /// The send pipeline: merge, announce, execute, assemble.
    pub(crate) fn send(&self, request: Request) -> Result<Response, ClientError> {
        let verb = request.verb();
        debug!(verb = %verb, url = %request.url(), "sending request");

        let mut handles = self.handles.borrow_mut();
        let handle =
            handles.entry(verb).or_insert_with(|| TransportHandle::new((self.transport)()));

        // the request's own options first, then the per-send state that
        // must always win: URL, serialized headers, user agent
        handle.add_options(request.options().clone());
        handle.add_option(TransportOption::Url(request.url().to_string()));
        handle.add_option(TransportOption::HttpHeaders(request.headers().to_lines()));
        handle.add_option(TransportOption::UserAgent(USER_AGENT.to_string()));

        self.emit(&Event::RequestBuilt(&request));

        match handle.execute() {
            Ok(raw) => {
                let response = ResponseFactory.build(raw, handle, request)?;
                drop(handles);
                self.emit(&Event::ResponseBuilt(&response));
                Ok(response)
            }
            Err(source) => {
                error!(code = source.code(), reason = source.message(), "transfer failed");
                drop(handles);
                let failure = ClientError::from(source);
                self.emit(&Event::Error(&failure));
                Err(failure)
            }
        }
    }

    fn emit(&self, event: &Event<'_>) {
        self.listeners.borrow_mut().emit(event);
    }
}

/// Configures and builds a [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    transport: Option<TransportFactory>,
}

impl ClientBuilder {
    /// Base URL prepended to every request path.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Replaces the native session opened for each verb.
    ///
    /// The default opens a [`CurlTransport`] per verb; tests inject
    /// scripted sessions here.
    pub fn transport<F>(mut self, transport: F) -> Self
    where
        F: Fn() -> Box<dyn Transport> + 'static,
    {
        self.transport = Some(Box::new(transport));
        self
    }

    pub fn build(self) -> Client {
        let transport = self
            .transport
            .unwrap_or_else(|| Box::new(|| Box::new(CurlTransport::new()) as Box<dyn Transport>));
        Client {
            inner: Rc::new(ClientInner {
                base_url: self.base_url,
                factory: RequestFactory,
                handles: RefCell::new(HashMap::new()),
                listeners: RefCell::new(EventRegistry::new()),
                transport,
            }),
        }
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verb_methods_resolve_against_base_url() {
        let client = Client::with_base_url("http://localhost:8080");
        let cases: [(&str, fn(&Client, &str) -> Result<Request, ClientError>, Verb); 5] = [
            ("get", Client::get, Verb::Get),
            ("post", Client::post, Verb::Post),
            ("head", Client::head, Verb::Head),
            ("put", Client::put, Verb::Put),
            ("delete", Client::delete, Verb::Delete),
        ];

        for (name, method, verb) in cases {
            let request = method(&client, "/todos").unwrap_or_else(|_| panic!("{name} failed"));
            assert_eq!(request.verb(), verb);
            assert_eq!(request.url().to_string(), "http://localhost:8080/todos");
        }
    }

    #[test]
    fn absolute_url_without_base_is_taken_verbatim() {
        let client = Client::new();
        let request = client.get("http://example.com/index.html").unwrap();

        assert_eq!(request.url().to_string(), "http://example.com/index.html");
    }

    #[test]
    fn empty_url_without_base_is_invalid() {
        let client = Client::new();
        let err = client.get("").unwrap_err();

        assert!(matches!(err, ClientError::InvalidArgument { .. }));
    }

    #[test]
    fn relative_url_without_base_is_invalid() {
        let client = Client::new();
        let err = client.get("/todos").unwrap_err();

        assert!(matches!(err, ClientError::InvalidArgument { .. }));
    }

    #[test]
    fn empty_path_with_base_resolves_to_the_base() {
        let client = Client::with_base_url("http://localhost:8080");
        let request = client.get("").unwrap();

        assert_eq!(request.url().scheme_str(), Some("http"));
        assert_eq!(request.url().authority().map(|a| a.as_str()), Some("localhost:8080"));
        assert_eq!(request.url().path(), "/");
    }

    #[test]
    fn user_agent_names_crate_and_version() {
        let client = Client::new();

        assert_eq!(client.user_agent(), concat!("micro-client/", env!("CARGO_PKG_VERSION")));
    }
}
