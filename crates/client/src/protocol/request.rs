//! HTTP request message, verb variants, and the request factory.
//!
//! Every request carries one of five fixed verbs. The verb decides which
//! transport options are contributed right before the transfer runs: the
//! preparation is deliberately lazy so a body attached after construction
//! is still picked up. Requests hold a weak back-reference to the client
//! that created them; sending an unbound request is an error, not a
//! silent no-op.

use std::fmt;
use std::rc::Weak;
use std::str::FromStr;

use bytes::Bytes;
use http::Uri;
use tracing::trace;

use crate::client::ClientInner;
use crate::ensure;
use crate::protocol::{ClientError, Headers, Message, Response};
use crate::transport::{TransportOption, TransportOptions};

/// The closed set of HTTP verbs a request can carry.
///
/// The verb fixes which option-preparation logic runs at send time and is
/// the key under which the owning client caches transport handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
    Head,
}

impl Verb {
    pub const ALL: [Verb; 5] = [Verb::Get, Verb::Post, Verb::Put, Verb::Delete, Verb::Head];

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
            Verb::Head => "HEAD",
        }
    }

    /// Contributes the verb-specific transport options.
    ///
    /// GET marks a body-less fetch and HEAD suppresses the response body;
    /// the body-carrying verbs stage the message body (or its absence) and
    /// their method selection. Later writes win over caller-staged options
    /// of the same key.
    fn prepare(self, body: Option<&Bytes>, options: &mut TransportOptions) {
        match self {
            Verb::Get => options.set(TransportOption::HttpGet(true)),
            Verb::Post => {
                options.set(TransportOption::Post(true));
                options.set(TransportOption::PostFields(body.cloned()));
            }
            Verb::Put => {
                options.set(TransportOption::CustomRequest("PUT".to_string()));
                options.set(TransportOption::PostFields(body.cloned()));
            }
            Verb::Delete => {
                options.set(TransportOption::CustomRequest("DELETE".to_string()));
                options.set(TransportOption::PostFields(body.cloned()));
            }
            Verb::Head => options.set(TransportOption::Nobody(true)),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = ClientError;

    /// Accepts the five known verb names, case-insensitively.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_uppercase().as_str() {
            "GET" => Ok(Verb::Get),
            "POST" => Ok(Verb::Post),
            "PUT" => Ok(Verb::Put),
            "DELETE" => Ok(Verb::Delete),
            "HEAD" => Ok(Verb::Head),
            _ => Err(ClientError::invalid_argument(format!("unknown verb: {name}"))),
        }
    }
}

/// An HTTP request bound to the client that created it.
///
/// Built by [`RequestFactory::build`] (normally through a client verb
/// method, which also binds it), mutated by the caller, then consumed by
/// [`Request::send`]. The verb and URL are fixed at construction; after a
/// successful send the request lives on inside the returned response.
#[derive(Debug, Clone)]
pub struct Request {
    verb: Verb,
    url: Uri,
    headers: Headers,
    body: Option<Bytes>,
    options: TransportOptions,
    client: Option<Weak<ClientInner>>,
}

impl Request {
    pub(crate) fn new(verb: Verb, url: Uri, headers: Headers) -> Self {
        Self { verb, url, headers, body: None, options: TransportOptions::new(), client: None }
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// The absolute URL this request targets, already resolved against
    /// any client base URL.
    pub fn url(&self) -> &Uri {
        &self.url
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = Some(body.into());
    }

    /// Stages one transport option for this request (last write wins).
    pub fn add_option(&mut self, option: TransportOption) {
        self.options.set(option);
    }

    /// Stages a batch of transport options.
    pub fn add_options<I: IntoIterator<Item = TransportOption>>(&mut self, options: I) {
        self.options.merge(options);
    }

    pub fn options(&self) -> &TransportOptions {
        &self.options
    }

    pub(crate) fn bind(&mut self, client: Weak<ClientInner>) {
        self.client = Some(client);
    }

    /// Runs the verb's option preparation against the staged options.
    fn prepare(&mut self) {
        trace!(verb = %self.verb, has_body = self.body.is_some(), "preparing verb options");
        self.verb.prepare(self.body.as_ref(), &mut self.options);
    }

    /// Prepares the verb options and sends this request through the
    /// client it is bound to.
    ///
    /// # Errors
    ///
    /// [`ClientError::UnboundRequest`] when the request was never bound to
    /// a client or the client has been dropped; otherwise whatever the
    /// client's send pipeline reports (transport or parse failure).
    pub fn send(mut self) -> Result<Response, ClientError> {
        let Some(client) = self.client.as_ref().and_then(Weak::upgrade) else {
            return Err(ClientError::UnboundRequest);
        };
        self.prepare();
        client.send(self)
    }
}

impl Message for Request {
    fn headers(&self) -> &Headers {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }
}

/// Builds request variants from a verb and an absolute URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestFactory;

impl RequestFactory {
    /// Constructs the request variant for `verb`, attaching `headers`.
    ///
    /// # Errors
    ///
    /// Invalid-argument when `url` is empty, does not parse, or is not
    /// absolute (missing scheme or authority).
    pub fn build(&self, verb: Verb, url: &str, headers: Headers) -> Result<Request, ClientError> {
        ensure!(!url.is_empty(), ClientError::invalid_argument("url must not be empty"));

        let uri: Uri = url
            .parse()
            .map_err(|e: http::uri::InvalidUri| ClientError::invalid_argument(format!("malformed url {url}: {e}")))?;
        ensure!(
            uri.scheme().is_some() && uri.authority().is_some(),
            ClientError::invalid_argument(format!("url must be absolute: {url}"))
        );

        Ok(Request::new(verb, uri, headers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::OptionKey;

    fn request(verb: Verb) -> Request {
        RequestFactory.build(verb, "http://localhost:8080/todos", Headers::new()).unwrap()
    }

    #[test]
    fn verb_parses_case_insensitively() {
        assert_eq!("get".parse::<Verb>().unwrap(), Verb::Get);
        assert_eq!("DELETE".parse::<Verb>().unwrap(), Verb::Delete);
        assert_eq!("Head".parse::<Verb>().unwrap(), Verb::Head);
    }

    #[test]
    fn unknown_verb_is_invalid_argument() {
        let err = "TRACE".parse::<Verb>().unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument { .. }));
    }

    #[test]
    fn get_prepares_bodyless_fetch() {
        let mut req = request(Verb::Get);
        req.prepare();

        assert_eq!(req.options().get(OptionKey::HttpGet), Some(&TransportOption::HttpGet(true)));
        assert_eq!(req.options().get(OptionKey::PostFields), None);
    }

    #[test]
    fn head_prepares_no_response_body() {
        let mut req = request(Verb::Head);
        req.prepare();

        assert_eq!(req.options().get(OptionKey::Nobody), Some(&TransportOption::Nobody(true)));
    }

    #[test]
    fn post_without_body_prepares_absent_fields() {
        let mut req = request(Verb::Post);
        req.prepare();

        assert_eq!(req.options().get(OptionKey::Post), Some(&TransportOption::Post(true)));
        assert_eq!(req.options().get(OptionKey::PostFields), Some(&TransportOption::PostFields(None)));
    }

    #[test]
    fn body_attached_after_construction_is_prepared() {
        let mut req = request(Verb::Post);
        req.set_body("title=milk");
        req.prepare();

        assert_eq!(
            req.options().get(OptionKey::PostFields),
            Some(&TransportOption::PostFields(Some(Bytes::from("title=milk"))))
        );
    }

    #[test]
    fn put_and_delete_prepare_custom_method() {
        for (verb, method) in [(Verb::Put, "PUT"), (Verb::Delete, "DELETE")] {
            let mut req = request(verb);
            req.prepare();

            assert_eq!(
                req.options().get(OptionKey::CustomRequest),
                Some(&TransportOption::CustomRequest(method.to_string()))
            );
            assert_eq!(req.options().get(OptionKey::PostFields), Some(&TransportOption::PostFields(None)));
        }
    }

    #[test]
    fn factory_rejects_empty_url() {
        let err = RequestFactory.build(Verb::Get, "", Headers::new()).unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument { .. }));
    }

    #[test]
    fn factory_rejects_relative_url() {
        let err = RequestFactory.build(Verb::Get, "/todos", Headers::new()).unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument { .. }));
    }

    #[test]
    fn factory_rejects_garbage_url() {
        let err = RequestFactory.build(Verb::Get, "http://exa mple.com/", Headers::new()).unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument { .. }));
    }

    #[test]
    fn factory_attaches_headers() {
        let headers: Headers = [("Accept", "*/*")].into_iter().collect();
        let req = RequestFactory.build(Verb::Get, "http://localhost/", headers).unwrap();

        assert_eq!(req.header("accept"), Some("*/*"));
    }

    #[test]
    fn send_without_client_is_unbound() {
        let req = request(Verb::Get);
        let err = req.send().unwrap_err();

        assert!(matches!(err, ClientError::UnboundRequest));
    }
}
