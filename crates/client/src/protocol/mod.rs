//! Core message model and error taxonomy.
//!
//! This module provides the building blocks the rest of the crate is
//! assembled from:
//!
//! - **Header storage** ([`headers`]): the case-insensitive [`Headers`]
//!   map and the [`Message`] trait shared by requests and responses
//! - **Requests** ([`request`]): the closed [`Verb`] set, the [`Request`]
//!   message, and the validating [`RequestFactory`]
//! - **Responses** ([`response`]): the [`Response`] message and the
//!   [`ResponseFactory`] that assembles one from a finished transfer
//! - **Errors** ([`error`]): [`ClientError`] and its
//!   [`TransportError`]/[`ParseError`] sources
//!
//! Requests and responses are plain owned data; the only shared state is
//! the weak back-reference a request keeps to the client that built it.

mod headers;
pub use headers::Headers;
pub use headers::Message;

mod request;
pub use request::Request;
pub use request::RequestFactory;
pub use request::Verb;

mod response;
pub use response::Response;
pub use response::ResponseFactory;

mod error;
pub use error::ClientError;
pub use error::ParseError;
pub use error::TransportError;
