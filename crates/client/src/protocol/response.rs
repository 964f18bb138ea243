//! HTTP response message and the factory that assembles it.

use bytes::Bytes;
use tracing::debug;

use crate::codec::ResponseDecoder;
use crate::ensure;
use crate::protocol::{ClientError, Headers, Message, Request};
use crate::transport::TransportHandle;

/// An HTTP response bound to the request that produced it.
///
/// Created empty by the [`ResponseFactory`], populated field by field
/// while the raw stream is parsed, and frozen once handed to the caller.
#[derive(Debug)]
pub struct Response {
    status: u16,
    headers: Headers,
    body: Bytes,
    transaction_time: f64,
    request: Request,
}

impl Response {
    pub(crate) fn new(request: Request) -> Self {
        Self { status: 0, headers: Headers::new(), body: Bytes::new(), transaction_time: 0.0, request }
    }

    /// Numeric status code of the final header block.
    pub fn status(&self) -> u16 {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub(crate) fn set_body(&mut self, body: Bytes) {
        self.body = body;
    }

    /// Wall-clock duration of the completed transfer, in seconds.
    pub fn transaction_time(&self) -> f64 {
        self.transaction_time
    }

    /// Records the transfer duration.
    ///
    /// # Errors
    ///
    /// Invalid-argument for values that are not a number (NaN, infinite)
    /// or negative.
    pub(crate) fn set_transaction_time(&mut self, seconds: f64) -> Result<(), ClientError> {
        ensure!(
            seconds.is_finite(),
            ClientError::invalid_argument(format!("transaction time must be a number, got {seconds}"))
        );
        ensure!(
            seconds >= 0.0,
            ClientError::invalid_argument(format!("transaction time must not be negative, got {seconds}"))
        );
        self.transaction_time = seconds;
        Ok(())
    }

    /// The request this response answers.
    pub fn request(&self) -> &Request {
        &self.request
    }
}

impl Message for Response {
    fn headers(&self) -> &Headers {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }
}

/// Assembles a [`Response`] out of the raw transport bytes, the handle's
/// timing metadata, and the originating request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseFactory;

impl ResponseFactory {
    /// Builds the response for one completed transfer.
    ///
    /// Binds `request`, decodes status and headers from `raw`, stores the
    /// leftover bytes as the body, and records the transaction time the
    /// handle measured.
    ///
    /// # Errors
    ///
    /// Parse errors from the decoder; invalid-argument when the handle
    /// reports an invalid transaction time.
    pub fn build(&self, raw: Bytes, handle: &TransportHandle, request: Request) -> Result<Response, ClientError> {
        let mut response = Response::new(request);
        let body = ResponseDecoder.decode(&raw, &mut response)?;
        response.set_body(body);
        response.set_transaction_time(handle.transaction_time())?;

        debug!(status = response.status(), body_len = response.body().len(), "response built");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{RequestFactory, Verb};

    fn response() -> Response {
        let request = RequestFactory.build(Verb::Get, "http://localhost/", Headers::new()).unwrap();
        Response::new(request)
    }

    #[test]
    fn transaction_time_accepts_positive_seconds() {
        let mut resp = response();
        resp.set_transaction_time(1.5).unwrap();

        assert!((resp.transaction_time() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn transaction_time_rejects_nan() {
        let mut resp = response();
        let err = resp.set_transaction_time(f64::NAN).unwrap_err();

        assert!(matches!(err, ClientError::InvalidArgument { .. }));
    }

    #[test]
    fn transaction_time_rejects_negative() {
        let mut resp = response();
        let err = resp.set_transaction_time(-0.8).unwrap_err();

        assert!(matches!(err, ClientError::InvalidArgument { .. }));
        assert!((resp.transaction_time() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn response_starts_empty_and_bound() {
        let resp = response();

        assert_eq!(resp.status(), 0);
        assert!(resp.body().is_empty());
        assert_eq!(resp.request().verb(), Verb::Get);
    }
}
