use thiserror::Error;

/// Top-level error returned by client and request operations.
///
/// The variants mirror the failure surface of a single send: invalid
/// caller input, a request that was never bound to a client, a native
/// transport failure, and a malformed raw response. Nothing is retried
/// and nothing is swallowed; every variant reaches the caller.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A caller-supplied argument was rejected: an unknown verb or event
    /// name, an empty or non-absolute URL, or an invalid transaction time.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// `send` was called on a request that has no live client behind it.
    #[error("request is not bound to a client")]
    UnboundRequest,

    /// The native transport reported a failure.
    #[error("transport error: {source}")]
    Transport {
        #[from]
        source: TransportError,
    },

    /// The raw response stream could not be parsed.
    #[error("parse error: {source}")]
    Parse {
        #[from]
        source: ParseError,
    },
}

impl ClientError {
    pub fn invalid_argument<S: ToString>(reason: S) -> Self {
        Self::InvalidArgument { reason: reason.to_string() }
    }
}

/// Failure reported by the native transport, carrying the native error
/// code and message.
///
/// Built at exactly one place, the transport handle boundary, and handed
/// unchanged to the `error` event and to the caller of send.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("native transfer failed with code {code}: {message}")]
pub struct TransportError {
    code: u32,
    message: String,
}

impl TransportError {
    pub fn new<S: ToString>(code: u32, message: S) -> Self {
        Self { code, message: message.to_string() }
    }

    /// The native error code (a libcurl `CURLcode` for the default
    /// transport).
    pub fn code(&self) -> u32 {
        self.code
    }

    /// The native error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors produced while parsing a raw response stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The stream contains no `\r\n\r\n` header-block terminator.
    #[error("response stream has no header block terminator")]
    MissingHeaderBlock,

    /// The status line of the final block is missing or malformed.
    #[error("malformed status line: {reason}")]
    InvalidStatusLine { reason: String },

    /// A header line could not be parsed.
    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    /// Header count exceeds the supported limit.
    #[error("header number exceed the limit {max_num}")]
    TooManyHeaders { max_num: usize },
}

impl ParseError {
    pub fn invalid_status_line<S: ToString>(reason: S) -> Self {
        Self::InvalidStatusLine { reason: reason.to_string() }
    }

    pub fn invalid_header<S: ToString>(reason: S) -> Self {
        Self::InvalidHeader { reason: reason.to_string() }
    }

    pub fn too_many_headers(max_num: usize) -> Self {
        Self::TooManyHeaders { max_num }
    }
}
