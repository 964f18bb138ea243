//! HTTP response header decoder.
//!
//! Parses the raw byte stream of a completed transfer into a structured
//! response. The stream may carry more than one status-line/header block:
//! intermediate informational responses (e.g. `100 Continue`) produce
//! their own block before the final one, so the decoder skips every block
//! that is followed by another `HTTP/` block and applies only the last
//! one. Status line and header parsing itself is delegated to `httparse`.
//!
//! # Limits
//!
//! - Maximum number of headers per block: 64

use bytes::Bytes;
use httparse::Status;
use tracing::trace;

use crate::protocol::{Message, ParseError, Response};

/// Maximum number of headers accepted in a response block.
const MAX_HEADER_NUM: usize = 64;

/// Separator that terminates a header block on the wire.
const BLOCK_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Decoder for the raw byte stream returned by the native transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseDecoder;

impl ResponseDecoder {
    /// Populates `response` with the status and headers of the final
    /// block in `raw` and returns the remaining body bytes.
    ///
    /// The returned body is a zero-copy slice of `raw`; it is handed to
    /// the caller, not stored on the response here.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - the stream contains no block terminator at all
    /// - the status line of the final block is missing or malformed
    /// - a header line is malformed or not valid UTF-8
    /// - the block carries more than `MAX_HEADER_NUM` headers
    pub fn decode(&self, raw: &Bytes, response: &mut Response) -> Result<Bytes, ParseError> {
        let mut block_start = 0;
        loop {
            let terminator =
                find_terminator(&raw[block_start..]).ok_or(ParseError::MissingHeaderBlock)? + block_start;
            let body_offset = terminator + BLOCK_TERMINATOR.len();

            // another status line follows: this block was informational
            if raw[body_offset..].starts_with(b"HTTP/") {
                trace!(offset = body_offset, "skipping informational header block");
                block_start = body_offset;
                continue;
            }

            self.apply_block(&raw[block_start..body_offset], response)?;
            return Ok(raw.slice(body_offset..));
        }
    }

    /// Parses one complete header block and applies it to `response`.
    fn apply_block(&self, block: &[u8], response: &mut Response) -> Result<(), ParseError> {
        let mut headers = [httparse::EMPTY_HEADER; MAX_HEADER_NUM];
        let mut parsed = httparse::Response::new(&mut headers);

        let status = match parsed.parse(block) {
            Ok(Status::Complete(_)) => {
                parsed.code.ok_or_else(|| ParseError::invalid_status_line("no numeric status code"))?
            }
            // the block is terminator-delimited, a partial parse means the
            // status line or a header line was cut short
            Ok(Status::Partial) => return Err(ParseError::invalid_status_line("truncated header block")),
            Err(httparse::Error::TooManyHeaders) => return Err(ParseError::too_many_headers(MAX_HEADER_NUM)),
            Err(e @ (httparse::Error::Status | httparse::Error::Version)) => {
                return Err(ParseError::invalid_status_line(e));
            }
            Err(e) => return Err(ParseError::invalid_header(e)),
        };

        response.set_status(status);
        trace!(status, header_count = parsed.headers.len(), "parsed final header block");

        for header in parsed.headers.iter() {
            let value = std::str::from_utf8(header.value)
                .map_err(|_| ParseError::invalid_header(format!("header {} value is not valid utf-8", header.name)))?;
            response.add_header(header.name.trim(), value.trim());
        }

        Ok(())
    }
}

fn find_terminator(bytes: &[u8]) -> Option<usize> {
    bytes.windows(BLOCK_TERMINATOR.len()).position(|window| window == BLOCK_TERMINATOR)
}
