//! Decoding of raw HTTP response streams.
//!
//! The native transport returns the transfer output as one byte stream
//! with the header blocks left in place, so what arrives here has the
//! wire shape
//!
//! ```text
//! HTTP/<ver> <code> <reason>\r\n
//! <Name>: <Value>\r\n
//! ...
//! \r\n
//! <body bytes>
//! ```
//!
//! possibly preceded by informational (1xx) blocks of the same shape.
//! [`ResponseDecoder`] selects the final block, applies its status line
//! and headers to the target response, and hands back the body bytes.

mod response_decoder;

pub use response_decoder::ResponseDecoder;
