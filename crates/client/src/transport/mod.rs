//! Native transport abstraction and the option model feeding it.
//!
//! # Architecture
//!
//! The transport layer has three pieces:
//!
//! - [`options`]: the typed [`TransportOption`] instructions and the
//!   accumulating [`TransportOptions`] map they are staged in
//! - [`handle`]: the per-verb [`TransportHandle`] owning one native
//!   session and the options accumulated for it
//! - [`curl`]: the libcurl-backed production session
//!
//! The [`Transport`] trait is the seam between the client and the native
//! layer: one synchronous `execute` over an option map, plus timing
//! metadata for the just-completed call. Production code plugs in
//! [`CurlTransport`]; tests substitute scripted sessions.

use std::time::Duration;

use bytes::Bytes;

use crate::protocol::TransportError;

pub mod options;
pub use options::OptionKey;
pub use options::TransportOption;
pub use options::TransportOptions;

mod handle;
pub use handle::TransportHandle;

mod curl;
pub use self::curl::CurlTransport;

/// A native transport session.
///
/// Implementations accept the full accumulated option map on every call,
/// perform exactly one synchronous transfer, and return the raw bytes the
/// wire produced: every header block of the transfer, followed by the
/// body. There is no retry and no partial success; a failed transfer is a
/// [`TransportError`].
pub trait Transport {
    /// Executes one transfer configured by `options`.
    fn execute(&mut self, options: &TransportOptions) -> Result<Bytes, TransportError>;

    /// Duration of the most recently completed transfer.
    fn elapsed(&self) -> Duration;
}
