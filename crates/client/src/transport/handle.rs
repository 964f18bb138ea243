//! Per-verb transport handle.

use std::fmt;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::protocol::TransportError;
use crate::transport::Transport;
use crate::transport::options::{TransportOption, TransportOptions};

/// Owns one native session and the options accumulated for it.
///
/// A client keeps one handle per verb and reuses it across sends of that
/// verb. Options staged here persist between transfers unless a later
/// send overwrites them — the accumulation is part of the handle's
/// contract, not an accident: a stale key from an earlier send of the
/// same verb stays in effect until it is explicitly re-set.
pub struct TransportHandle {
    session: Box<dyn Transport>,
    options: TransportOptions,
}

impl TransportHandle {
    pub fn new(session: Box<dyn Transport>) -> Self {
        Self { session, options: TransportOptions::new() }
    }

    /// Merges one option into the accumulated set (last write wins).
    pub fn add_option(&mut self, option: TransportOption) {
        self.options.set(option);
    }

    /// Merges a batch of options into the accumulated set.
    pub fn add_options<I: IntoIterator<Item = TransportOption>>(&mut self, options: I) {
        self.options.merge(options);
    }

    pub fn options(&self) -> &TransportOptions {
        &self.options
    }

    /// Executes one transfer with every accumulated option.
    ///
    /// This is the single point where native failures become typed
    /// [`TransportError`]s; nothing below it surfaces to the rest of the
    /// crate in any other shape.
    pub fn execute(&mut self) -> Result<Bytes, TransportError> {
        trace!(option_count = self.options.len(), "executing native transfer");
        match self.session.execute(&self.options) {
            Ok(raw) => {
                debug!(raw_len = raw.len(), "native transfer completed");
                Ok(raw)
            }
            Err(error) => {
                debug!(code = error.code(), "native transfer failed");
                Err(error)
            }
        }
    }

    /// Elapsed seconds of the most recently completed transfer.
    pub fn transaction_time(&self) -> f64 {
        self.session.elapsed().as_secs_f64()
    }
}

impl fmt::Debug for TransportHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportHandle").field("options", &self.options).finish_non_exhaustive()
    }
}
