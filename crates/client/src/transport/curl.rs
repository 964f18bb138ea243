//! libcurl-backed transport session.
//!
//! Wraps one `curl::easy::Easy` handle per session. The accumulated
//! options are applied fresh on every execute, `show_header(true)` keeps
//! the response header blocks in the returned stream so the decoder sees
//! the full wire shape, and `total_time` is read back afterwards as the
//! transfer's timing metadata.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use curl::easy::{Easy, List};
use tracing::trace;

use crate::protocol::TransportError;
use crate::transport::Transport;
use crate::transport::options::{TransportOption, TransportOptions};

/// The production [`Transport`] over libcurl.
pub struct CurlTransport {
    easy: Easy,
    elapsed: Duration,
}

impl CurlTransport {
    pub fn new() -> Self {
        Self { easy: Easy::new(), elapsed: Duration::ZERO }
    }

    /// Applies every staged option onto the easy handle.
    fn apply(&mut self, options: &TransportOptions) -> Result<(), curl::Error> {
        for option in options.iter() {
            match option {
                TransportOption::Url(url) => self.easy.url(url)?,
                TransportOption::HttpGet(on) => self.easy.get(*on)?,
                TransportOption::Post(on) => self.easy.post(*on)?,
                TransportOption::PostFields(Some(body)) => self.easy.post_fields_copy(body)?,
                // an absent body leaves libcurl's post fields untouched
                TransportOption::PostFields(None) => {}
                TransportOption::CustomRequest(method) => self.easy.custom_request(method)?,
                TransportOption::Nobody(on) => self.easy.nobody(*on)?,
                TransportOption::HttpHeaders(lines) => {
                    let mut list = List::new();
                    for line in lines {
                        list.append(line)?;
                    }
                    self.easy.http_headers(list)?;
                }
                TransportOption::UserAgent(agent) => self.easy.useragent(agent)?,
                TransportOption::TimeoutMs(millis) => self.easy.timeout(Duration::from_millis(*millis))?,
            }
        }

        // the decoder needs the header blocks in the output stream
        self.easy.show_header(true)
    }
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CurlTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurlTransport").field("elapsed", &self.elapsed).finish_non_exhaustive()
    }
}

impl Transport for CurlTransport {
    fn execute(&mut self, options: &TransportOptions) -> Result<Bytes, TransportError> {
        self.apply(options)?;

        let mut raw = Vec::new();
        {
            let mut transfer = self.easy.transfer();
            transfer.write_function(|data| {
                raw.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        self.elapsed = self.easy.total_time().unwrap_or(Duration::ZERO);
        trace!(raw_len = raw.len(), elapsed = ?self.elapsed, "libcurl transfer finished");
        Ok(Bytes::from(raw))
    }

    fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl From<curl::Error> for TransportError {
    fn from(error: curl::Error) -> Self {
        TransportError::new(error.code() as u32, error.description())
    }
}
