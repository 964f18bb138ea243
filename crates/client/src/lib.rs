//! A small synchronous HTTP client over libcurl
//!
//! This crate provides a lightweight, strictly synchronous HTTP/1.1 client.
//! It focuses on a clean typed API around a native transport: requests are
//! plain data, transfers run through one cached libcurl session per verb,
//! and the raw wire output is parsed back into a structured response.
//!
//! # Features
//!
//! - Five request variants (GET, POST, HEAD, PUT, DELETE), each
//!   contributing its own transport options at send time
//! - Per-verb native session reuse with cumulative option staging
//! - Raw response parsing that handles informational (`100 Continue`)
//!   header blocks preceding the final response
//! - Synchronous lifecycle events (`request-built`, `error`,
//!   `response-built`) dispatched in registration order
//! - Typed errors carrying the native transport code and message
//! - Pluggable [`transport::Transport`] seam for testing without a network
//!
//! # Example
//!
//! ```no_run
//! use micro_client::client::Client;
//! use micro_client::event::{Event, EventKind};
//! use micro_client::protocol::Message;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Initialize logging
//!     tracing_subscriber::fmt().init();
//!
//!     let client = Client::with_base_url("http://localhost:8080");
//!
//!     client.register(EventKind::ResponseBuilt, |event| {
//!         if let Event::ResponseBuilt(response) = event {
//!             println!("{} in {:.3}s", response.status(), response.transaction_time());
//!         }
//!     });
//!
//!     let mut request = client.get("/index.html")?;
//!     request.add_header("Accept", "text/html");
//!
//!     let response = request.send()?;
//!     println!("{}", String::from_utf8_lossy(response.body()));
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`client`]: the [`Client`](client::Client), its per-verb handle cache
//!   and the send pipeline
//! - [`protocol`]: request/response messages, header storage, errors
//! - [`codec`]: decoding of raw response streams
//! - [`transport`]: the option model and the native transport seam
//! - [`event`]: lifecycle event kinds and listener dispatch
//!
//! # Execution model
//!
//! Everything is single-threaded and blocking: `send` returns when the
//! native transfer has finished, listeners run synchronously on the
//! calling thread, and no retry, redirect or pooling policy exists at
//! this layer. A timeout, where needed, is staged as an opaque transport
//! option. Per-verb sessions live as long as their client.
//!
//! # Error Handling
//!
//! The crate uses custom error types that implement `std::error::Error`:
//!
//! - [`protocol::ClientError`]: top-level error type
//! - [`protocol::TransportError`]: native transfer failures (code + message)
//! - [`protocol::ParseError`]: raw response parsing errors
//!
//! A transport failure is announced to `error` listeners and then raised
//! unchanged; no failure is swallowed anywhere.

pub mod client;
pub mod codec;
pub mod event;
pub mod protocol;
pub mod transport;

mod utils;
pub(crate) use utils::ensure;
