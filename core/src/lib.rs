//! Core components for signed calls to cloud messaging APIs.
//!
//! This crate provides the foundational types and traits for the mqsign ecosystem.
//! Service crates build the signing pipeline on top of them.
//!
//! ## Overview
//!
//! - **Error**: one error type whose [`ErrorKind`] separates configuration,
//!   transport, protocol and parse failures.
//! - **Transport**: [`HttpSend`] for non-blocking dispatch and [`BlockingHttpSend`]
//!   for dispatch on the calling thread.
//! - **Documents**: [`XmlNode`], the generic tag tree responses are decoded into.
//!
//! ## Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use bytes::Bytes;
//! use mqsign_core::{HttpSend, Result, XmlNode};
//!
//! #[derive(Debug)]
//! struct Canned;
//!
//! #[async_trait]
//! impl HttpSend for Canned {
//!     async fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
//!         Ok(http::Response::new(Bytes::from_static(
//!             b"<DeleteQueueResponse/>",
//!         )))
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let resp = Canned.http_send(http::Request::new(Bytes::new())).await?;
//! let root = XmlNode::parse(resp.body())?;
//! assert_eq!(root.name(), "DeleteQueueResponse");
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time formatting utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result, ServiceError};
mod http;
pub use http::{BlockingHttpSend, HttpSend};
mod xml;
pub use xml::XmlNode;
