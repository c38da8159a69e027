//! AWS SigV4 signing and dispatch pipeline for query-protocol services.
//!
//! Every call flows the same way:
//!
//! 1. A service facade builds [`Params`] and an extraction function.
//! 2. [`Client::call`] builds the request and signs it with [`RequestSigner`]
//!    using the time captured right before signing.
//! 3. The client's [`Dispatch`] strategy executes it, either [`Blocking`] on
//!    the calling thread or [`Cooperative`] as a future.
//! 4. [`decode_response`] turns the response document into the extracted
//!    value, a protocol error or a parse error.
//!
//! ## Example
//!
//! ```no_run
//! use mqsign_aws_v4::{request_id, Blocking, Client, Config, Params};
//! # use bytes::Bytes;
//! # use mqsign_core::{BlockingHttpSend, Result};
//! # #[derive(Debug)]
//! # struct Transport;
//! # impl BlockingHttpSend for Transport {
//! #     fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
//! #         unimplemented!()
//! #     }
//! # }
//!
//! # fn example() -> Result<()> {
//! let config = Config::default()
//!     .with_region("us-east-1")
//!     .with_credential("access_key_id", "secret_access_key");
//! let client = Client::new(&config, "sqs", Blocking::new(Transport))?;
//!
//! let id = client.call(
//!     http::Method::GET,
//!     "https://sqs.us-east-1.amazonaws.com/123456789012/queue",
//!     Params::new("DeleteQueue", "2012-11-05"),
//!     request_id,
//! )?;
//! println!("deleted in request {id}");
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{AWS_QUERY_ENCODE_SET, FORM_CONTENT_TYPE, X_AMZ_DATE};

mod credential;
pub use credential::Credential;

mod config;
pub use config::Config;

mod signing_key;
pub use signing_key::generate_signing_key;

mod canonical;
pub use canonical::CanonicalRequest;

mod sign_request;
pub use sign_request::RequestSigner;

mod params;
pub use params::Params;

mod decode;
pub use decode::{decode_response, request_id};

mod dispatch;
pub use dispatch::{Blocking, BoxedFuture, Cooperative, Dispatch};

mod client;
pub use client::Client;
