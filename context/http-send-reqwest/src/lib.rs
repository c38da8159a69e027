//! Reqwest-based http sending implementations for mqsign.
//!
//! This crate provides both dispatch transports used by the mqsign clients:
//!
//! - [`ReqwestHttpSend`] implements [`HttpSend`] on top of `reqwest::Client`,
//!   suitable for the cooperative strategy.
//! - [`ReqwestBlockingHttpSend`] implements [`BlockingHttpSend`] on top of
//!   `reqwest::blocking::Client`, suitable for the blocking strategy.
//!
//! Every response that arrives is returned as `Ok` whatever its status, the
//! decoder decides what a non-success status means. Only failures to obtain a
//! response at all are reported, as [`ErrorKind::Transport`](mqsign_core::ErrorKind::Transport).
//!
//! ## Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use mqsign_core::HttpSend;
//! use mqsign_http_send_reqwest::ReqwestHttpSend;
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = reqwest::Client::builder()
//!     .timeout(Duration::from_secs(30))
//!     .build()?;
//! let http = ReqwestHttpSend::new(client);
//!
//! let req = http::Request::builder()
//!     .uri("https://sqs.us-east-1.amazonaws.com/")
//!     .body(Bytes::new())?;
//! let resp = http.http_send(req).await?;
//! println!("status: {}", resp.status());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use mqsign_core::{BlockingHttpSend, Error, HttpSend, Result};

/// Non-blocking transport backed by `reqwest::Client`.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: reqwest::Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let uri = req.uri().to_string();
        let req = reqwest::Request::try_from(req).map_err(|e| {
            Error::request_invalid("failed to convert request")
                .with_source(e)
                .with_context(format!("uri: {uri}"))
        })?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| transport_error(e).with_context(format!("uri: {uri}")))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| transport_error(e).with_context(format!("uri: {uri}")))?;
        debug!("got response from {uri}: status {}", parts.status);
        Ok(http::Response::from_parts(parts, bs))
    }
}

/// Blocking transport backed by `reqwest::blocking::Client`.
///
/// `reqwest::blocking::Client` must not be created or used inside an async
/// runtime, use [`ReqwestHttpSend`] there instead.
#[derive(Debug, Default, Clone)]
pub struct ReqwestBlockingHttpSend {
    client: reqwest::blocking::Client,
}

impl ReqwestBlockingHttpSend {
    /// Create a new ReqwestBlockingHttpSend with a reqwest::blocking::Client.
    pub fn new(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl BlockingHttpSend for ReqwestBlockingHttpSend {
    fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        let uri = parts.uri.to_string();

        let resp = self
            .client
            .request(parts.method, &uri)
            .headers(parts.headers)
            .body(body.to_vec())
            .send()
            .map_err(|e| transport_error(e).with_context(format!("uri: {uri}")))?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp
            .bytes()
            .map_err(|e| transport_error(e).with_context(format!("uri: {uri}")))?;
        debug!("got response from {uri}: status {status}");

        let mut http_resp = http::Response::new(body);
        *http_resp.status_mut() = status;
        *http_resp.headers_mut() = headers;
        Ok(http_resp)
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    let message = if err.is_timeout() {
        "request timed out"
    } else if err.is_connect() {
        "failed to connect to remote service"
    } else {
        "failed to send request"
    };
    Error::transport(message).with_source(err)
}
