use crate::Result;
use bytes::Bytes;
use std::fmt::Debug;

/// HttpSend is used to send signed http requests without blocking the caller.
///
/// The returned future resolves once the full response body has been received.
/// Implementations must report connection, TLS and timeout failures as
/// [`ErrorKind::Transport`](crate::ErrorKind::Transport) and return every
/// received response as `Ok`, whatever its status code.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send http request and return the response.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

/// BlockingHttpSend is used to send signed http requests on the calling thread.
///
/// It follows the same error contract as [`HttpSend`].
pub trait BlockingHttpSend: Debug + Send + Sync + 'static {
    /// Send http request and wait for the response.
    fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}
