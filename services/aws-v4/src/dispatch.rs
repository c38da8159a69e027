use crate::decode::decode_response;
use bytes::Bytes;
use mqsign_core::{BlockingHttpSend, HttpSend, Result, XmlNode};
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Future returned by the cooperative strategy.
pub type BoxedFuture<T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'static>>;

/// Strategy that executes an already signed request and decodes the response.
///
/// The strategy is picked once when a client is built. Signing happens before
/// the request reaches the strategy, so both strategies share it entirely.
pub trait Dispatch: Debug + Send + Sync + 'static {
    /// What a call hands back to its caller: the result itself or a future of it.
    type Output<T: Send + 'static>;

    /// Execute `req` and decode the response with `extract`.
    ///
    /// `req` is an `Err` when signing failed; the error is reported through
    /// the same channel as every other failure, without any I/O.
    fn dispatch<T, F>(&self, req: Result<http::Request<Bytes>>, extract: F) -> Self::Output<T>
    where
        T: Send + 'static,
        F: FnOnce(&XmlNode) -> Result<T> + Send + 'static;
}

/// Blocking strategy: the call runs on the calling thread and returns once
/// the response has arrived.
#[derive(Debug, Clone)]
pub struct Blocking<S> {
    http: S,
}

impl<S: BlockingHttpSend> Blocking<S> {
    /// Create a blocking strategy on top of given transport.
    pub fn new(http: S) -> Self {
        Self { http }
    }
}

impl<S: BlockingHttpSend> Dispatch for Blocking<S> {
    type Output<T: Send + 'static> = Result<T>;

    fn dispatch<T, F>(&self, req: Result<http::Request<Bytes>>, extract: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&XmlNode) -> Result<T> + Send + 'static,
    {
        let resp = self.http.http_send(req?)?;
        decode_response(resp, extract)
    }
}

/// Cooperative strategy: the call returns a future that resolves once the
/// response has arrived, without blocking the executor.
///
/// Nothing is sent until the future is polled.
#[derive(Debug)]
pub struct Cooperative<S> {
    http: Arc<S>,
}

impl<S> Clone for Cooperative<S> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
        }
    }
}

impl<S: HttpSend> Cooperative<S> {
    /// Create a cooperative strategy on top of given transport.
    pub fn new(http: S) -> Self {
        Self {
            http: Arc::new(http),
        }
    }
}

impl<S: HttpSend> Dispatch for Cooperative<S> {
    type Output<T: Send + 'static> = BoxedFuture<T>;

    fn dispatch<T, F>(&self, req: Result<http::Request<Bytes>>, extract: F) -> BoxedFuture<T>
    where
        T: Send + 'static,
        F: FnOnce(&XmlNode) -> Result<T> + Send + 'static,
    {
        let http = self.http.clone();
        Box::pin(async move {
            let resp = http.http_send(req?).await?;
            decode_response(resp, extract)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mqsign_core::{Error, ErrorKind};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const BODY: &str = "<ReceiveMessageResponse><ReceiveMessageResult/></ReceiveMessageResponse>";

    #[derive(Debug, Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    impl BlockingHttpSend for Counting {
        fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(http::Response::new(Bytes::from_static(BODY.as_bytes())))
        }
    }

    #[async_trait]
    impl HttpSend for Counting {
        async fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(http::Response::new(Bytes::from_static(BODY.as_bytes())))
        }
    }

    fn request() -> Result<http::Request<Bytes>> {
        Ok(http::Request::new(Bytes::new()))
    }

    fn is_empty_result(root: &XmlNode) -> Result<bool> {
        Ok(root.require(&["ReceiveMessageResult"])?.is_empty())
    }

    #[test]
    fn test_blocking_dispatch() -> Result<()> {
        let dispatcher = Blocking::new(Counting::default());

        assert!(dispatcher.dispatch(request(), is_empty_result)?);
        assert_eq!(dispatcher.http.calls.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_cooperative_dispatch() -> Result<()> {
        let dispatcher = Cooperative::new(Counting::default());

        let fut = dispatcher.dispatch(request(), is_empty_result);
        assert_eq!(dispatcher.http.calls.load(Ordering::SeqCst), 0);
        assert!(fut.await?);
        assert_eq!(dispatcher.http.calls.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_signing_failure_skips_transport() {
        let blocking = Blocking::new(Counting::default());
        let cooperative = Cooperative::new(Counting::default());

        let err = blocking
            .dispatch(Err(Error::config_invalid("region is empty")), is_empty_result)
            .expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = cooperative
            .dispatch(Err(Error::config_invalid("region is empty")), is_empty_result)
            .await
            .expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        assert_eq!(blocking.http.calls.load(Ordering::SeqCst), 0);
        assert_eq!(cooperative.http.calls.load(Ordering::SeqCst), 0);
    }
}
