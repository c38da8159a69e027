use crate::constants::FORM_CONTENT_TYPE;
use crate::{Config, Credential, Dispatch, Params, RequestSigner};
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::Method;
use log::debug;
use mqsign_core::time::{now, DateTime};
use mqsign_core::{Error, Result, XmlNode};

/// Client owns one credential, one endpoint and one dispatch strategy.
///
/// Service facades build [`Params`] and an extraction function and hand both
/// to [`Client::call`]; they never see the signing details.
#[derive(Debug, Clone)]
pub struct Client<D> {
    credential: Credential,
    signer: RequestSigner,
    endpoint: String,
    dispatcher: D,

    time: Option<DateTime>,
}

impl<D: Dispatch> Client<D> {
    /// Create a client for `service` from `config`.
    ///
    /// Fails with [`ErrorKind::ConfigInvalid`](mqsign_core::ErrorKind::ConfigInvalid)
    /// if region or credential are missing. No I/O happens here.
    pub fn new(config: &Config, service: &str, dispatcher: D) -> Result<Self> {
        if service.is_empty() {
            return Err(Error::config_invalid("service is required"));
        }
        let region = config.region()?;
        let credential = config.credential()?;
        let endpoint = config.endpoint(service)?;
        debug!("client for {service} in {region} uses endpoint {endpoint}");

        Ok(Self {
            credential,
            signer: RequestSigner::new(service, region),
            endpoint,
            dispatcher,
            time: None,
        })
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Endpoint this client addresses, always ending with `/`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Region this client signs for.
    pub fn region(&self) -> &str {
        self.signer.region()
    }

    /// Sign and dispatch one call, then decode its response with `extract`.
    ///
    /// `target` is either an absolute url (like a queue url) or a path relative
    /// to the endpoint. `GET` carries `params` in the query string, `POST`
    /// carries them as a form body.
    pub fn call<T, F>(&self, method: Method, target: &str, params: Params, extract: F) -> D::Output<T>
    where
        T: Send + 'static,
        F: FnOnce(&XmlNode) -> Result<T> + Send + 'static,
    {
        let req = self.build(method, target, &params).and_then(|req| {
            // Capture time right before signing.
            let now = self.time.unwrap_or_else(now);
            self.signer.sign(req, &self.credential, now)
        });
        self.dispatcher.dispatch(req, extract)
    }

    fn build(&self, method: Method, target: &str, params: &Params) -> Result<http::Request<Bytes>> {
        let url = if target.starts_with("http://") || target.starts_with("https://") {
            target.to_string()
        } else {
            format!("{}{}", self.endpoint, target.trim_start_matches('/'))
        };
        debug!(
            "sending {} {} {method} {url}",
            self.signer.service(),
            params.action()
        );

        let encoded = params.encode();
        let req = if method == Method::POST {
            http::Request::builder()
                .method(method)
                .uri(url)
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(Bytes::from(encoded))?
        } else {
            let sep = if url.contains('?') { '&' } else { '?' };
            http::Request::builder()
                .method(method)
                .uri(format!("{url}{sep}{encoded}"))
                .body(Bytes::new())?
        };
        Ok(req)
    }
}
