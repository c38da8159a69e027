use std::fmt;
use thiserror::Error;

/// The error type for mqsign operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
    context: Vec<String>,
    retryable: bool,
    service: Option<Box<ServiceError>>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration error (missing credentials, region or service).
    ///
    /// Always raised before any network I/O.
    ConfigInvalid,

    /// Request cannot be built or signed (malformed url, header, etc.)
    RequestInvalid,

    /// Connection, TLS or timeout failure while talking to the remote service.
    Transport,

    /// The remote service answered with an error document or a non-success status.
    Protocol,

    /// The response body is not the document shape we expected.
    Parse,
}

/// Structured error returned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    /// HTTP status code of the response.
    pub status: u16,
    /// Machine readable error code, like `AWS.SimpleQueueService.NonExistentQueue`.
    pub code: String,
    /// Human readable error message.
    pub message: String,
    /// Request id assigned by the service, if present.
    pub request_id: Option<String>,
    /// The raw response body.
    pub raw: String,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
            context: Vec::new(),
            retryable: false,
            service: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Add a context line like `queue_url: https://...`
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Mark this error as retryable or not.
    ///
    /// This is only a hint for callers, mqsign never retries by itself.
    pub fn set_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the context lines attached to this error.
    pub fn context(&self) -> &[String] {
        &self.context
    }

    /// Check if the caller may retry the failed call.
    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    /// Get the structured service error if this is a protocol error.
    pub fn service_error(&self) -> Option<&ServiceError> {
        self.service.as_deref()
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        self.kind == ErrorKind::ConfigInvalid
    }
}

// Convenience constructors
impl Error {
    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a transport error, transport errors are always retryable.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message).set_retryable(true)
    }

    /// Create a protocol error from the structured service error.
    pub fn protocol(service: ServiceError) -> Self {
        let retryable = service.status >= 500 || is_transient_code(&service.code);
        let mut err = Self::new(
            ErrorKind::Protocol,
            format!("service responded {}: {}", service.code, service.message),
        )
        .set_retryable(retryable);
        if let Some(id) = &service.request_id {
            err = err.with_context(format!("request_id: {id}"));
        }
        err.service = Some(Box::new(service));
        err
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message)
    }
}

fn is_transient_code(code: &str) -> bool {
    matches!(
        code,
        "Throttling"
            | "ThrottlingException"
            | "RequestThrottled"
            | "ServiceUnavailable"
            | "InternalError"
            | "InternalFailure"
    )
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::Transport => write!(f, "transport failure"),
            ErrorKind::Protocol => write!(f, "service error"),
            ErrorKind::Parse => write!(f, "unexpected response document"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUriParts> for Error {
    fn from(err: http::uri::InvalidUriParts) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::ToStrError> for Error {
    fn from(err: http::header::ToStrError) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
