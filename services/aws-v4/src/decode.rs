use bytes::Bytes;
use log::debug;
use mqsign_core::{Error, Result, ServiceError, XmlNode};

/// Decode a response into the value `extract` pulls out of its document.
///
/// - An error document (`<ErrorResponse>` or `<Error>`) becomes a protocol
///   error carrying its code and message, whatever the status.
/// - A non-success status without an error document becomes a protocol error
///   whose code is the status reason phrase.
/// - A success status with a malformed body becomes a parse error.
///
/// `extract` is only invoked for success documents.
pub fn decode_response<T, F>(resp: http::Response<Bytes>, extract: F) -> Result<T>
where
    F: FnOnce(&XmlNode) -> Result<T>,
{
    let status = resp.status();
    let body = resp.into_body();

    match XmlNode::parse(&body) {
        Ok(root) => {
            if let Some(err) = service_error(status, &root, &body) {
                debug!(
                    "service responded error {} with status {status}: {}",
                    err.code, err.message
                );
                return Err(Error::protocol(err));
            }
            if !status.is_success() {
                return Err(Error::protocol(status_error(status, &body)));
            }
            extract(&root).map_err(|e| e.with_context(format!("document: {}", root.name())))
        }
        Err(err) if status.is_success() => Err(err),
        Err(_) => Err(Error::protocol(status_error(status, &body))),
    }
}

/// Extract `ResponseMetadata/RequestId`, the result of every mutating call.
pub fn request_id(root: &XmlNode) -> Result<String> {
    root.require_text(&["ResponseMetadata", "RequestId"])
}

fn service_error(status: http::StatusCode, root: &XmlNode, raw: &[u8]) -> Option<ServiceError> {
    // Query protocol:
    //
    // <ErrorResponse>
    //   <Error><Type>Sender</Type><Code>..</Code><Message>..</Message></Error>
    //   <RequestId>..</RequestId>
    // </ErrorResponse>
    //
    // Some endpoints answer with a bare <Error> root instead.
    let (error, request_id) = match root.name() {
        "ErrorResponse" => (root.child("Error")?, root.find_text(&["RequestId"])),
        "Error" => (root, root.find_text(&["RequestId"])),
        _ => return None,
    };

    Some(ServiceError {
        status: status.as_u16(),
        code: error.find_text(&["Code"]).unwrap_or_default().to_string(),
        message: error.find_text(&["Message"]).unwrap_or_default().to_string(),
        request_id: request_id.map(|v| v.to_string()),
        raw: String::from_utf8_lossy(raw).into_owned(),
    })
}

fn status_error(status: http::StatusCode, raw: &[u8]) -> ServiceError {
    let reason = status.canonical_reason().unwrap_or("Unknown");
    ServiceError {
        status: status.as_u16(),
        code: reason.to_string(),
        message: format!("unexpected status {status}"),
        request_id: None,
        raw: String::from_utf8_lossy(raw).into_owned(),
    }
}
