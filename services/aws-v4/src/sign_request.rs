use crate::canonical::CanonicalRequest;
use crate::constants::{ALGORITHM, AWS4_REQUEST, X_AMZ_DATE};
use crate::signing_key::generate_signing_key;
use crate::Credential;
use bytes::Bytes;
use http::uri::PathAndQuery;
use http::{header, HeaderValue, Uri};
use log::debug;
use mqsign_core::hash::{hex_hmac_sha256, hex_sha256};
use mqsign_core::time::DateTime;
use mqsign_core::{Error, Result};

/// RequestSigner that implement AWS SigV4 with the `Authorization` header.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// The signer holds no per-call state, one instance can sign concurrently
/// for any number of in-flight calls.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    service: String,
    region: String,
}

impl RequestSigner {
    /// Create a new signer for given service namespace and region.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),
        }
    }

    /// Service namespace this signer signs for.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Region this signer signs for.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Sign `req` as of `now` and return it with `host`, `x-amz-date` and
    /// `authorization` set.
    ///
    /// The query of the returned request is the canonical query, so the
    /// transmitted url is exactly the signed one.
    pub fn sign(
        &self,
        req: http::Request<Bytes>,
        cred: &Credential,
        now: DateTime,
    ) -> Result<http::Request<Bytes>> {
        if !cred.is_valid() {
            return Err(Error::config_invalid("credential is incomplete"));
        }
        if self.region.is_empty() {
            return Err(Error::config_invalid("region is empty"));
        }
        if self.service.is_empty() {
            return Err(Error::config_invalid("service is empty"));
        }

        let (mut parts, body) = req.into_parts();

        let creq = CanonicalRequest::build(&parts.method, &parts.uri, &parts.headers, &body, now)?;
        let creq_string = creq.to_string();
        debug!("calculated canonical request: {creq_string}");

        // Scope: "20220313/<region>/<service>/aws4_request"
        let scope = format!(
            "{}/{}/{}/{AWS4_REQUEST}",
            creq.date_stamp(),
            self.region,
            self.service
        );
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = format!(
            "{ALGORITHM}\n{}\n{scope}\n{}",
            creq.amz_date(),
            hex_sha256(creq_string.as_bytes())
        );
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = generate_signing_key(
            &cred.secret_access_key,
            creq.date_stamp(),
            &self.region,
            &self.service,
        )?;
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        let mut authorization = HeaderValue::from_str(&format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={}, Signature={signature}",
            cred.access_key_id(),
            creq.signed_headers(),
        ))?;
        authorization.set_sensitive(true);

        parts.uri = replace_query(&parts.uri, creq.path(), creq.query())?;
        parts
            .headers
            .insert(header::HOST, HeaderValue::from_str(creq.host())?);
        parts
            .headers
            .insert(X_AMZ_DATE, HeaderValue::from_str(creq.amz_date())?);
        parts.headers.insert(header::AUTHORIZATION, authorization);

        Ok(http::Request::from_parts(parts, body))
    }
}

fn replace_query(uri: &Uri, path: &str, query: &str) -> Result<Uri> {
    let path_and_query = if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query)?);
    Uri::from_parts(parts).map_err(|e| {
        Error::request_invalid("failed to rebuild request url")
            .with_source(e)
            .with_context(format!("url: {uri}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;
    use mqsign_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::sync::{Arc, Mutex, OnceLock};
    use test_case::test_case;

    const SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

    /// Log output of every test in this binary.
    #[derive(Debug, Clone, Default)]
    struct LogSink(Arc<Mutex<Vec<u8>>>);

    impl LogSink {
        fn contents(&self) -> String {
            let buf = self.0.lock().expect("lock must succeed");
            String::from_utf8_lossy(&buf).into_owned()
        }
    }

    impl Write for LogSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("lock must succeed").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn init_logger() -> &'static LogSink {
        static SINK: OnceLock<LogSink> = OnceLock::new();
        SINK.get_or_init(|| {
            let sink = LogSink::default();
            let _ = env_logger::Builder::new()
                .filter_level(log::LevelFilter::Debug)
                .target(env_logger::Target::Pipe(Box::new(sink.clone())))
                .try_init();
            sink
        })
    }

    fn reference_time() -> DateTime {
        Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0)
            .single()
            .expect("must be valid time")
    }

    fn get(url: &str) -> http::Request<Bytes> {
        http::Request::get(url)
            .body(Bytes::new())
            .expect("request must be valid")
    }

    fn authorization(req: &http::Request<Bytes>) -> String {
        req.headers()[header::AUTHORIZATION]
            .to_str()
            .expect("must be valid header")
            .to_string()
    }

    /// `get-vanilla` from the AWS Signature Version 4 test suite.
    #[test]
    fn test_get_vanilla() -> Result<()> {
        init_logger();

        let signer = RequestSigner::new("service", "us-east-1");
        let cred = Credential::new("AKIDEXAMPLE", SECRET);

        let req = signer.sign(
            get("https://example.amazonaws.com/"),
            &cred,
            reference_time(),
        )?;

        assert_eq!(
            authorization(&req),
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/service/aws4_request, SignedHeaders=host;x-amz-date, Signature=5fa00fa31553b73ebf1942676e86291e8372ff2a2260956d9b8aae1d763fbf31"
        );
        assert_eq!(req.headers()[X_AMZ_DATE], "20150830T123600Z");
        assert_eq!(req.headers()[header::HOST], "example.amazonaws.com");
        assert!(req.headers()[header::AUTHORIZATION].is_sensitive());
        assert_eq!(req.uri().to_string(), "https://example.amazonaws.com/");
        Ok(())
    }

    #[test]
    fn test_sign_is_deterministic() -> Result<()> {
        let signer = RequestSigner::new("sqs", "eu-west-1");
        let cred = Credential::new("AKIDEXAMPLE", SECRET);
        let url = "https://sqs.eu-west-1.amazonaws.com/123456789012/q?Action=ReceiveMessage&Version=2012-11-05";

        let a = signer.sign(get(url), &cred, reference_time())?;
        let b = signer.sign(get(url), &cred, reference_time())?;

        assert_eq!(a.headers(), b.headers());
        assert_eq!(a.uri(), b.uri());
        Ok(())
    }

    #[test]
    fn test_query_order_does_not_change_signature() -> Result<()> {
        let signer = RequestSigner::new("sqs", "eu-west-1");
        let cred = Credential::new("AKIDEXAMPLE", SECRET);

        let a = signer.sign(
            get("https://sqs.eu-west-1.amazonaws.com/?Version=2012-11-05&Action=ListQueues"),
            &cred,
            reference_time(),
        )?;
        let b = signer.sign(
            get("https://sqs.eu-west-1.amazonaws.com/?Action=ListQueues&Version=2012-11-05"),
            &cred,
            reference_time(),
        )?;

        assert_eq!(authorization(&a), authorization(&b));
        assert_eq!(
            a.uri().to_string(),
            "https://sqs.eu-west-1.amazonaws.com/?Action=ListQueues&Version=2012-11-05"
        );
        assert_eq!(a.uri(), b.uri());
        Ok(())
    }

    #[test]
    fn test_timestamp_changes_signature() -> Result<()> {
        let signer = RequestSigner::new("sqs", "eu-west-1");
        let cred = Credential::new("AKIDEXAMPLE", SECRET);
        let url = "https://sqs.eu-west-1.amazonaws.com/?Action=ListQueues";

        let a = signer.sign(get(url), &cred, reference_time())?;
        let b = signer.sign(
            get(url),
            &cred,
            reference_time() + chrono::Duration::seconds(1),
        )?;

        assert_ne!(authorization(&a), authorization(&b));
        Ok(())
    }

    #[test]
    fn test_secret_never_leaves_signer() -> Result<()> {
        let signer = RequestSigner::new("sqs", "eu-west-1");
        let cred = Credential::new("AKIDEXAMPLE", SECRET);

        let req = signer.sign(
            get("https://sqs.eu-west-1.amazonaws.com/?Action=ListQueues"),
            &cred,
            reference_time(),
        )?;

        for value in req.headers().values() {
            assert!(!value.to_str().unwrap_or_default().contains(SECRET));
        }
        assert!(!req.uri().to_string().contains(SECRET));
        Ok(())
    }

    #[test]
    fn test_secret_never_logged() -> Result<()> {
        let logs = init_logger();
        let signer = RequestSigner::new("sqs", "eu-west-1");
        let cred = Credential::new("AKIDEXAMPLE", SECRET);

        signer.sign(
            get("https://sqs.eu-west-1.amazonaws.com/?Action=ListQueues"),
            &cred,
            reference_time(),
        )?;

        let output = logs.contents();
        assert!(output.contains("calculated canonical request"));
        assert!(output.contains("calculated string to sign"));
        assert!(!output.contains(SECRET));
        Ok(())
    }

    #[test]
    fn test_plus_is_transmitted_as_percent_twenty() -> Result<()> {
        let signer = RequestSigner::new("sqs", "eu-west-1");
        let cred = Credential::new("AKIDEXAMPLE", SECRET);

        let req = signer.sign(
            get("https://sqs.eu-west-1.amazonaws.com/q?MessageBody=a+b&Action=SendMessage"),
            &cred,
            reference_time(),
        )?;

        assert_eq!(
            req.uri().query(),
            Some("Action=SendMessage&MessageBody=a%20b")
        );
        Ok(())
    }

    #[test_case("", SECRET, "sqs", "eu-west-1"; "empty access key")]
    #[test_case("AKIDEXAMPLE", "", "sqs", "eu-west-1"; "empty secret key")]
    #[test_case("AKIDEXAMPLE", SECRET, "", "eu-west-1"; "empty service")]
    #[test_case("AKIDEXAMPLE", SECRET, "sqs", ""; "empty region")]
    fn test_missing_configuration(ak: &str, sk: &str, service: &str, region: &str) {
        let signer = RequestSigner::new(service, region);
        let cred = Credential::new(ak, sk);

        let err = signer
            .sign(
                get("https://sqs.eu-west-1.amazonaws.com/"),
                &cred,
                reference_time(),
            )
            .expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
