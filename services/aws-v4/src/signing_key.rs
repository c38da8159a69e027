use crate::constants::{AWS4_KEY_PREFIX, AWS4_REQUEST};
use mqsign_core::hash::hmac_sha256;
use mqsign_core::{Error, Result};

/// Derive the scoped signing key for one day, region and service.
///
/// `kSigning = HMAC(HMAC(HMAC(HMAC("AWS4" + secret, date), region), service), "aws4_request")`
///
/// `date_stamp` must be exactly eight digits (`YYYYMMDD`).
pub fn generate_signing_key(
    secret: &str,
    date_stamp: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>> {
    if secret.is_empty() {
        return Err(Error::config_invalid("secret access key is empty"));
    }
    if date_stamp.len() != 8 || !date_stamp.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::request_invalid(format!(
            "date stamp must be YYYYMMDD, got {date_stamp:?}"
        )));
    }
    if region.is_empty() {
        return Err(Error::config_invalid("region is empty"));
    }
    if service.is_empty() {
        return Err(Error::config_invalid("service is empty"));
    }

    // Sign secret
    let secret = format!("{AWS4_KEY_PREFIX}{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), date_stamp.as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    Ok(hmac_sha256(sign_service.as_slice(), AWS4_REQUEST.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mqsign_core::ErrorKind;
    use test_case::test_case;

    /// Example from "Examples of how to derive a signing key for Signature Version 4".
    #[test]
    fn test_generate_signing_key_reference() -> Result<()> {
        let key = generate_signing_key(
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            "20120215",
            "us-east-1",
            "iam",
        )?;

        assert_eq!(
            hex::encode(key),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
        Ok(())
    }

    #[test]
    fn test_generate_signing_key_is_scoped() -> Result<()> {
        let base = generate_signing_key("secret", "20240101", "eu-west-1", "sqs")?;

        assert_eq!(base, generate_signing_key("secret", "20240101", "eu-west-1", "sqs")?);
        assert_ne!(base, generate_signing_key("secret", "20240102", "eu-west-1", "sqs")?);
        assert_ne!(base, generate_signing_key("secret", "20240101", "eu-west-2", "sqs")?);
        assert_ne!(base, generate_signing_key("secret", "20240101", "eu-west-1", "sns")?);
        Ok(())
    }

    #[test_case("", "20240101", "eu-west-1", "sqs", ErrorKind::ConfigInvalid; "empty secret")]
    #[test_case("secret", "2024011", "eu-west-1", "sqs", ErrorKind::RequestInvalid; "short date")]
    #[test_case("secret", "2024-01-01", "eu-west-1", "sqs", ErrorKind::RequestInvalid; "separated date")]
    #[test_case("secret", "20240101", "", "sqs", ErrorKind::ConfigInvalid; "empty region")]
    #[test_case("secret", "20240101", "eu-west-1", "", ErrorKind::ConfigInvalid; "empty service")]
    fn test_generate_signing_key_rejects(
        secret: &str,
        date: &str,
        region: &str,
        service: &str,
        kind: ErrorKind,
    ) {
        let err = generate_signing_key(secret, date, region, service).expect_err("must fail");
        assert_eq!(err.kind(), kind);
    }
}
