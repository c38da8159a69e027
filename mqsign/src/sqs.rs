//! Queue service support with convenience constructors.

pub use mqsign_sqs::*;

#[cfg(feature = "default-context")]
use mqsign_aws_v4::{Blocking, Config, Cooperative};
#[cfg(feature = "default-context")]
use mqsign_core::Result;
#[cfg(feature = "default-context")]
use mqsign_http_send_reqwest::{ReqwestBlockingHttpSend, ReqwestHttpSend};

/// Queue facade returning futures, backed by `reqwest::Client`.
#[cfg(feature = "default-context")]
pub type DefaultSqs = Sqs<Cooperative<ReqwestHttpSend>>;

/// Queue facade blocking the calling thread, backed by `reqwest::blocking::Client`.
#[cfg(feature = "default-context")]
pub type DefaultBlockingSqs = Sqs<Blocking<ReqwestBlockingHttpSend>>;

/// Create a queue facade using the cooperative strategy over reqwest.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> mqsign::Result<()> {
/// use mqsign::aws::Config;
///
/// let config = Config::default()
///     .with_region("eu-west-1")
///     .with_credential("access_key_id", "secret_access_key");
/// let sqs = mqsign::sqs::default_client(&config)?;
/// let url = sqs.create_queue("orders", [("DelaySeconds", "5")]).await?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "default-context")]
pub fn default_client(config: &Config) -> Result<DefaultSqs> {
    Sqs::new(config, Cooperative::new(ReqwestHttpSend::default()))
}

/// Create a queue facade using the blocking strategy over reqwest.
///
/// Must not be called from inside an async runtime.
#[cfg(feature = "default-context")]
pub fn default_blocking_client(config: &Config) -> Result<DefaultBlockingSqs> {
    Sqs::new(config, Blocking::new(ReqwestBlockingHttpSend::default()))
}

#[cfg(all(test, feature = "default-context"))]
mod tests {
    use super::*;
    use mqsign_core::ErrorKind;

    #[tokio::test]
    async fn test_default_client_requires_credential() {
        let config = Config::default().with_region("us-east-1");
        let err = default_client(&config).expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_default_blocking_client() -> Result<()> {
        let config = Config::default()
            .with_region("us-east-1")
            .with_credential("AKIDEXAMPLE", "secret");
        let sqs = default_blocking_client(&config)?;
        assert_eq!(sqs.client().endpoint(), "https://sqs.us-east-1.amazonaws.com/");
        Ok(())
    }
}
