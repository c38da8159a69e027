//! Notification service support with convenience constructors.

pub use mqsign_sns::*;

#[cfg(feature = "default-context")]
use mqsign_aws_v4::{Blocking, Config, Cooperative};
#[cfg(feature = "default-context")]
use mqsign_core::Result;
#[cfg(feature = "default-context")]
use mqsign_http_send_reqwest::{ReqwestBlockingHttpSend, ReqwestHttpSend};

/// Notification facade returning futures, backed by `reqwest::Client`.
#[cfg(feature = "default-context")]
pub type DefaultSns = Sns<Cooperative<ReqwestHttpSend>>;

/// Notification facade blocking the calling thread, backed by `reqwest::blocking::Client`.
#[cfg(feature = "default-context")]
pub type DefaultBlockingSns = Sns<Blocking<ReqwestBlockingHttpSend>>;

/// Create a notification facade using the cooperative strategy over reqwest.
#[cfg(feature = "default-context")]
pub fn default_client(config: &Config) -> Result<DefaultSns> {
    Sns::new(config, Cooperative::new(ReqwestHttpSend::default()))
}

/// Create a notification facade using the blocking strategy over reqwest.
///
/// Must not be called from inside an async runtime.
#[cfg(feature = "default-context")]
pub fn default_blocking_client(config: &Config) -> Result<DefaultBlockingSns> {
    Sns::new(config, Blocking::new(ReqwestBlockingHttpSend::default()))
}
