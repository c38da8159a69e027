//! Signed calls to cloud queueing and notification APIs.
//!
//! ```no_run
//! # #[cfg(all(feature = "sqs", feature = "default-context"))]
//! # async fn example() -> mqsign::Result<()> {
//! use mqsign::aws::Config;
//! use mqsign::sqs::ReceiveOptions;
//!
//! let config = Config::default()
//!     .with_region("us-east-1")
//!     .with_credential("access_key_id", "secret_access_key");
//! let sqs = mqsign::sqs::default_client(&config)?;
//!
//! let queue_url = sqs.get_queue_url("orders").await?;
//! if let Some(msg) = sqs.receive_message(&queue_url, ReceiveOptions::default()).await? {
//!     sqs.delete_message(&queue_url, &msg.receipt_handle).await?;
//! }
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use mqsign_core::*;

#[cfg(feature = "default-context")]
pub use mqsign_http_send_reqwest::{ReqwestBlockingHttpSend, ReqwestHttpSend};

#[cfg(feature = "aws")]
pub mod aws {
    pub use mqsign_aws_v4::*;
}

#[cfg(feature = "sqs")]
pub mod sqs;

#[cfg(feature = "sns")]
pub mod sns;
