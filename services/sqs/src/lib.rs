//! Queue facade for the mqsign signing pipeline.
//!
//! [`Sqs`] builds the parameters of every queue operation and the function
//! extracting its result; signing, dispatch and error decoding are left to
//! [`mqsign_aws_v4::Client`].
//!
//! ## Example
//!
//! ```no_run
//! use mqsign_aws_v4::{Config, Cooperative};
//! use mqsign_sqs::{ReceiveOptions, Sqs};
//! # use bytes::Bytes;
//! # use mqsign_core::{HttpSend, Result};
//! # #[derive(Debug)]
//! # struct Transport;
//! # #[async_trait::async_trait]
//! # impl HttpSend for Transport {
//! #     async fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
//! #         unimplemented!()
//! #     }
//! # }
//!
//! # async fn example() -> Result<()> {
//! let config = Config::default()
//!     .with_region("us-east-1")
//!     .with_credential("access_key_id", "secret_access_key");
//! let sqs = Sqs::new(&config, Cooperative::new(Transport))?;
//!
//! let queue_url = sqs.create_queue("orders", [("VisibilityTimeout", "60")]).await?;
//! sqs.send_message(&queue_url, "hello").await?;
//!
//! // Poll until a message shows up; every call waits up to 15 seconds.
//! loop {
//!     if let Some(msg) = sqs.receive_message(&queue_url, ReceiveOptions::default()).await? {
//!         println!("got {}", msg.body);
//!         sqs.delete_message(&queue_url, &msg.receipt_handle).await?;
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{API_VERSION, SERVICE};

mod message;
pub use message::{Message, ReceiveOptions};

mod policy;
pub use policy::sns_topic_policy;

mod client;
pub use client::Sqs;
