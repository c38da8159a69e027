//! Notification facade for the mqsign signing pipeline.
//!
//! ## Example
//!
//! ```no_run
//! use mqsign_aws_v4::{Blocking, Config};
//! use mqsign_sns::{Publish, Sns};
//! # use bytes::Bytes;
//! # use mqsign_core::{BlockingHttpSend, Result};
//! # #[derive(Debug)]
//! # struct Transport;
//! # impl BlockingHttpSend for Transport {
//! #     fn http_send(&self, _: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
//! #         unimplemented!()
//! #     }
//! # }
//!
//! # fn example() -> Result<()> {
//! let config = Config::default()
//!     .with_region("us-east-1")
//!     .with_credential("access_key_id", "secret_access_key");
//! let sns = Sns::new(&config, Blocking::new(Transport))?;
//!
//! let topic_arn = sns.create_topic("events")?;
//! let message_id = sns.publish(&Publish::to_topic(&topic_arn, "deployed").with_subject("ci"))?;
//! println!("published {message_id}");
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{API_VERSION, PENDING_CONFIRMATION, SERVICE};

mod publish;
pub use publish::{Content, Destination, Publish};

mod client;
pub use client::Sns;
