use crate::constants::ALL_ATTRIBUTES;
use mqsign_core::hash::hex_md5;
use mqsign_core::{Error, Result, XmlNode};
use std::collections::BTreeMap;

/// A message received from a queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Identifier assigned by the queue when the message was sent.
    pub message_id: String,
    /// Message body as sent.
    pub body: String,
    /// Hex MD5 of the body, already checked against `body`.
    pub md5_of_body: String,
    /// Handle needed to delete the message or change its visibility.
    ///
    /// A new handle is issued on every receive.
    pub receipt_handle: String,
    /// System attributes like `SentTimestamp` or `ApproximateReceiveCount`.
    pub attributes: BTreeMap<String, String>,
}

impl Message {
    /// Extract a message from a `<Message>` element, checking its body digest.
    pub(crate) fn from_node(node: &XmlNode) -> Result<Self> {
        let message_id = node.require_text(&["MessageId"])?;
        let body = node.require_text(&["Body"])?;
        let md5_of_body = node.require_text(&["MD5OfBody"])?;
        let receipt_handle = node.require_text(&["ReceiptHandle"])?;

        verify_md5(&body, &md5_of_body)
            .map_err(|e| e.with_context(format!("message_id: {message_id}")))?;

        let attributes = node
            .children_named("Attribute")
            .map(|attr| {
                Ok((
                    attr.require_text(&["Name"])?,
                    attr.require_text(&["Value"])?,
                ))
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            message_id,
            body,
            md5_of_body,
            receipt_handle,
            attributes,
        })
    }
}

/// Check the service computed the same digest as we do for `body`.
pub(crate) fn verify_md5(body: &str, expected: &str) -> Result<()> {
    let actual = hex_md5(body.as_bytes());
    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(Error::parse("message body does not match its MD5 digest")
            .with_context(format!("expected: {expected}"))
            .with_context(format!("actual: {actual}")))
    }
}

/// Options of a long poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiveOptions {
    /// Seconds the service holds the call open waiting for a message.
    pub wait_time_seconds: u32,
    /// Upper bound of messages returned by one call, 1 to 10.
    pub max_number_of_messages: u32,
    /// Seconds received messages stay hidden from other receivers.
    pub visibility_timeout: u32,
    /// System attributes to return with every message.
    pub attribute_names: Vec<String>,
}

impl Default for ReceiveOptions {
    fn default() -> Self {
        Self {
            wait_time_seconds: 15,
            max_number_of_messages: 1,
            visibility_timeout: 300,
            attribute_names: vec![ALL_ATTRIBUTES.to_string()],
        }
    }
}

impl ReceiveOptions {
    /// Set the long poll window.
    pub fn with_wait_time_seconds(mut self, v: u32) -> Self {
        self.wait_time_seconds = v;
        self
    }

    /// Set the maximum number of messages.
    pub fn with_max_number_of_messages(mut self, v: u32) -> Self {
        self.max_number_of_messages = v;
        self
    }

    /// Set the visibility timeout.
    pub fn with_visibility_timeout(mut self, v: u32) -> Self {
        self.visibility_timeout = v;
        self
    }
}
