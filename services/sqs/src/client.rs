use crate::constants::{ALL_ATTRIBUTES, API_VERSION, POLICY_ATTRIBUTE, SERVICE};
use crate::message::{verify_md5, Message};
use crate::policy::sns_topic_policy;
use crate::ReceiveOptions;
use http::Method;
use mqsign_aws_v4::{request_id, Client, Config, Dispatch, Params};
use mqsign_core::{Result, XmlNode};
use std::collections::BTreeMap;

/// Queue facade.
///
/// Every operation returns `D::Output`: the result itself for
/// [`Blocking`](mqsign_aws_v4::Blocking), a future of it for
/// [`Cooperative`](mqsign_aws_v4::Cooperative).
#[derive(Debug, Clone)]
pub struct Sqs<D> {
    client: Client<D>,
}

impl<D: Dispatch> Sqs<D> {
    /// Create a queue facade from `config` with given dispatch strategy.
    pub fn new(config: &Config, dispatcher: D) -> Result<Self> {
        Ok(Self::from_client(Client::new(config, SERVICE, dispatcher)?))
    }

    /// Create a queue facade on top of an existing client.
    pub fn from_client(client: Client<D>) -> Self {
        Self { client }
    }

    /// The underlying client.
    pub fn client(&self) -> &Client<D> {
        &self.client
    }

    fn params(action: &str) -> Params {
        Params::new(action, API_VERSION)
    }

    /// Long poll `queue_url` for one message.
    ///
    /// Resolves to `None` when the wait window passed without a message.
    pub fn receive_message(
        &self,
        queue_url: &str,
        opts: ReceiveOptions,
    ) -> D::Output<Option<Message>> {
        let opts = opts.with_max_number_of_messages(1);
        self.client.call(
            Method::GET,
            queue_url,
            receive_params(&opts),
            |root: &XmlNode| {
                let result = root.require(&["ReceiveMessageResult"])?;
                result.child("Message").map(Message::from_node).transpose()
            },
        )
    }

    /// Long poll `queue_url` for up to `opts.max_number_of_messages` messages.
    pub fn receive_messages(
        &self,
        queue_url: &str,
        opts: ReceiveOptions,
    ) -> D::Output<Vec<Message>> {
        self.client.call(
            Method::GET,
            queue_url,
            receive_params(&opts),
            |root: &XmlNode| {
                root.require(&["ReceiveMessageResult"])?
                    .children_named("Message")
                    .map(Message::from_node)
                    .collect::<Result<Vec<_>>>()
            },
        )
    }

    /// Send `body` to `queue_url` and return the message id.
    ///
    /// The digest reported by the service is checked against the local one.
    pub fn send_message(&self, queue_url: &str, body: &str) -> D::Output<String> {
        let sent = body.to_string();
        self.client.call(
            Method::POST,
            queue_url,
            Self::params("SendMessage").push("MessageBody", body),
            move |root: &XmlNode| {
                let result = root.require(&["SendMessageResult"])?;
                verify_md5(&sent, &result.require_text(&["MD5OfMessageBody"])?)?;
                result.require_text(&["MessageId"])
            },
        )
    }

    /// Delete the message identified by `receipt_handle`.
    pub fn delete_message(&self, queue_url: &str, receipt_handle: &str) -> D::Output<String> {
        self.client.call(
            Method::GET,
            queue_url,
            Self::params("DeleteMessage").push("ReceiptHandle", receipt_handle),
            request_id,
        )
    }

    /// Hide the message identified by `receipt_handle` for `visibility_timeout` more seconds.
    pub fn change_message_visibility(
        &self,
        queue_url: &str,
        receipt_handle: &str,
        visibility_timeout: u32,
    ) -> D::Output<String> {
        self.client.call(
            Method::GET,
            queue_url,
            Self::params("ChangeMessageVisibility")
                .push("ReceiptHandle", receipt_handle)
                .push("VisibilityTimeout", visibility_timeout.to_string()),
            request_id,
        )
    }

    /// Create queue `name`, or return the url of the existing one.
    pub fn create_queue<I, K, V>(&self, name: &str, attributes: I) -> D::Output<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.client.call(
            Method::GET,
            "",
            Self::params("CreateQueue")
                .push("QueueName", name)
                .push_attributes("Attribute", attributes),
            |root: &XmlNode| root.require_text(&["CreateQueueResult", "QueueUrl"]),
        )
    }

    /// Delete `queue_url` whether it is empty or not.
    pub fn delete_queue(&self, queue_url: &str) -> D::Output<String> {
        self.client
            .call(Method::GET, queue_url, Self::params("DeleteQueue"), request_id)
    }

    /// Look up the url of queue `name`.
    pub fn get_queue_url(&self, name: &str) -> D::Output<String> {
        self.client.call(
            Method::GET,
            "",
            Self::params("GetQueueUrl").push("QueueName", name),
            |root: &XmlNode| root.require_text(&["GetQueueUrlResult", "QueueUrl"]),
        )
    }

    /// Fetch the attributes `names` of `queue_url`, every attribute if `names` is empty.
    pub fn get_queue_attributes(
        &self,
        queue_url: &str,
        names: &[&str],
    ) -> D::Output<BTreeMap<String, String>> {
        let names: Vec<&str> = if names.is_empty() {
            vec![ALL_ATTRIBUTES]
        } else {
            names.to_vec()
        };
        self.client.call(
            Method::GET,
            queue_url,
            Self::params("GetQueueAttributes").push_list("AttributeName", names),
            |root: &XmlNode| {
                root.require(&["GetQueueAttributesResult"])?
                    .children_named("Attribute")
                    .map(|attr| Ok((attr.require_text(&["Name"])?, attr.require_text(&["Value"])?)))
                    .collect::<Result<BTreeMap<_, _>>>()
            },
        )
    }

    /// Set the given attributes of `queue_url`.
    pub fn set_queue_attributes<I, K, V>(&self, queue_url: &str, attributes: I) -> D::Output<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.client.call(
            Method::GET,
            queue_url,
            Self::params("SetQueueAttributes").push_attributes("Attribute", attributes),
            request_id,
        )
    }

    /// Grant `account_ids` the actions `action_names` on `queue_url` under `label`.
    pub fn add_permission(
        &self,
        queue_url: &str,
        account_ids: &[&str],
        action_names: &[&str],
        label: &str,
    ) -> D::Output<String> {
        self.client.call(
            Method::GET,
            queue_url,
            Self::params("AddPermission")
                .push("Label", label)
                .push_list("AWSAccountId", account_ids.iter().copied())
                .push_list("ActionName", action_names.iter().copied()),
            request_id,
        )
    }

    /// Let topic `topic_arn` publish into the queue `queue_arn` at `queue_url`.
    ///
    /// Replaces the queue policy.
    pub fn allow_sns_topic(
        &self,
        queue_url: &str,
        queue_arn: &str,
        topic_arn: &str,
    ) -> D::Output<String> {
        let policy = sns_topic_policy(queue_arn, topic_arn);
        self.set_queue_attributes(queue_url, [(POLICY_ATTRIBUTE, policy)])
    }
}

fn receive_params(opts: &ReceiveOptions) -> Params {
    Params::new("ReceiveMessage", API_VERSION)
        .push("WaitTimeSeconds", opts.wait_time_seconds.to_string())
        .push("MaxNumberOfMessages", opts.max_number_of_messages.to_string())
        .push("VisibilityTimeout", opts.visibility_timeout.to_string())
        .push_list("AttributeName", opts.attribute_names.iter().cloned())
}
