use crate::constants::{API_VERSION, SERVICE};
use crate::Publish;
use http::Method;
use mqsign_aws_v4::{request_id, Client, Config, Dispatch, Params};
use mqsign_core::{Result, XmlNode};

/// Notification facade.
///
/// Every operation targets the regional endpoint and returns `D::Output`.
#[derive(Debug, Clone)]
pub struct Sns<D> {
    client: Client<D>,
}

impl<D: Dispatch> Sns<D> {
    /// Create a notification facade from `config` with given dispatch strategy.
    pub fn new(config: &Config, dispatcher: D) -> Result<Self> {
        Ok(Self::from_client(Client::new(config, SERVICE, dispatcher)?))
    }

    /// Create a notification facade on top of an existing client.
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

    /// Create topic `name`, or return the arn of the existing one.
    pub fn create_topic(&self, name: &str) -> D::Output<String> {
        self.client.call(
            Method::GET,
            "",
            Self::params("CreateTopic").push("Name", name),
            |root: &XmlNode| root.require_text(&["CreateTopicResult", "TopicArn"]),
        )
    }

    /// Delete `topic_arn` with all its subscriptions.
    pub fn delete_topic(&self, topic_arn: &str) -> D::Output<String> {
        self.client.call(
            Method::GET,
            "",
            Self::params("DeleteTopic").push("TopicArn", topic_arn),
            request_id,
        )
    }

    /// Subscribe `endpoint` to `topic_arn` over `protocol` (`sqs`, `https`, `email`...).
    ///
    /// Resolves to the subscription arn, or to
    /// [`PENDING_CONFIRMATION`](crate::PENDING_CONFIRMATION) when the endpoint
    /// owner has to confirm first.
    pub fn subscribe(&self, endpoint: &str, topic_arn: &str, protocol: &str) -> D::Output<String> {
        self.client.call(
            Method::GET,
            "",
            Self::params("Subscribe")
                .push("Endpoint", endpoint)
                .push("Protocol", protocol)
                .push("TopicArn", topic_arn),
            |root: &XmlNode| root.require_text(&["SubscribeResult", "SubscriptionArn"]),
        )
    }

    /// Confirm a pending subscription with the `token` sent to its endpoint.
    pub fn confirm_subscription(
        &self,
        topic_arn: &str,
        token: &str,
        authenticate_on_unsubscribe: bool,
    ) -> D::Output<String> {
        self.client.call(
            Method::GET,
            "",
            Self::params("ConfirmSubscription")
                .push("TopicArn", topic_arn)
                .push("Token", token)
                .push(
                    "AuthenticateOnUnsubscribe",
                    authenticate_on_unsubscribe.to_string(),
                ),
            |root: &XmlNode| root.require_text(&["ConfirmSubscriptionResult", "SubscriptionArn"]),
        )
    }

    /// Publish a message and return its message id.
    pub fn publish(&self, publish: &Publish) -> D::Output<String> {
        self.client.call(
            Method::POST,
            "",
            publish.params(),
            |root: &XmlNode| root.require_text(&["PublishResult", "MessageId"]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PENDING_CONFIRMATION;
    use async_trait::async_trait;
    use bytes::Bytes;
    use mqsign_aws_v4::{Blocking, Cooperative};
    use mqsign_core::{BlockingHttpSend, ErrorKind, HttpSend};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    const TOPIC_ARN: &str = "arn:aws:sns:us-east-1:123456789012:events";

    #[derive(Debug, Clone)]
    struct Canned {
        body: &'static str,
        requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
    }

    impl Canned {
        fn ok(body: &'static str) -> Self {
            Self {
                body,
                requests: Arc::default(),
            }
        }

        fn respond(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            self.requests.lock().expect("lock must succeed").push(req);
            Ok(http::Response::new(Bytes::from_static(self.body.as_bytes())))
        }

        fn last(&self) -> (Method, BTreeMap<String, String>) {
            let requests = self.requests.lock().expect("lock must succeed");
            let req = requests.last().expect("must have sent a request");
            let raw = match req.uri().query() {
                Some(q) => q.as_bytes().to_vec(),
                None => req.body().to_vec(),
            };
            (
                req.method().clone(),
                form_urlencoded::parse(&raw).into_owned().collect(),
            )
        }
    }

    impl BlockingHttpSend for Canned {
        fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            self.respond(req)
        }
    }

    #[async_trait]
    impl HttpSend for Canned {
        async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            self.respond(req)
        }
    }

    fn config() -> Config {
        Config::default()
            .with_region("us-east-1")
            .with_credential("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
    }

    fn blocking(canned: &Canned) -> Sns<Blocking<Canned>> {
        Sns::new(&config(), Blocking::new(canned.clone())).expect("config must be valid")
    }

    #[test]
    fn test_create_and_delete_topic() -> Result<()> {
        let canned = Canned::ok(
            r#"<CreateTopicResponse xmlns="http://sns.amazonaws.com/doc/2010-03-31/">
  <CreateTopicResult><TopicArn>arn:aws:sns:us-east-1:123456789012:events</TopicArn></CreateTopicResult>
  <ResponseMetadata><RequestId>a8dec8b3-33a4-11df-8963-01868b7c937a</RequestId></ResponseMetadata>
</CreateTopicResponse>"#,
        );
        let sns = blocking(&canned);

        assert_eq!(sns.create_topic("events")?, TOPIC_ARN);
        let (method, params) = canned.last();
        assert_eq!(method, Method::GET);
        assert_eq!(params["Action"], "CreateTopic");
        assert_eq!(params["Version"], "2010-03-31");
        assert_eq!(params["Name"], "events");

        let canned = Canned::ok(
            r#"<DeleteTopicResponse>
  <ResponseMetadata><RequestId>f3aa9ac9-3c3d-11df-8235-9dab105e9c32</RequestId></ResponseMetadata>
</DeleteTopicResponse>"#,
        );
        assert_eq!(
            blocking(&canned).delete_topic(TOPIC_ARN)?,
            "f3aa9ac9-3c3d-11df-8235-9dab105e9c32"
        );
        Ok(())
    }

    #[test]
    fn test_subscribe_pending() -> Result<()> {
        let canned = Canned::ok(
            r#"<SubscribeResponse>
  <SubscribeResult><SubscriptionArn>pending confirmation</SubscriptionArn></SubscribeResult>
  <ResponseMetadata><RequestId>c4407779-24a4-56fa-982c-3d927f93a775</RequestId></ResponseMetadata>
</SubscribeResponse>"#,
        );
        let sns = blocking(&canned);

        let arn = sns.subscribe("ops@example.com", TOPIC_ARN, "email")?;
        assert_eq!(arn, PENDING_CONFIRMATION);
        let (_, params) = canned.last();
        assert_eq!(params["Endpoint"], "ops@example.com");
        assert_eq!(params["Protocol"], "email");
        assert_eq!(params["TopicArn"], TOPIC_ARN);
        Ok(())
    }

    #[tokio::test]
    async fn test_confirm_subscription() -> Result<()> {
        let canned = Canned::ok(
            r#"<ConfirmSubscriptionResponse>
  <ConfirmSubscriptionResult>
    <SubscriptionArn>arn:aws:sns:us-east-1:123456789012:events:80289ba6-0fd4-4079-afb4-ce8c8260f0ca</SubscriptionArn>
  </ConfirmSubscriptionResult>
  <ResponseMetadata><RequestId>7a50221f-3774-11df-a9b7-05d48da6f042</RequestId></ResponseMetadata>
</ConfirmSubscriptionResponse>"#,
        );
        let sns = Sns::new(&config(), Cooperative::new(canned.clone()))?;

        let arn = sns.confirm_subscription(TOPIC_ARN, "token", true).await?;
        assert_eq!(
            arn,
            "arn:aws:sns:us-east-1:123456789012:events:80289ba6-0fd4-4079-afb4-ce8c8260f0ca"
        );
        let (_, params) = canned.last();
        assert_eq!(params["Token"], "token");
        assert_eq!(params["AuthenticateOnUnsubscribe"], "true");
        Ok(())
    }

    #[test]
    fn test_publish_is_form_post() -> Result<()> {
        let canned = Canned::ok(
            r#"<PublishResponse>
  <PublishResult><MessageId>94f20ce6-13c5-43a0-9a9e-ca52d816e90b</MessageId></PublishResult>
  <ResponseMetadata><RequestId>f187a3c1-376f-11df-8963-01868b7c937a</RequestId></ResponseMetadata>
</PublishResponse>"#,
        );
        let sns = blocking(&canned);

        let id = sns.publish(&Publish::to_topic(TOPIC_ARN, "hello world").with_subject("hi"))?;
        assert_eq!(id, "94f20ce6-13c5-43a0-9a9e-ca52d816e90b");

        let (method, params) = canned.last();
        assert_eq!(method, Method::POST);
        assert_eq!(params["Message"], "hello world");
        assert_eq!(params["Subject"], "hi");
        Ok(())
    }

    #[test]
    fn test_unexpected_shape_is_parse_error() {
        let canned = Canned::ok("<PublishResponse><ResponseMetadata/></PublishResponse>");
        let err = blocking(&canned)
            .publish(&Publish::to_topic(TOPIC_ARN, "hello"))
            .expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
