use crate::constants::API_VERSION;
use mqsign_aws_v4::Params;
use serde_json::Value;

/// Where a message is published to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Every subscriber of a topic.
    Topic(String),
    /// A single endpoint, like a mobile platform endpoint.
    Target(String),
}

/// Content of a published message.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// The same text for every protocol.
    Text(String),
    /// One message per protocol, keyed by protocol name with a `default` entry,
    /// like `{"default": "hi", "email": "hello there"}`.
    PerProtocol(Value),
}

/// A message to publish.
#[derive(Debug, Clone, PartialEq)]
pub struct Publish {
    destination: Destination,
    content: Content,
    subject: Option<String>,
}

impl Publish {
    /// Publish `message` to every subscriber of `topic_arn`.
    pub fn to_topic(topic_arn: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            Destination::Topic(topic_arn.into()),
            Content::Text(message.into()),
        )
    }

    /// Publish `message` to the single endpoint `target_arn`.
    pub fn to_target(target_arn: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            Destination::Target(target_arn.into()),
            Content::Text(message.into()),
        )
    }

    /// Publish `content` to `destination`.
    pub fn new(destination: Destination, content: Content) -> Self {
        Self {
            destination,
            content,
            subject: None,
        }
    }

    /// Set the subject used by email endpoints.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub(crate) fn params(&self) -> Params {
        let params = Params::new("Publish", API_VERSION);
        let params = match &self.destination {
            Destination::Topic(arn) => params.push("TopicArn", arn.as_str()),
            Destination::Target(arn) => params.push("TargetArn", arn.as_str()),
        };
        let params = match &self.content {
            Content::Text(text) => params.push("Message", text.as_str()),
            Content::PerProtocol(value) => params
                .push("Message", value.to_string())
                .push("MessageStructure", "json"),
        };
        params.push_opt("Subject", self.subject.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_text_to_topic() {
        let params = Publish::to_topic("arn:aws:sns:us-east-1:123456789012:events", "hello")
            .with_subject("greeting")
            .params();

        assert_eq!(params.get("TopicArn"), Some("arn:aws:sns:us-east-1:123456789012:events"));
        assert_eq!(params.get("TargetArn"), None);
        assert_eq!(params.get("Message"), Some("hello"));
        assert_eq!(params.get("MessageStructure"), None);
        assert_eq!(params.get("Subject"), Some("greeting"));
    }

    #[test]
    fn test_per_protocol_to_target() {
        let params = Publish::new(
            Destination::Target("arn:aws:sns:us-east-1:123456789012:endpoint/GCM/app/1".into()),
            Content::PerProtocol(json!({"default": "hi"})),
        )
        .params();

        assert_eq!(params.get("TopicArn"), None);
        assert_eq!(params.get("Message"), Some(r#"{"default":"hi"}"#));
        assert_eq!(params.get("MessageStructure"), Some("json"));
        assert_eq!(params.get("Subject"), None);
    }
}
