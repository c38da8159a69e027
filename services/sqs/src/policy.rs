use mqsign_core::hash::hex_md5;
use serde_json::json;

/// Queue policy letting the topic `topic_arn` send messages to `queue_arn`.
///
/// The statement id is the hex MD5 of `topic_arn + queue_arn`, so applying
/// the policy twice for the same pair yields the same document.
pub fn sns_topic_policy(queue_arn: &str, topic_arn: &str) -> String {
    let sid = hex_md5(format!("{topic_arn}{queue_arn}").as_bytes());

    json!({
        "Version": "2008-10-17",
        "Id": format!("{queue_arn}/SQSDefaultPolicy"),
        "Statement": [{
            "Sid": sid,
            "Effect": "Allow",
            "Principal": { "AWS": "*" },
            "Action": "SQS:SendMessage",
            "Resource": queue_arn,
            "Condition": {
                "StringLike": { "aws:SourceArn": topic_arn }
            }
        }]
    })
    .to_string()
}
