/// Service namespace used in endpoints and credential scopes.
pub const SERVICE: &str = "sqs";
/// Query API version every call is made against.
pub const API_VERSION: &str = "2012-11-05";

/// Attribute name selecting every attribute.
pub const ALL_ATTRIBUTES: &str = "All";
/// Attribute carrying the access policy of a queue.
pub const POLICY_ATTRIBUTE: &str = "Policy";
