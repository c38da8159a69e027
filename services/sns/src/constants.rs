/// Service namespace used in endpoints and credential scopes.
pub const SERVICE: &str = "sns";
/// Query API version every call is made against.
pub const API_VERSION: &str = "2010-03-31";

/// `SubscriptionArn` returned while a subscription waits for confirmation.
pub const PENDING_CONFIRMATION: &str = "pending confirmation";
