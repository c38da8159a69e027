use crate::constants::AWS_QUERY_ENCODE_SET;
use percent_encoding::utf8_percent_encode;

/// Parameters of one query-protocol call.
///
/// Built fresh for every call, starting from `Action` and `Version`. Values
/// are kept raw and only encoded by [`Params::encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    /// Create parameters for `action` of the API `version`.
    pub fn new(action: &str, version: &str) -> Self {
        Self {
            pairs: vec![
                ("Action".to_string(), action.to_string()),
                ("Version".to_string(), version.to_string()),
            ],
        }
    }

    /// Append a single parameter.
    pub fn push(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Append a parameter if `value` is present.
    pub fn push_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.push(key, v),
            None => self,
        }
    }

    /// Append a list as `<prefix>.1`, `<prefix>.2`, ...
    pub fn push_list<I, V>(mut self, prefix: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        for (idx, value) in values.into_iter().enumerate() {
            self.pairs.push((format!("{prefix}.{}", idx + 1), value.into()));
        }
        self
    }

    /// Append a map as `<prefix>.N.Name` and `<prefix>.N.Value` pairs.
    pub fn push_attributes<I, K, V>(mut self, prefix: &str, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (idx, (name, value)) in attributes.into_iter().enumerate() {
            let n = idx + 1;
            self.pairs.push((format!("{prefix}.{n}.Name"), name.into()));
            self.pairs.push((format!("{prefix}.{n}.Value"), value.into()));
        }
        self
    }

    /// Value of the first parameter named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The `Action` of this call.
    pub fn action(&self) -> &str {
        self.get("Action").unwrap_or_default()
    }

    /// Encode as `k=v&k=v` in insertion order.
    ///
    /// Keys and values are percent-encoded with the SigV4 unreserved set, so
    /// a space always becomes `%20`.
    pub fn encode(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET),
                    utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}
