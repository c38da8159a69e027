use crate::Credential;
use mqsign_core::utils::Redact;
use mqsign_core::{Error, Result};
use serde::Deserialize;
use std::fmt::{Debug, Formatter};

/// Config carries everything a client needs to sign and address its calls.
///
/// Credentials are never sourced from the environment; callers fill this
/// struct themselves or deserialize it from their own configuration file.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Region the client talks to, like `us-east-1`.
    pub region: Option<String>,
    /// Public access key id.
    pub access_key_id: Option<String>,
    /// Secret access key, only used to derive signing keys.
    pub secret_access_key: Option<String>,
    /// Endpoint override, like `http://localhost:4566/`.
    ///
    /// Defaults to `https://<service>.<region>.amazonaws.com/`.
    pub endpoint: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field(
                "access_key_id",
                &self.access_key_id.as_ref().map(Redact::from),
            )
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(Redact::from),
            )
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Config {
    /// Set the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the access key id and the secret access key.
    pub fn with_credential(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Set the endpoint override.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Validated region.
    pub(crate) fn region(&self) -> Result<&str> {
        match self.region.as_deref() {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(Error::config_invalid("region is required")),
        }
    }

    /// Validated credential.
    pub(crate) fn credential(&self) -> Result<Credential> {
        let ak = match self.access_key_id.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => return Err(Error::config_invalid("access key id is required")),
        };
        let sk = match self.secret_access_key.as_deref() {
            Some(v) if !v.is_empty() => v,
            _ => return Err(Error::config_invalid("secret access key is required")),
        };
        Ok(Credential::new(ak, sk))
    }

    /// Endpoint for `service`, always ending with `/`.
    pub(crate) fn endpoint(&self, service: &str) -> Result<String> {
        let endpoint = match self.endpoint.as_deref() {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => {
                let region = self.region()?;
                let domain = if region.starts_with("cn-") {
                    "amazonaws.com.cn"
                } else {
                    "amazonaws.com"
                };
                format!("https://{service}.{region}.{domain}/")
            }
        };

        if endpoint.ends_with('/') {
            Ok(endpoint)
        } else {
            Ok(format!("{endpoint}/"))
        }
    }
}
