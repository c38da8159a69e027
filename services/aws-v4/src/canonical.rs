use crate::constants::{EMPTY_STRING_SHA256, X_AMZ_DATE};
use http::header::{AUTHORIZATION, HOST};
use http::{HeaderMap, Method, Uri};
use mqsign_core::hash::hex_sha256;
use mqsign_core::time::{format_date, format_iso8601, DateTime};
use mqsign_core::{Error, Result};
use std::fmt;

/// The canonical form of one outbound call at one instant.
///
/// Built fresh for every call since it embeds the signing time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    method: Method,
    host: String,
    path: String,
    query: String,
    /// Lower-cased `(name, value)` pairs sorted by name, `host` and `x-amz-date` included.
    headers: Vec<(String, String)>,
    payload_hash: String,
    amz_date: String,
    date_stamp: String,
}

impl CanonicalRequest {
    /// Build the canonical request for given method, url, headers and body at `now`.
    ///
    /// Every header already present in `headers` is signed next to `host` and
    /// `x-amz-date`, except `authorization`.
    pub fn build(
        method: &Method,
        uri: &Uri,
        headers: &HeaderMap,
        body: &[u8],
        now: DateTime,
    ) -> Result<Self> {
        // `+` means space in form encoding but not for this protocol family.
        let uri: Uri = uri
            .to_string()
            .replace('+', "%20")
            .parse()
            .map_err(|e| Error::request_invalid("invalid request url").with_source(e))?;

        let host = match (uri.host(), uri.port_u16()) {
            (Some(host), None) => host.to_string(),
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (None, _) => {
                return Err(Error::request_invalid("request url has no host")
                    .with_context(format!("url: {uri}")))
            }
        };

        let path = match uri.path() {
            "" => "/".to_string(),
            v => v.to_string(),
        };

        let query = canonical_query(uri.query().unwrap_or_default());

        let amz_date = format_iso8601(now);
        let date_stamp = format_date(now);

        let mut canonical_headers: Vec<(String, String)> = Vec::with_capacity(headers.len() + 2);
        canonical_headers.push((HOST.to_string(), host.clone()));
        canonical_headers.push((X_AMZ_DATE.to_string(), amz_date.clone()));
        for name in headers.keys() {
            if *name == HOST || *name == AUTHORIZATION || name.as_str() == X_AMZ_DATE {
                continue;
            }
            let mut values = Vec::new();
            for value in headers.get_all(name) {
                let value = value.to_str().map_err(|e| {
                    Error::request_invalid("header value is not visible ascii")
                        .with_source(e)
                        .with_context(format!("header: {name}"))
                })?;
                values.push(normalize_header_value(value));
            }
            // HeaderName is always lower case.
            canonical_headers.push((name.as_str().to_string(), values.join(",")));
        }
        canonical_headers.sort_by(|a, b| a.0.cmp(&b.0));

        let payload_hash = if body.is_empty() {
            EMPTY_STRING_SHA256.to_string()
        } else {
            hex_sha256(body)
        };

        Ok(Self {
            method: method.clone(),
            host,
            path,
            query,
            headers: canonical_headers,
            payload_hash,
            amz_date,
            date_stamp,
        })
    }

    /// Host the request is signed for, port included when present.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Canonical URI path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Canonical query string, also used as the transmitted query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Semicolon joined lower-case names of the signed headers.
    pub fn signed_headers(&self) -> String {
        self.headers
            .iter()
            .map(|(k, _)| k.as_str())
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Hex SHA256 of the request body.
    pub fn payload_hash(&self) -> &str {
        &self.payload_hash
    }

    /// Signing time as `YYYYMMDDTHHMMSSZ`.
    pub fn amz_date(&self) -> &str {
        &self.amz_date
    }

    /// Signing date as `YYYYMMDD`.
    pub fn date_stamp(&self) -> &str {
        &self.date_stamp
    }
}

impl fmt::Display for CanonicalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.method)?;
        writeln!(f, "{}", self.path)?;
        writeln!(f, "{}", self.query)?;
        for (name, value) in &self.headers {
            writeln!(f, "{name}:{value}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.signed_headers())?;
        f.write_str(&self.payload_hash)
    }
}

/// Sort `&` separated tokens as opaque strings.
///
/// Tokens are compared in their encoded form, `a=1` and `a%5B=1` are never
/// decoded first. Empty tokens are dropped.
fn canonical_query(raw: &str) -> String {
    let mut tokens: Vec<&str> = raw.split('&').filter(|v| !v.is_empty()).collect();
    tokens.sort_unstable();

    let mut f = String::with_capacity(raw.len());
    for (idx, token) in tokens.iter().enumerate() {
        if idx > 0 {
            f.push('&');
        }
        f.push_str(token);
    }
    f
}

/// Trim the value and collapse inner runs of spaces into one.
fn normalize_header_value(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
