//! Endpoint and credential model
//!
//! An R2 account is addressed through an account-scoped S3 endpoint. The
//! region and signing scheme are fixed for R2; only the account id (or an
//! explicit endpoint override) changes where requests go.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Region token accepted by R2 in place of a geographic region
pub const R2_REGION: &str = "auto";

/// Host suffix of the account-scoped R2 S3 endpoint
pub const R2_HOST_SUFFIX: &str = "r2.cloudflarestorage.com";

/// Build the R2 endpoint URL for an account id
pub fn r2_endpoint_url(account_id: &str) -> String {
    format!("https://{account_id}.{R2_HOST_SUFFIX}")
}

/// Request signing scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureVersion {
    /// AWS Signature Version 4
    #[default]
    V4,
}

impl SignatureVersion {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V4 => "v4",
        }
    }
}

impl fmt::Display for SignatureVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static credentials for one R2 account
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub account_id: String,
}

impl Credentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            account_id: account_id.into(),
        }
    }
}

// Never leak the secret through logs or `{:?}`.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// Where and how requests are sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Base URL of the S3 API
    pub url: String,

    /// Region token used in the signing scope
    pub region: String,

    /// Signing scheme
    pub signature: SignatureVersion,
}

impl Endpoint {
    /// Endpoint for an R2 account
    pub fn for_account(account_id: &str) -> Result<Self> {
        let account_id = account_id.trim();
        if account_id.is_empty() {
            return Err(Error::Config("account id must not be empty".into()));
        }
        Self::with_url(r2_endpoint_url(account_id))
    }

    /// Endpoint at an explicit URL, keeping the R2 region and signature
    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        validate_endpoint_url(&url)?;
        Ok(Self {
            url,
            region: R2_REGION.to_string(),
            signature: SignatureVersion::V4,
        })
    }
}

fn validate_endpoint_url(raw: &str) -> Result<()> {
    let parsed = Url::parse(raw)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "endpoint URL must use http or https: {raw}"
        )));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(Error::Config(format!("endpoint URL has no host: {raw}")));
    }
    Ok(())
}

/// Everything needed to build a client: credentials plus endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub credentials: Credentials,
    pub endpoint: Endpoint,
}

impl Connection {
    /// Connection to the account's own R2 endpoint
    pub fn new(credentials: Credentials) -> Result<Self> {
        let endpoint = Endpoint::for_account(&credentials.account_id)?;
        Ok(Self {
            credentials,
            endpoint,
        })
    }

    /// Connection to an explicit endpoint URL
    pub fn with_endpoint_url(credentials: Credentials, url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            credentials,
            endpoint: Endpoint::with_url(url)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(account_id: &str) -> Credentials {
        Credentials::new("AKID", "s3cr3t", account_id)
    }

    #[test]
    fn test_endpoint_for_account() {
        let endpoint = Endpoint::for_account("abc123").unwrap();
        assert_eq!(endpoint.url, "https://abc123.r2.cloudflarestorage.com");
        assert_eq!(endpoint.region, "auto");
        assert_eq!(endpoint.signature, SignatureVersion::V4);
    }

    #[test]
    fn test_account_id_only_changes_url() {
        let a = Connection::new(creds("account-a")).unwrap();
        let b = Connection::new(creds("account-b")).unwrap();

        assert_ne!(a.endpoint.url, b.endpoint.url);
        assert_eq!(a.endpoint.region, b.endpoint.region);
        assert_eq!(a.endpoint.signature, b.endpoint.signature);
        assert_eq!(b.endpoint.url, "https://account-b.r2.cloudflarestorage.com");
    }

    #[test]
    fn test_empty_account_id_rejected() {
        let result = Endpoint::for_account("  ");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_endpoint_override() {
        let conn = Connection::with_endpoint_url(creds("ignored"), "http://127.0.0.1:9000").unwrap();
        assert_eq!(conn.endpoint.url, "http://127.0.0.1:9000");
        assert_eq!(conn.endpoint.region, "auto");
    }

    #[test]
    fn test_endpoint_override_rejects_bad_scheme() {
        let result = Endpoint::with_url("ftp://example.com");
        assert!(matches!(result, Err(Error::Config(_))));

        let result = Endpoint::with_url("no scheme here");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", creds("abc"));
        assert!(rendered.contains("AKID"));
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("s3cr3t"));
    }

    #[test]
    fn test_signature_display() {
        assert_eq!(SignatureVersion::V4.to_string(), "v4");
    }
}
