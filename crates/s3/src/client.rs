//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the BucketStore trait from r2ls-core.

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};

use r2ls_core::{BucketInfo, BucketStore, Connection, Error, Result};

/// Error codes S3-compatible services use for rejected credentials
const AUTH_ERROR_CODES: &[&str] = &[
    "AccessDenied",
    "InvalidAccessKeyId",
    "InvalidToken",
    "SignatureDoesNotMatch",
    "Unauthorized",
];

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
    endpoint_url: String,
}

impl S3Client {
    /// Create a new S3 client for a resolved connection
    ///
    /// Nothing is sent here; bad credentials or an unreachable endpoint
    /// surface on the first request.
    pub async fn new(connection: &Connection) -> Result<Self> {
        let endpoint = &connection.endpoint;
        let creds = &connection.credentials;

        let credentials = aws_credential_types::Credentials::new(
            &creds.access_key_id,
            &creds.secret_access_key,
            None, // session token
            None, // expiry
            "r2ls-static-credentials",
        );

        // The SDK signs with SigV4, which is the only scheme R2 accepts.
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(endpoint.region.clone()))
            .endpoint_url(&endpoint.url)
            .retry_config(RetryConfig::disabled())
            .load()
            .await;

        // R2 does not serve virtual-hosted bucket names under the account host.
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(true)
            .build();

        tracing::debug!(
            endpoint = %endpoint.url,
            region = %endpoint.region,
            signature = %endpoint.signature,
            "built S3 client"
        );

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            endpoint_url: endpoint.url.clone(),
        })
    }

    /// Endpoint URL requests are sent to
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }
}

#[async_trait]
impl BucketStore for S3Client {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        tracing::debug!(endpoint = %self.endpoint_url, "sending ListBuckets");

        let response = self
            .inner
            .list_buckets()
            .send()
            .await
            .map_err(classify_sdk_error)?;

        // An absent <Buckets> element reads as an empty slice.
        response
            .buckets()
            .iter()
            .map(|b| -> Result<BucketInfo> {
                let name = b.name().ok_or_else(|| {
                    Error::Service("bucket entry without a name in ListBuckets response".into())
                })?;
                Ok(BucketInfo {
                    name: name.to_string(),
                    creation_date: b.creation_date().and_then(to_timestamp),
                })
            })
            .collect()
    }
}

fn to_timestamp(date: &aws_smithy_types::DateTime) -> Option<jiff::Timestamp> {
    jiff::Timestamp::new(date.secs(), date.subsec_nanos() as i32).ok()
}

/// Broad failure classes a request can end in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Auth,
    Service,
}

/// Classify a service error response by HTTP status and S3 error code
pub fn classify_response(status: u16, code: Option<&str>) -> FailureKind {
    let auth_code = code.is_some_and(|c| AUTH_ERROR_CODES.contains(&c));
    if status == 401 || status == 403 || auth_code {
        FailureKind::Auth
    } else {
        FailureKind::Service
    }
}

/// Map an SDK error onto the r2ls error taxonomy
pub fn classify_sdk_error<E>(err: SdkError<E, HttpResponse>) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let (kind, description) = match &err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            (FailureKind::Network, error_chain(&err))
        }
        SdkError::ServiceError(ctx) => {
            let status = ctx.raw().status().as_u16();
            let kind = classify_response(status, err.code());
            let description = match (err.code(), err.message()) {
                (Some(code), Some(message)) => format!("{code}: {message} (HTTP {status})"),
                (Some(code), None) => format!("{code} (HTTP {status})"),
                _ => format!("{} (HTTP {status})", error_chain(&err)),
            };
            (kind, description)
        }
        _ => (FailureKind::Service, error_chain(&err)),
    };

    tracing::debug!(?kind, "request failed: {description}");

    match kind {
        FailureKind::Network => Error::Network(description),
        FailureKind::Auth => Error::Auth(description),
        FailureKind::Service => Error::Service(description),
    }
}

/// Display texts of an error and its sources, joined with ": "
///
/// Adjacent duplicates are dropped; some wrappers repeat their source's text.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut current = Some(err);
    while let Some(e) = current {
        let text = e.to_string();
        if !text.is_empty() && parts.last() != Some(&text) {
            parts.push(text);
        }
        current = e.source();
    }
    parts.join(": ")
}
