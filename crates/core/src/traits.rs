//! BucketStore trait definition
//!
//! This trait defines the one storage operation r2ls needs. It keeps the
//! listing and rendering logic decoupled from the S3 SDK.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A bucket as returned by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketInfo {
    /// Bucket name
    pub name: String,

    /// Creation timestamp, when the service reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<jiff::Timestamp>,
}

impl BucketInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            creation_date: None,
        }
    }
}

/// Trait for the bucket-listing side of an S3-compatible service
///
/// Implemented by the S3 adapter and mocked in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BucketStore: Send + Sync {
    /// List the buckets visible to the configured credentials, in service order
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_info_new() {
        let info = BucketInfo::new("my-bucket");
        assert_eq!(info.name, "my-bucket");
        assert!(info.creation_date.is_none());
    }

    #[test]
    fn test_bucket_info_json_skips_missing_date() {
        let json = serde_json::to_string(&BucketInfo::new("logs")).unwrap();
        assert_eq!(json, r#"{"name":"logs"}"#);
    }
}
