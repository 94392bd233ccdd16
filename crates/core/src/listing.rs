//! Bucket listing and its console rendering
//!
//! `list_buckets` never fails: any error from the store is folded into
//! [`ListOutcome::Failed`] so the caller handles both variants explicitly.
//!
//! Rendered form on success:
//!
//! ```text
//! Buckets:
//!   - alpha
//!   - beta
//! ```
//!
//! and on failure a single `Error: <description>` line.

use std::io::{self, Write};

use crate::traits::{BucketInfo, BucketStore};
use crate::Error;

/// Header line printed before the bucket names
pub const BUCKETS_HEADER: &str = "Buckets:";

/// Prefix of each bucket line
pub const BUCKET_LINE_PREFIX: &str = "  - ";

/// Prefix of the failure line
pub const ERROR_PREFIX: &str = "Error: ";

/// Result of one listing attempt
#[derive(Debug)]
pub enum ListOutcome {
    /// The service answered; possibly with zero buckets
    Buckets(Vec<BucketInfo>),

    /// The call failed; the error is kept for exit-code mapping
    Failed(Error),
}

impl ListOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ListOutcome::Buckets(_))
    }

    /// Write the console form of this outcome
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            ListOutcome::Buckets(buckets) => {
                writeln!(out, "{BUCKETS_HEADER}")?;
                for bucket in buckets {
                    writeln!(out, "{BUCKET_LINE_PREFIX}{}", bucket.name)?;
                }
            }
            ListOutcome::Failed(e) => writeln!(out, "{ERROR_PREFIX}{}", describe(e))?,
        }
        Ok(())
    }

    /// Console form as a string
    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Error text collapsed onto one line, never empty
pub fn describe(error: &Error) -> String {
    let text = error
        .to_string()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        "unknown error".to_string()
    } else {
        text
    }
}

/// Perform one list-buckets call against `store`
pub async fn list_buckets(store: &dyn BucketStore) -> ListOutcome {
    match store.list_buckets().await {
        Ok(buckets) => {
            tracing::debug!(count = buckets.len(), "listed buckets");
            ListOutcome::Buckets(buckets)
        }
        Err(e) => {
            tracing::debug!(error = %e, "list buckets failed");
            ListOutcome::Failed(e)
        }
    }
}
