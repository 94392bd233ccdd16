//! r2ls-core: Core library for the r2ls bucket lister
//!
//! This crate provides:
//! - Configuration loading and credential resolution
//! - R2 endpoint derivation
//! - The BucketStore trait
//! - Listing outcome and its console rendering
//!
//! It does not depend on any S3 SDK, so the listing logic can be tested
//! against mocks.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod listing;
pub mod traits;

pub use config::{Config, ConfigManager, R2Section};
pub use endpoint::{Connection, Credentials, Endpoint, SignatureVersion};
pub use error::{Error, Result};
pub use listing::{ListOutcome, list_buckets};
pub use traits::{BucketInfo, BucketStore};
