//! Error types for r2ls-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for r2ls-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for r2ls-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error: missing credential, bad config file, etc.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Connectivity failure: DNS, connection refused, timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Credentials rejected or access forbidden
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Error response or malformed body from the remote service
    #[error("Service error: {0}")]
    Service(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::InvalidUrl(_) | Error::TomlParse(_) => 2, // UsageError
            Error::Network(_) => 3,                                             // NetworkError
            Error::Auth(_) => 4,                                                // AuthError
            _ => 1,                                                             // GeneralError
        }
    }
}
