//! Exit code definitions for r2ls
//!
//! By default r2ls exits 0 even when listing fails; the failure is reported
//! on stdout. With `--strict-exit` the codes below distinguish failure kinds.

use r2ls_core::Error;

/// Exit codes for the r2ls CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed successfully
    Success = 0,

    /// General/unspecified error, including service-side failures
    GeneralError = 1,

    /// Bad configuration: missing credential, invalid endpoint, bad config file
    UsageError = 2,

    /// Connectivity failure: DNS, refused connection, timeout
    NetworkError = 3,

    /// Authentication or permission failure
    AuthError = 4,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Create exit code from i32 value
    ///
    /// Returns None if the value doesn't correspond to a known exit code.
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::GeneralError),
            2 => Some(Self::UsageError),
            3 => Some(Self::NetworkError),
            4 => Some(Self::AuthError),
            _ => None,
        }
    }

    /// Exit code for a failure under strict mode
    pub const fn from_error(error: &Error) -> Self {
        match Self::from_i32(error.exit_code()) {
            Some(code) => code,
            None => Self::GeneralError,
        }
    }

    /// Get a human-readable description of the exit code
    pub const fn description(self) -> &'static str {
        match self {
            Self::Success => "Operation completed successfully",
            Self::GeneralError => "General error",
            Self::UsageError => "Invalid configuration",
            Self::NetworkError => "Network error",
            Self::AuthError => "Authentication or permission failure",
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}
