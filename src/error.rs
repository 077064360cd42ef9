//! Error types for the vector-crt crate.
//!
//! Nothing on the per-frame path fails: overflow, out-of-range intensities and
//! off-screen geometry all degrade gracefully. Errors only come out of
//! construction-time validation.

use std::error::Error as StdError;
use std::fmt;

/// Validation error for display geometry and configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A visible area that is empty or not addressable in device units.
    InvalidArea {
        min: (i32, i32),
        max: (i32, i32),
    },

    /// Invalid configuration or API misuse.
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArea { min, max } => write!(
                f,
                "invalid visible area: ({}, {})-({}, {}) is empty or out of range",
                min.0, min.1, max.0, max.1
            ),
            Error::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl StdError for Error {}

impl Error {
    /// Create an invalid config error with a message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }

    /// Returns true if this is an InvalidConfig error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Error::InvalidConfig(_))
    }

    /// Returns true if this is an InvalidArea error.
    pub fn is_invalid_area(&self) -> bool {
        matches!(self, Error::InvalidArea { .. })
    }
}

/// Result type for vector-crt operations.
pub type Result<T> = std::result::Result<T, Error>;
