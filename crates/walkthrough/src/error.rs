#![forbid(unsafe_code)]

//! Walkthrough error model.
//!
//! Each subsystem keeps its own typed error; [`Error`] wraps them so callers
//! of the facade can use `?` across configuration, storage and file access.
//! Navigation itself never fails, so nothing here comes from a running tour.

use std::fmt;

pub use wt_runtime::{ConfigError, StorageError};

/// Top-level error type for Walkthrough.
#[derive(Debug)]
pub enum Error {
    /// Bad configuration: missing target, malformed document, invalid option.
    Config(ConfigError),
    /// Progress storage failure surfaced by direct store access.
    Storage(StorageError),
    /// Raw I/O error (convenience variant for `?` on io::Result).
    Io(std::io::Error),
}

/// Standard result type for Walkthrough APIs.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Short label for logs and metrics.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Config(ConfigError::TargetNotFound { .. }) => "config.target",
            Self::Config(ConfigError::Validation(_)) => "config.validation",
            Self::Config(_) => "config",
            Self::Storage(_) => "storage",
            Self::Io(_) => "io",
        }
    }

    /// Whether a missing page element caused this.
    #[must_use]
    pub fn is_missing_target(&self) -> bool {
        matches!(self, Self::Config(ConfigError::TargetNotFound { .. }))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "I/O: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
