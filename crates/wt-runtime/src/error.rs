#![forbid(unsafe_code)]

//! Runtime error types.
//!
//! Only configuration can fail. Navigation, placement and persistence
//! degrade silently (see the tour module docs), so they have no error type
//! of their own beyond [`StorageError`], which never escapes the progress
//! gateway.

use std::fmt;

/// Configuration failures.
#[derive(Debug)]
pub enum ConfigError {
    /// A step's selector matched nothing on the page.
    TargetNotFound {
        /// Position of the step in the supplied list.
        index: usize,
        /// The selector that failed to resolve.
        selector: String,
    },
    /// I/O error reading a configuration file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config-files")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config-files")]
    Json(serde_json::Error),
    /// Option values out of range.
    Validation(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetNotFound { index, selector } => {
                write!(f, "element not found for step {index}: {selector}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config-files")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config-files")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => write!(f, "validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config-files")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config-files")]
            Self::Json(e) => Some(e),
            Self::TargetNotFound { .. } | Self::Validation(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Progress storage failures. Logged by the gateway, never returned to
/// tour callers.
#[derive(Debug)]
pub enum StorageError {
    /// Backing file could not be read or written.
    Io(std::io::Error),
    /// Stored data could not be decoded.
    Corrupt(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "storage I/O: {e}"),
            Self::Corrupt(msg) => write!(f, "corrupt progress data: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Corrupt(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;

    use super::*;

    #[test]
    fn target_not_found_message() {
        let err = ConfigError::TargetNotFound {
            index: 2,
            selector: "#missing".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("#missing"));
        assert!(msg.contains("step 2"));
        assert!(StdError::source(&err).is_none());
    }

    #[test]
    fn io_has_source() {
        let err = ConfigError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no file",
        ));
        assert!(format!("{err}").contains("no file"));
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn validation_joins() {
        let err = ConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(format!("{err}"), "validation errors: a; b");
    }

    #[test]
    fn storage_corrupt_message() {
        let err = StorageError::Corrupt("not a number".into());
        assert!(format!("{err}").contains("not a number"));
        assert!(StdError::source(&err).is_none());
    }
}
