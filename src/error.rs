//! Error types for the overlay.
//!
//! Operational paths (editing, segmentation, synchronization) never fail; the
//! error type only covers configuration and explicit parsing entry points.

use std::fmt;

/// Result type alias for overlay operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for overlay operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A string that was required to be a color could not be parsed as one.
    InvalidColor(String),
    /// An option value is outside its accepted domain.
    InvalidOption {
        name: &'static str,
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColor(s) => write!(f, "invalid color format: {s}"),
            Self::InvalidOption { name, reason } => {
                write!(f, "invalid option `{name}`: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidColor("not-a-color".to_string());
        assert!(err.to_string().contains("invalid color format"));

        let err = Error::InvalidOption {
            name: "rows",
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(err.to_string(), "invalid option `rows`: must be at least 1");
    }
}
