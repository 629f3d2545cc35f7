//! Error types for trueno-raster operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating or rasterizing a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Algorithm identifier is not one of the known variants.
    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    /// Circle radius is negative, or too large for the configured limit or
    /// for the `i32` grid around the center.
    #[error("invalid radius {radius}: must be between 0 and {limit}")]
    InvalidRadius {
        /// Requested radius.
        radius: i64,
        /// Largest accepted radius.
        limit: i64,
    },

    /// A coordinate lies outside the configured grid bounds.
    #[error("coordinate '{field}' = {value} is out of range (|{field}| <= {limit})")]
    CoordinateOutOfRange {
        /// Name of the offending request field.
        field: &'static str,
        /// Requested value.
        value: i64,
        /// Largest accepted magnitude.
        limit: i64,
    },

    /// A required request field is absent.
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    /// The request body could not be decoded.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// The primitive would produce more pixels than the configured cap.
    #[error("primitive would emit about {estimated} pixels, limit is {limit}")]
    ComputationLimitExceeded {
        /// Upper-bound estimate of the pixel count.
        estimated: u64,
        /// Configured cap.
        limit: u64,
    },

    /// Unexpected fault on well-formed input. Always a defect.
    #[error("internal error: {0}")]
    Internal(String),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Invalid configuration value.
    #[error("invalid configuration value for '{key}': {message}")]
    ConfigInvalid {
        /// The configuration key with invalid value.
        key: &'static str,
        /// Error message describing why the value is invalid.
        message: String,
    },
}

impl Error {
    /// True for errors caused by the caller's input rather than by limits,
    /// configuration or defects.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownAlgorithm(_)
                | Self::InvalidRadius { .. }
                | Self::CoordinateOutOfRange { .. }
                | Self::MissingField(_)
                | Self::MalformedRequest(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownAlgorithm("foo".to_string());
        assert_eq!(err.to_string(), "unknown algorithm 'foo'");
    }

    #[test]
    fn test_radius_display() {
        let err = Error::InvalidRadius {
            radius: -1,
            limit: 100,
        };
        assert!(err.to_string().contains("-1"));
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn test_coordinate_display_names_field() {
        let err = Error::CoordinateOutOfRange {
            field: "x2",
            value: 50_000,
            limit: 10_000,
        };
        let display = err.to_string();
        assert!(display.contains("x2"));
        assert!(display.contains("50000"));
    }

    #[test]
    fn test_validation_grouping() {
        assert!(Error::MissingField("r").is_validation());
        assert!(Error::MalformedRequest("eof".into()).is_validation());
        let limit = Error::ComputationLimitExceeded {
            estimated: 10,
            limit: 5,
        };
        assert!(!limit.is_validation());
        assert!(!Error::Internal("overflow".into()).is_validation());
    }
}
