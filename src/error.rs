//! Error types for the monitor core.
//!
//! The per-tick [`render`](crate::frame::render) path is infallible: missing
//! data degrades to defaults and corrupt state becomes a cold start. These
//! errors cover the fallible edges around it (configuration files, state and
//! snapshot encoding).

use std::io;
use thiserror::Error;

/// Error type for monitor operations.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
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
        key: String,
        /// Error message describing why the value is invalid.
        message: String,
    },

    /// A platform snapshot document could not be decoded.
    #[error("invalid snapshot: {0}")]
    SnapshotDecode(String),

    /// Persisted state could not be encoded.
    #[error("failed to encode state: {0}")]
    StateEncode(#[from] serde_json::Error),

    /// Reading or writing a host-side file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for monitor operations.
pub type Result<T> = std::result::Result<T, MonitorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parse_error_includes_line_number() {
        let err = MonitorError::ConfigParse {
            line: 42,
            message: "invalid value".to_string(),
        };
        let display = err.to_string();

        assert!(display.contains("42"), "Error should include line number: {}", display);
        assert!(display.contains("invalid value"), "Error should include message: {}", display);
    }

    #[test]
    fn test_config_invalid_includes_key() {
        let err = MonitorError::ConfigInvalid {
            key: "update_ms".to_string(),
            message: "must be positive".to_string(),
        };
        assert!(err.to_string().contains("update_ms"));
    }

    #[test]
    fn test_config_not_found() {
        let err = MonitorError::ConfigNotFound("/etc/tmon.yaml".to_string());
        assert!(err.to_string().contains("/etc/tmon.yaml"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: MonitorError = io_err.into();

        assert!(matches!(err, MonitorError::Io(_)), "Should convert to Io");
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_snapshot_decode_display() {
        let err = MonitorError::SnapshotDecode("expected object".to_string());
        assert!(err.to_string().contains("expected object"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MonitorError>();
    }
}
