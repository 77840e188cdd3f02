//! Error types for the key-value persistence boundary.

use std::io;

use snafu::Snafu;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during key-value store operations.
#[derive(Debug, Snafu)]
pub enum StoreError {
    /// A read operation against the underlying store failed.
    #[snafu(display("Storage read failed for key {key:?}: {message}"))]
    Read {
        /// The key being read.
        key: String,
        /// Description of the failure.
        message: String,
    },

    /// A write operation against the underlying store failed.
    #[snafu(display("Storage write failed for key {key:?}: {message}"))]
    Write {
        /// The key being written.
        key: String,
        /// Description of the failure.
        message: String,
    },

    /// The store itself is unreachable (key listing failed, backing file
    /// gone, etc.).
    #[snafu(display("Storage unavailable: {message}"))]
    Unavailable {
        /// Description of the failure.
        message: String,
    },

    /// I/O error from a file-backed store.
    #[snafu(display("I/O error: {source}"))]
    Io {
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The backing file of a file-backed store could not be encoded or
    /// decoded.
    #[snafu(display("Store serialization failed: {source}"))]
    Serialize {
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

// Provide automatic conversion from io::Error for ergonomic ? usage
impl From<io::Error> for StoreError {
    fn from(source: io::Error) -> Self {
        StoreError::Io { source }
    }
}
