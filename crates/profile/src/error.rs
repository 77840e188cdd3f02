//! Error types for profile data operations.

use placeway_store::StoreError;
use placeway_types::KeyError;
use snafu::Snafu;

/// Result type for profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;

/// Errors returned by profile data operations.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ProfileError {
    /// An owner id or field name failed validation.
    #[snafu(display("Key error: {source}"))]
    Key {
        /// The underlying identifier validation error.
        source: KeyError,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    /// Underlying key-value store operation failed.
    #[snafu(display("Storage error: {source}"))]
    Storage {
        /// The underlying store error.
        source: StoreError,
        #[snafu(implicit)]
        location: snafu::Location,
    },

    /// Conversion between a field value and a typed structure failed.
    #[snafu(display("Codec error for field {field:?}: {source}"))]
    Codec {
        /// The field being converted.
        field: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A migration was asked to target the reserved visitor owner.
    ///
    /// Migrating the visitor namespace onto itself would make the cleanup
    /// step erase the data just copied.
    #[snafu(display("Migration target must not be the reserved visitor owner"))]
    VisitorTarget,
}
