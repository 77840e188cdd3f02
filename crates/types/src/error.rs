//! Error types for identifier validation using snafu.

use snafu::Snafu;

/// Result type alias for identifier construction.
pub type Result<T> = std::result::Result<T, KeyError>;

/// Errors raised while validating the components of a storage key.
///
/// Every key-scoped operation takes pre-validated [`crate::OwnerId`] and
/// [`crate::FieldName`] values, so these errors surface exactly once, at
/// construction, and never deeper in the data layer.
#[derive(Debug, Snafu)]
pub enum KeyError {
    /// An empty or malformed owner id was supplied.
    ///
    /// Guards against writing to a global, un-owned key: call sites that
    /// have no account must pass the reserved visitor owner explicitly.
    #[snafu(display("Invalid owner id: {reason}"))]
    InvalidOwner {
        /// Why the owner id was rejected.
        reason: String,
    },

    /// An empty or malformed field name was supplied.
    #[snafu(display("Invalid field name: {reason}"))]
    InvalidField {
        /// Why the field name was rejected.
        reason: String,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_owner() {
        let err = KeyError::InvalidOwner { reason: "owner id is empty".to_string() };
        assert_eq!(format!("{err}"), "Invalid owner id: owner id is empty");
    }

    #[test]
    fn test_error_display_invalid_field() {
        let err = KeyError::InvalidField { reason: "field name contains ':'".to_string() };
        assert_eq!(format!("{err}"), "Invalid field name: field name contains ':'");
    }
}
