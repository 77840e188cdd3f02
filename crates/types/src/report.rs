//! Report value objects describing the outcome of migration attempts.

use serde::{Deserialize, Serialize};

/// Outcome of one visitor-to-account migration attempt.
///
/// `migrated` is true iff `count > 0`: at least one non-authentication
/// field was actually copied to the target namespace. A cleanup failure
/// after a successful copy is non-fatal and lands in `cleanup_error`
/// without touching `migrated` or `count`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MigrationReport {
    /// Whether any fields were copied to the target namespace.
    pub migrated: bool,
    /// Number of fields successfully copied.
    pub count: usize,
    /// Number of authentication-only fields skipped (never copied).
    pub skipped: usize,
    /// Last per-field copy failure, if any field failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Non-fatal failure while clearing the visitor namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup_error: Option<String>,
}

impl MigrationReport {
    /// Report for an empty visitor namespace: a successful no-op.
    #[must_use]
    pub fn no_op() -> Self {
        Self::default()
    }

    /// True if every eligible field copied and cleanup (if requested) succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.error.is_none() && self.cleanup_error.is_none()
    }
}

/// Outcome of one remote review re-owning attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReviewMigrationReport {
    /// Number of reviews successfully re-created under the target owner.
    pub count: usize,
    /// Last per-review failure, if any review failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_no_op_report() {
        let report = MigrationReport::no_op();
        assert!(!report.migrated);
        assert_eq!(report.count, 0);
        assert_eq!(report.skipped, 0);
        assert!(report.is_clean());
    }

    #[test]
    fn test_clean_flag_tracks_both_errors() {
        let mut report = MigrationReport { migrated: true, count: 2, ..Default::default() };
        assert!(report.is_clean());

        report.cleanup_error = Some("store unavailable".to_string());
        assert!(!report.is_clean());
    }

    #[test]
    fn test_serialization_omits_absent_errors() {
        let report = MigrationReport { migrated: true, count: 3, ..Default::default() };
        let json = serde_json::to_string(&report).expect("serialize");
        assert!(!json.contains("error"), "got: {json}");

        let report = MigrationReport {
            migrated: true,
            count: 2,
            error: Some("write failed".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&report).expect("serialize");
        assert!(json.contains("write failed"), "got: {json}");
    }
}
