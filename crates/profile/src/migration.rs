//! Visitor-to-account migration engine.
//!
//! A guest ("visitor") user accumulates local state under the reserved
//! visitor namespace. When the visitor later creates a permanent account,
//! that state moves, field by field, to the new account's namespace,
//! excluding authentication-only fields, without loss and without
//! duplication. Because the per-field key is owner-scoped rather than
//! append-scoped, re-running a migration overwrites the same keys with the
//! same values.

use placeway_store::KeyValueStore;
use placeway_types::{MigrationReport, OwnerId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::accessor::ProfileStore;
use crate::error::{Result, VisitorTargetSnafu};

/// Field names that must never be copied during migration, regardless of
/// owner: the profile record, the authentication flag, the password, and
/// the current-session pointer. Fixed here, not configurable per call.
pub const AUTH_FIELDS: [&str; 4] =
    ["userProfile", "isAuthenticated", "password", "currentSession"];

/// Options for one migration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationOptions {
    /// Whether to erase the visitor namespace after a successful copy.
    pub cleanup_visitor: bool,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self { cleanup_visitor: true }
    }
}

/// The visitor-to-account migration engine.
///
/// Consolidates what the app previously did in scattered one-off scripts:
/// one fixed exclusion set, one report shape, one place to change either.
pub struct MigrationEngine<S> {
    profiles: ProfileStore<S>,
}

impl<S: KeyValueStore> MigrationEngine<S> {
    /// Create an engine over the given profile store.
    pub fn new(profiles: ProfileStore<S>) -> Self {
        Self { profiles }
    }

    /// Migrates the visitor's local fields to `target`'s namespace.
    ///
    /// Fields are processed strictly one at a time, in field-name order,
    /// from a snapshot of the visitor namespace read once at the start.
    /// Known race: a concurrent write to the visitor namespace during the
    /// copy loop may or may not be captured; only one migration is expected
    /// to run per session.
    ///
    /// A single field's copy failure does not abort the loop: every field
    /// is attempted, the report carries the count of successes and the last
    /// failure. An empty visitor namespace is a successful no-op
    /// (`migrated: false, count: 0`), not an error. Cleanup failure after a
    /// successful copy is reported non-fatally in `cleanup_error`.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::VisitorTarget` if `target` is the reserved
    /// visitor owner. Operational failures land inside the report, never as
    /// an `Err`.
    pub async fn migrate(
        &self,
        target: &OwnerId,
        opts: MigrationOptions,
    ) -> Result<MigrationReport> {
        snafu::ensure!(!target.is_visitor(), VisitorTargetSnafu);

        let visitor = OwnerId::visitor();
        let snapshot = match self.profiles.read_owner(&visitor).await {
            Ok(data) => data,
            Err(err) => {
                warn!(error = %err, "visitor snapshot read failed, aborting migration");
                return Ok(MigrationReport {
                    error: Some(err.to_string()),
                    ..MigrationReport::default()
                });
            },
        };

        if snapshot.is_empty() {
            info!(target = %target, "visitor namespace empty, nothing to migrate");
            return Ok(MigrationReport::no_op());
        }

        let mut count = 0;
        let mut skipped = 0;
        let mut last_error = None;
        for (field, value) in &snapshot {
            if AUTH_FIELDS.contains(&field.as_str()) {
                debug!(field = %field, "skipping authentication-only field");
                skipped += 1;
                continue;
            }
            match self.profiles.set(target, field, value).await {
                Ok(()) => {
                    debug!(field = %field, target = %target, "copied field");
                    count += 1;
                },
                Err(err) => {
                    // One corrupt field must not block the rest.
                    warn!(field = %field, error = %err, "field copy failed");
                    last_error = Some(err.to_string());
                },
            }
        }

        let mut cleanup_error = None;
        if opts.cleanup_visitor && count > 0 {
            if let Err(err) = self.profiles.clear_owner(&visitor).await {
                // The copy already succeeded; cleanup failure is non-fatal.
                warn!(error = %err, "visitor cleanup failed after migration");
                cleanup_error = Some(err.to_string());
            }
        }

        info!(
            target = %target,
            count,
            skipped,
            partial = last_error.is_some(),
            "visitor migration finished"
        );
        Ok(MigrationReport { migrated: count > 0, count, skipped, error: last_error, cleanup_error })
    }
}
