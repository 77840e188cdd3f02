//! End-to-end tests for the visitor-to-account migration flow.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]

use std::sync::Arc;

use placeway_profile::{
    FieldName, MigrationEngine, MigrationOptions, MigrationReport, OwnerId, ProfileStore,
};
use placeway_store::{FlakyStore, KeyValueStore, MemoryStore};
use serde_json::json;

fn owner(s: &str) -> OwnerId {
    OwnerId::new(s).expect("valid owner")
}

fn field(s: &str) -> FieldName {
    FieldName::new(s).expect("valid field")
}

const NO_CLEANUP: MigrationOptions = MigrationOptions { cleanup_visitor: false };

/// Seeds the visitor namespace with the canonical mixed data set: two
/// migratable fields and one authentication-only field.
async fn seed_visitor<S: KeyValueStore>(profiles: &ProfileStore<S>) {
    let visitor = OwnerId::visitor();
    profiles
        .set(&visitor, &field("favorites"), &json!(["place-1", "place-2"]))
        .await
        .expect("seed favorites");
    profiles
        .set(&visitor, &field("accessibilityPrefs"), &json!({"highContrast": true}))
        .await
        .expect("seed prefs");
    profiles
        .set(&visitor, &field("userProfile"), &json!({"name": "guest"}))
        .await
        .expect("seed profile");
}

#[tokio::test]
async fn test_cleanup_on_success() {
    let profiles = ProfileStore::new(Arc::new(MemoryStore::new()));
    seed_visitor(&profiles).await;

    let target = owner("alice@x.com");
    let engine = MigrationEngine::new(profiles.clone());
    let report = engine.migrate(&target, MigrationOptions::default()).await.expect("migrate");

    assert_eq!(
        report,
        MigrationReport { migrated: true, count: 2, skipped: 1, error: None, cleanup_error: None }
    );

    // Visitor namespace is gone.
    assert!(profiles.read_owner(&OwnerId::visitor()).await.expect("read visitor").is_empty());

    // Target got the data fields but not the authentication field.
    let data = profiles.read_owner(&target).await.expect("read target");
    assert_eq!(data.len(), 2);
    assert_eq!(data.get(&field("favorites")), Some(&json!(["place-1", "place-2"])));
    assert_eq!(data.get(&field("accessibilityPrefs")), Some(&json!({"highContrast": true})));
    assert!(!data.contains_key(&field("userProfile")));
}

#[tokio::test]
async fn test_migration_is_idempotent_without_cleanup() {
    let profiles = ProfileStore::new(Arc::new(MemoryStore::new()));
    seed_visitor(&profiles).await;

    let target = owner("alice@x.com");
    let engine = MigrationEngine::new(profiles.clone());

    let first = engine.migrate(&target, NO_CLEANUP).await.expect("first migrate");
    let after_first = profiles.read_owner(&target).await.expect("read target");

    let second = engine.migrate(&target, NO_CLEANUP).await.expect("second migrate");
    let after_second = profiles.read_owner(&target).await.expect("read target");

    assert_eq!(first, second, "unchanged visitor data yields identical reports");
    assert_eq!(first.count, 2);
    assert_eq!(after_first, after_second, "no duplication: keys are owner-scoped");

    // Visitor data untouched without cleanup.
    assert_eq!(profiles.read_owner(&OwnerId::visitor()).await.expect("read visitor").len(), 3);
}

#[tokio::test]
async fn test_auth_fields_never_copied_but_direct_writes_survive() {
    let profiles = ProfileStore::new(Arc::new(MemoryStore::new()));
    seed_visitor(&profiles).await;

    // The account legitimately has its own profile record from a direct
    // write; migration must not overwrite or remove it.
    let target = owner("alice@x.com");
    let own_profile = json!({"name": "Alice", "email": "alice@x.com"});
    profiles.set(&target, &field("userProfile"), &own_profile).await.expect("direct write");

    let engine = MigrationEngine::new(profiles.clone());
    let report = engine.migrate(&target, MigrationOptions::default()).await.expect("migrate");
    assert_eq!(report.skipped, 1);

    let data = profiles.read_owner(&target).await.expect("read target");
    assert_eq!(data.get(&field("userProfile")), Some(&own_profile));
}

#[tokio::test]
async fn test_empty_visitor_no_op_performs_zero_writes() {
    let store = Arc::new(MemoryStore::new());
    let profiles = ProfileStore::new(Arc::clone(&store));
    let target = owner("alice@x.com");
    profiles.set(&target, &field("settings"), &json!({"lang": "en"})).await.expect("set");

    let keys_before = store.get_all_keys().await.expect("list");
    let engine = MigrationEngine::new(profiles);
    let report =
        engine.migrate(&target, MigrationOptions::default()).await.expect("migrate");

    assert_eq!(report, MigrationReport { migrated: false, count: 0, ..Default::default() });
    assert_eq!(store.get_all_keys().await.expect("list"), keys_before);
}

#[tokio::test]
async fn test_partial_failure_accounting() {
    let flaky = Arc::new(FlakyStore::new(MemoryStore::new()));
    let profiles = ProfileStore::new(Arc::clone(&flaky));
    let visitor = OwnerId::visitor();

    profiles.set(&visitor, &field("favorites"), &json!([1])).await.expect("seed");
    profiles.set(&visitor, &field("history"), &json!([2])).await.expect("seed");
    profiles.set(&visitor, &field("settings"), &json!([3])).await.expect("seed");

    // Fail exactly the target-side write of one field.
    let target = owner("alice@x.com");
    flaky.fail_writes_containing("owner:alice@x.com:history");

    let engine = MigrationEngine::new(profiles.clone());
    let report = engine.migrate(&target, NO_CLEANUP).await.expect("migrate");

    assert!(report.migrated);
    assert_eq!(report.count, 2);
    assert!(report.error.is_some(), "last failure must be surfaced");

    // Both successful fields are readable afterwards.
    let data = profiles.read_owner(&target).await.expect("read target");
    assert_eq!(data.get(&field("favorites")), Some(&json!([1])));
    assert_eq!(data.get(&field("settings")), Some(&json!([3])));
    assert!(!data.contains_key(&field("history")));

    // Without cleanup the failed field is still in the visitor namespace,
    // so re-running the migration can pick it up.
    flaky.clear_write_failures();
    let retry = engine.migrate(&target, NO_CLEANUP).await.expect("retry");
    assert_eq!(retry.count, 3);
    assert!(retry.error.is_none());
}

#[tokio::test]
async fn test_snapshot_read_failure_aborts_before_any_write() {
    let flaky = Arc::new(FlakyStore::new(MemoryStore::new()));
    let profiles = ProfileStore::new(Arc::clone(&flaky));
    let visitor = OwnerId::visitor();
    profiles.set(&visitor, &field("favorites"), &json!([1])).await.expect("seed");

    flaky.fail_listing(true);
    let target = owner("alice@x.com");
    let engine = MigrationEngine::new(profiles.clone());
    let report =
        engine.migrate(&target, MigrationOptions::default()).await.expect("migrate");

    assert!(!report.migrated);
    assert_eq!(report.count, 0);
    assert!(report.error.is_some());

    flaky.fail_listing(false);
    assert!(profiles.read_owner(&target).await.expect("read target").is_empty());
}

#[tokio::test]
async fn test_cleanup_failure_is_non_fatal() {
    let flaky = Arc::new(FlakyStore::new(MemoryStore::new()));
    let profiles = ProfileStore::new(Arc::clone(&flaky));
    seed_visitor(&profiles).await;

    // Copies write under the target namespace and are unaffected; only the
    // visitor-side removals match the pattern.
    flaky.fail_writes_containing("owner:visitor:");

    let target = owner("alice@x.com");
    let engine = MigrationEngine::new(profiles.clone());
    let report = engine.migrate(&target, MigrationOptions::default()).await.expect("migrate");

    assert!(report.migrated, "copy succeeded");
    assert_eq!(report.count, 2);
    assert!(report.error.is_none());
    assert!(report.cleanup_error.is_some(), "cleanup failure must be reported");

    // The copy is intact despite the failed cleanup.
    flaky.clear_write_failures();
    assert_eq!(profiles.read_owner(&target).await.expect("read target").len(), 2);
}
