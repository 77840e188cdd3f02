//! Property tests for namespace isolation and value round-trips.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::disallowed_methods)]

use std::sync::Arc;

use placeway_profile::{FieldName, OwnerId, ProfileStore};
use placeway_store::MemoryStore;
use placeway_test_utils::strategies::{arb_field, arb_json_value, arb_owner};
use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("build runtime")
}

fn distinct_owners() -> impl Strategy<Value = (OwnerId, OwnerId)> {
    (arb_owner(), arb_owner()).prop_filter("owners must differ", |(a, b)| a != b)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Writing under one owner never changes what any other owner reads.
    #[test]
    fn prop_namespace_isolation(
        (a, b) in distinct_owners(),
        field in arb_field(),
        mine in arb_json_value(),
        theirs in arb_json_value(),
    ) {
        runtime().block_on(async {
            let profiles = ProfileStore::new(Arc::new(MemoryStore::new()));
            profiles.set(&b, &field, &theirs).await.expect("set b");
            profiles.set(&a, &field, &mine).await.expect("set a");

            prop_assert_eq!(profiles.get(&b, &field).await.expect("get b"), Some(theirs));
            prop_assert_eq!(profiles.get(&a, &field).await.expect("get a"), Some(mine));
            Ok(())
        })?;
    }

    /// A stored value reads back structurally equal, and removal makes the
    /// field absent again.
    #[test]
    fn prop_set_get_remove_round_trip(
        owner in arb_owner(),
        field in arb_field(),
        value in arb_json_value(),
    ) {
        runtime().block_on(async {
            let profiles = ProfileStore::new(Arc::new(MemoryStore::new()));
            prop_assert_eq!(profiles.get(&owner, &field).await.expect("get"), None);

            profiles.set(&owner, &field, &value).await.expect("set");
            prop_assert_eq!(profiles.get(&owner, &field).await.expect("get"), Some(value));

            profiles.remove(&owner, &field).await.expect("remove");
            prop_assert_eq!(profiles.get(&owner, &field).await.expect("get"), None);
            Ok(())
        })?;
    }

    /// Bulk reads return exactly the fields written for that owner.
    #[test]
    fn prop_read_owner_sees_only_own_fields(
        (a, b) in distinct_owners(),
        field_a in arb_field(),
        field_b in arb_field(),
        value in arb_json_value(),
    ) {
        runtime().block_on(async {
            let profiles = ProfileStore::new(Arc::new(MemoryStore::new()));
            profiles.set(&a, &field_a, &value).await.expect("set a");
            profiles.set(&b, &field_b, &value).await.expect("set b");

            let data = profiles.read_owner(&a).await.expect("read a");
            prop_assert_eq!(data.len(), 1);
            prop_assert_eq!(data.get(&field_a), Some(&value));
            Ok(())
        })?;
    }
}
