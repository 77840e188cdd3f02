//! Proptest strategies for Placeway domain types.
//!
//! Reusable generators for property-based testing across crates. Strategies produce
//! well-formed domain values while exploring edge cases through random variation.
//!
//! # Usage
//!
//! ```no_run
//! use placeway_test_utils::strategies;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn my_property(owner in strategies::arb_owner()) {
//!         // test invariant with a randomly generated owner
//!     }
//! }
//! ```

use placeway_types::{FieldName, OwnerId};
use proptest::prelude::*;
use serde_json::Value;

/// Generates an arbitrary account owner id in email-ish `{name}@{host}.{tld}` form.
pub fn arb_owner() -> impl Strategy<Value = OwnerId> {
    ("[a-z][a-z0-9]{0,11}", "[a-z]{2,8}", prop::sample::select(vec!["com", "org", "io"]))
        .prop_map(|(name, host, tld)| {
            OwnerId::new(format!("{name}@{host}.{tld}")).expect("generated owner is valid")
        })
}

/// Generates an arbitrary field name of 1-24 characters matching `[a-zA-Z][a-zA-Z0-9_]*`.
pub fn arb_field() -> impl Strategy<Value = FieldName> {
    "[a-zA-Z][a-zA-Z0-9_]{0,23}"
        .prop_map(|name| FieldName::new(name).expect("generated field is valid"))
}

/// Generates a JSON string leaf that is never itself parseable as JSON.
///
/// Bare `"true"`, `"false"`, and `"null"` strings are excluded because the
/// accessor's write-strings-raw rule makes them read back as the decoded
/// JSON value rather than a string.
pub fn arb_string_leaf() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9 ]{0,19}"
        .prop_filter("must not be a JSON literal", |s| !matches!(s.as_str(), "true" | "false" | "null"))
}

/// Generates an arbitrary JSON-serializable value.
///
/// Leaves are null, booleans, integers, and non-JSON-literal strings; up to
/// three levels of arrays and objects are layered on top.
pub fn arb_json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        arb_string_leaf().prop_map(Value::String),
    ];

    leaf.prop_recursive(3, 24, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z][a-z0-9]{0,11}", inner, 0..6).prop_map(|map| {
                Value::Object(map.into_iter().collect())
            }),
        ]
    })
}
