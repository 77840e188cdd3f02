//! Key encoding for the owner-scoped storage layer.
//!
//! All keys carry a fixed prefix and the owner id so that:
//! - Every persisted field is owned by exactly one owner
//! - One owner's fields can be enumerated by parsing the full key listing
//!
//! Key format: `owner:{ownerId}:{field}`
//!
//! The codec is reversible: owner and field are recoverable from any key
//! this layer wrote, because neither component may contain the delimiter
//! (enforced at [`OwnerId`]/[`FieldName`] construction).

use placeway_types::{FieldName, OwnerId, KEY_DELIMITER};

/// Fixed prefix marking keys managed by this layer.
pub const KEY_PREFIX: &str = "owner";

/// Encodes a storage key for an (owner, field) pair.
///
/// Deterministic and pure. Format: `owner:{ownerId}:{field}`.
#[must_use]
pub fn build_key(owner: &OwnerId, field: &FieldName) -> String {
    format!(
        "{KEY_PREFIX}{KEY_DELIMITER}{owner}{KEY_DELIMITER}{field}",
        owner = owner.as_str(),
        field = field.as_str()
    )
}

/// Decodes a storage key into its (owner, field) components.
///
/// Returns `None` if the key does not match the expected prefix/delimiter
/// shape, including keys written by other subsystems sharing the store,
/// which the bulk reader uses to filter the full key listing.
#[must_use]
pub fn parse_key(key: &str) -> Option<(OwnerId, FieldName)> {
    let mut parts = key.splitn(3, KEY_DELIMITER);
    if parts.next()? != KEY_PREFIX {
        return None;
    }
    let owner = OwnerId::new(parts.next()?).ok()?;
    // The remainder is rejected if it still contains the delimiter, so
    // every accepted key round-trips through build_key.
    let field = FieldName::new(parts.next()?).ok()?;
    Some((owner, field))
}
