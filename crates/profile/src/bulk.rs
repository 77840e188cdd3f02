//! Bulk read and erase of one owner's stored fields.

use std::collections::BTreeMap;

use placeway_store::KeyValueStore;
use placeway_types::{FieldName, OwnerId};
use serde_json::Value;
use snafu::ResultExt;

use crate::accessor::{decode_value, ProfileStore};
use crate::error::{Result, StorageSnafu};
use crate::keys::parse_key;

impl<S: KeyValueStore> ProfileStore<S> {
    /// Lists the raw storage keys belonging to one owner.
    ///
    /// Keys written by other subsystems sharing the store (anything
    /// [`parse_key`] rejects) are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Storage` if the key listing fails.
    pub async fn owner_keys(&self, owner: &OwnerId) -> Result<Vec<String>> {
        let keys = self.store().get_all_keys().await.context(StorageSnafu)?;
        Ok(keys
            .into_iter()
            .filter(|key| parse_key(key).is_some_and(|(key_owner, _)| key_owner == *owner))
            .collect())
    }

    /// Reads every field one owner has stored, as a field-to-value mapping.
    ///
    /// The mapping contains exactly the fields still present at call time;
    /// a key removed between listing and reading is skipped, not an error.
    /// Values decode with the same JSON-with-raw-fallback rule as
    /// [`ProfileStore::get`].
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Storage` if the key listing or any individual
    /// read fails. Callers doing bulk work (diagnostics, migration) degrade
    /// on the error value rather than crashing.
    pub async fn read_owner(&self, owner: &OwnerId) -> Result<BTreeMap<FieldName, Value>> {
        let keys = self.store().get_all_keys().await.context(StorageSnafu)?;

        let mut data = BTreeMap::new();
        for key in keys {
            let Some((key_owner, field)) = parse_key(&key) else {
                continue;
            };
            if key_owner != *owner {
                continue;
            }
            if let Some(raw) = self.store().get_item(&key).await.context(StorageSnafu)? {
                data.insert(field, decode_value(raw));
            }
        }
        Ok(data)
    }

    /// Removes every field one owner has stored, in one bulk removal.
    ///
    /// Returns the number of keys that were targeted. Idempotent: clearing
    /// an owner with no data succeeds trivially with `Ok(0)`.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Storage` if the key listing fails, or with the
    /// first removal failure after every key has been attempted (see
    /// [`KeyValueStore::multi_remove`]).
    pub async fn clear_owner(&self, owner: &OwnerId) -> Result<usize> {
        let keys = self.owner_keys(owner).await?;
        if keys.is_empty() {
            return Ok(0);
        }
        self.store().multi_remove(&keys).await.context(StorageSnafu)?;
        Ok(keys.len())
    }
}
