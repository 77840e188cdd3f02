//! Per-owner field access with transparent JSON encode/decode.

use std::sync::Arc;

use placeway_store::KeyValueStore;
use placeway_types::{FieldName, OwnerId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use snafu::ResultExt;

use crate::error::{CodecSnafu, Result, StorageSnafu};
use crate::keys::build_key;

/// Decode a raw stored string with the legacy fallback rule.
///
/// Values written by this layer are JSON, but legacy or externally written
/// values may not be; those are returned unchanged as strings rather than
/// surfaced as errors.
pub(crate) fn decode_value(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
}

/// Encode a value for storage: strings as-is, everything else as JSON.
fn encode_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Owner-scoped field access over a [`KeyValueStore`].
///
/// All operations address fields through [`build_key`], so a valid owner id
/// is structurally required; there is no way to read or write an un-owned
/// key through this type.
pub struct ProfileStore<S> {
    store: Arc<S>,
}

impl<S> Clone for ProfileStore<S> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store) }
    }
}

impl<S: KeyValueStore> ProfileStore<S> {
    /// Create a profile store over the given key-value backend.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Access the underlying key-value store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Reads one field for one owner.
    ///
    /// Returns `None` if the field was never written. Stored strings that
    /// fail to decode as JSON come back unchanged as `Value::String`.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Storage` if the underlying read fails.
    pub async fn get(&self, owner: &OwnerId, field: &FieldName) -> Result<Option<Value>> {
        let key = build_key(owner, field);
        let raw = self.store.get_item(&key).await.context(StorageSnafu)?;
        Ok(raw.map(decode_value))
    }

    /// Writes one field for one owner, replacing any previous value.
    ///
    /// `Value::String` is written as-is; every other value is JSON-encoded.
    /// A raw string that happens to be valid JSON (`"123"`, `"true"`) will
    /// therefore read back as the decoded value, not a string.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Storage` if the underlying write is rejected.
    pub async fn set(&self, owner: &OwnerId, field: &FieldName, value: &Value) -> Result<()> {
        let key = build_key(owner, field);
        let raw = encode_value(value);
        self.store.set_item(&key, &raw).await.context(StorageSnafu)?;
        Ok(())
    }

    /// Removes one field for one owner. Removing an absent field is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Storage` if the underlying removal fails.
    pub async fn remove(&self, owner: &OwnerId, field: &FieldName) -> Result<()> {
        let key = build_key(owner, field);
        self.store.remove_item(&key).await.context(StorageSnafu)?;
        Ok(())
    }

    /// Reads one field and deserializes it into a typed structure.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Storage` if the underlying read fails.
    /// Returns `ProfileError::Codec` if the stored value does not match `T`.
    pub async fn get_as<T: DeserializeOwned>(
        &self,
        owner: &OwnerId,
        field: &FieldName,
    ) -> Result<Option<T>> {
        match self.get(owner, field).await? {
            Some(value) => {
                let typed = serde_json::from_value(value)
                    .context(CodecSnafu { field: field.as_str() })?;
                Ok(Some(typed))
            },
            None => Ok(None),
        }
    }

    /// Serializes a typed structure and writes it as one field.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Codec` if `value` cannot be represented as
    /// JSON. Returns `ProfileError::Storage` if the underlying write is
    /// rejected.
    pub async fn set_from<T: Serialize>(
        &self,
        owner: &OwnerId,
        field: &FieldName,
        value: &T,
    ) -> Result<()> {
        let encoded =
            serde_json::to_value(value).context(CodecSnafu { field: field.as_str() })?;
        self.set(owner, field, &encoded).await
    }
}
