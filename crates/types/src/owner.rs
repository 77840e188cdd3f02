//! Validated identifier types for owners and fields.
//!
//! Storage keys have the shape `owner:<ownerId>:<field>`. For the key to be
//! reversible (owner and field recoverable by parsing), neither component
//! may contain the delimiter. Both newtypes enforce that at construction so
//! the key codec itself is total.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{KeyError, Result};

/// Delimiter separating the prefix, owner id, and field name in a key.
pub const KEY_DELIMITER: char = ':';

/// Reserved owner id for the anonymous/guest ("visitor") user.
pub const VISITOR_OWNER: &str = "visitor";

/// A validated owner identifier.
///
/// One reserved value ([`VISITOR_OWNER`]) denotes the anonymous guest; all
/// other values denote a permanent account, conventionally its email
/// address. Every persisted field is owned by exactly one owner id at a
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Creates an owner id from a raw string.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::InvalidOwner` if the input is empty or contains
    /// the key delimiter.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(KeyError::InvalidOwner { reason: "owner id is empty".to_string() });
        }
        if value.contains(KEY_DELIMITER) {
            return Err(KeyError::InvalidOwner {
                reason: format!("owner id {value:?} contains {KEY_DELIMITER:?}"),
            });
        }
        Ok(Self(value))
    }

    /// Returns the reserved visitor owner id.
    #[must_use]
    pub fn visitor() -> Self {
        Self(VISITOR_OWNER.to_string())
    }

    /// Returns true if this is the reserved visitor owner.
    #[must_use]
    pub fn is_visitor(&self) -> bool {
        self.0 == VISITOR_OWNER
    }

    /// Returns the raw string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for OwnerId {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// A validated logical field name (e.g. `favorites`, `accessibilityPrefs`).
///
/// A field's value is an arbitrary JSON-serializable structure; no schema is
/// enforced on contents by this layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    /// Creates a field name from a raw string.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::InvalidField` if the input is empty or contains
    /// the key delimiter.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(KeyError::InvalidField { reason: "field name is empty".to_string() });
        }
        if value.contains(KEY_DELIMITER) {
            return Err(KeyError::InvalidField {
                reason: format!("field name {value:?} contains {KEY_DELIMITER:?}"),
            });
        }
        Ok(Self(value))
    }

    /// Returns the raw string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for FieldName {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
