//! Owner-scoped local data and visitor migration for Placeway.
//!
//! This crate sits between the app's screens and the raw device key-value
//! store (`placeway-store`), providing:
//!
//! - Namespaced storage keys (`owner:<ownerId>:<field>`) with a strict,
//!   reversible codec
//! - Per-owner field access with transparent JSON encode/decode
//! - Bulk read and erase of everything one owner has stored
//! - The visitor-to-account migration engine: moving a guest's accumulated
//!   local state to a newly created account, excluding authentication-only
//!   fields, without loss or duplication
//! - Re-owning of remotely stored reviews as a separate, opt-in step
//!
//! Every call site must name an owner; there are no global, un-owned keys.
//! Anonymous state belongs to the reserved visitor owner
//! ([`OwnerId::visitor`]).

#![deny(unsafe_code)]

mod accessor;
mod bulk;
mod error;
mod keys;
mod migration;
mod reviews;

pub use accessor::ProfileStore;
pub use error::{ProfileError, Result};
pub use keys::{build_key, parse_key, KEY_PREFIX};
pub use migration::{MigrationEngine, MigrationOptions, AUTH_FIELDS};
pub use reviews::{InMemoryReviews, Review, ReviewCollection, ReviewError, ReviewMigrator};

// Re-export the identifier and report types for convenience
pub use placeway_types::{FieldName, MigrationReport, OwnerId, ReviewMigrationReport};
