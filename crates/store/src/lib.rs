//! placeway-store: the key-value persistence boundary for Placeway local data.
//!
//! The device key-value store is a consumed collaborator, not something this
//! layer reimplements. This crate pins down the boundary as the
//! [`KeyValueStore`] trait (string keys, string values, async operations
//! that may fail) and ships three implementations:
//!
//! - [`MemoryStore`]: in-memory backend, the workhorse for tests
//! - [`FileStore`]: JSON-object-on-disk backend for durable use
//! - [`FlakyStore`]: fault-injecting wrapper for exercising partial-failure
//!   paths
//!
//! All failures surface as [`StoreError`]; nothing is logged-and-swallowed.

#![deny(unsafe_code)]

mod backend;
mod error;

pub use backend::{FileStore, FlakyStore, KeyValueStore, MemoryStore};
pub use error::{Result, StoreError};
