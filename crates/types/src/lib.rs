//! Core types and errors for the Placeway local data layer.
//!
//! This crate provides the foundational types used throughout the data
//! layer:
//! - Validated identifier types ([`OwnerId`], [`FieldName`])
//! - Migration report value objects
//! - Error types using snafu

#![deny(unsafe_code)]

pub mod error;
pub mod owner;
pub mod report;

// Re-export commonly used types at crate root
pub use error::{KeyError, Result};
pub use owner::{FieldName, OwnerId, KEY_DELIMITER, VISITOR_OWNER};
pub use report::{MigrationReport, ReviewMigrationReport};
