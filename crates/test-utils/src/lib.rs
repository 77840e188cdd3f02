//! Shared test utilities for Placeway crates.
//!
//! This crate provides common test helpers to reduce boilerplate across test
//! modules:
//!
//! - [`TestDir`] - Managed temporary directory with path helpers
//! - [`strategies`] - Proptest generators for owners, fields, and JSON values

#![deny(unsafe_code)]
// Test utilities are allowed to use unwrap for simplicity
#![cfg_attr(test, allow(clippy::disallowed_methods))]

mod test_dir;
pub use test_dir::TestDir;

pub mod strategies;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_creates_temp_directory() {
        let dir = TestDir::new();
        assert!(dir.path().exists(), "temp directory should exist");
        assert!(dir.path().is_dir(), "should be a directory");
    }

    #[test]
    fn test_dir_path_returns_valid_path() {
        let dir = TestDir::new();
        let path = dir.path();
        std::fs::write(path.join("test.txt"), "hello").expect("write file");
        assert!(path.join("test.txt").exists());
    }

    #[test]
    fn test_dir_join_creates_subdirectory_path() {
        let dir = TestDir::new();
        let subpath = dir.join("subdir/nested");
        assert!(subpath.starts_with(dir.path()));
        assert!(subpath.ends_with("subdir/nested"));
    }
}
