//! Key-value backend abstraction.
//!
//! The [`KeyValueStore`] trait abstracts the device's key-value persistence
//! mechanism, allowing file-based (durable) and in-memory (testing)
//! implementations. Every operation is an async suspension point and may
//! fail; failures propagate as [`StoreError`](crate::StoreError), never as
//! panics.

mod file;
mod flaky;
mod memory;

pub use file::FileStore;
pub use flaky::FlakyStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::Result;

/// Async key-value persistence boundary.
///
/// String keys, string values. Per-key writes are assumed atomic; nothing
/// beyond that is assumed about the backing store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored at `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Read` or `StoreError::Unavailable` if the read
    /// fails.
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` at `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Write` if the store rejects the write (quota,
    /// I/O).
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the value at `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Write` if the removal fails.
    async fn remove_item(&self, key: &str) -> Result<()>;

    /// Lists every key currently present in the store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the listing fails.
    async fn get_all_keys(&self) -> Result<Vec<String>>;

    /// Removes a batch of keys.
    ///
    /// The default implementation removes keys sequentially, continues past
    /// per-key failures, and returns the first error after attempting every
    /// key. Backends with atomic multi-key removal override this.
    ///
    /// # Errors
    ///
    /// Returns the first per-key removal error encountered.
    async fn multi_remove(&self, keys: &[String]) -> Result<()> {
        let mut first_err = None;
        for key in keys {
            if let Err(err) = self.remove_item(key).await {
                if first_err.is_none() {
                    first_err = Some(err);
                }
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
