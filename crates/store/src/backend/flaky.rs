//! Fault-injecting wrapper for resilience testing.
//!
//! Wraps any [`KeyValueStore`] and injects failures on demand:
//!
//! - **Unavailability**: fail the next N operations of any kind
//! - **Targeted write failures**: fail writes and removals whose key
//!   contains a given substring
//! - **Listing failures**: fail `get_all_keys`
//!
//! `multi_remove` deliberately uses the trait's default sequential
//! implementation so injected per-key failures exercise the
//! continue-past-failure path.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::KeyValueStore;
use crate::error::{Result, StoreError};

/// A [`KeyValueStore`] wrapper that injects failures for tests.
pub struct FlakyStore<S> {
    inner: S,
    /// Number of operations (any kind) to fail with `Unavailable`.
    unavailable_count: AtomicUsize,
    /// Substring of keys whose writes and removals fail.
    fail_writes_matching: RwLock<Option<String>>,
    /// Whether `get_all_keys` fails.
    fail_listing: AtomicBool,
}

impl<S> FlakyStore<S> {
    /// Wrap a store with no failures armed.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            unavailable_count: AtomicUsize::new(0),
            fail_writes_matching: RwLock::new(None),
            fail_listing: AtomicBool::new(false),
        }
    }

    /// Fail the next `count` operations with `StoreError::Unavailable`.
    pub fn fail_next(&self, count: usize) {
        self.unavailable_count.store(count, Ordering::SeqCst);
    }

    /// Fail writes and removals whose key contains `pattern`.
    pub fn fail_writes_containing(&self, pattern: impl Into<String>) {
        *self.fail_writes_matching.write() = Some(pattern.into());
    }

    /// Stop failing pattern-matched writes.
    pub fn clear_write_failures(&self) {
        *self.fail_writes_matching.write() = None;
    }

    /// Arm or disarm `get_all_keys` failures.
    pub fn fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    /// Access the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Consume one armed unavailability, if any remain.
    fn take_unavailable(&self) -> bool {
        self.unavailable_count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    fn write_should_fail(&self, key: &str) -> bool {
        self.fail_writes_matching.read().as_deref().is_some_and(|pat| key.contains(pat))
    }
}

#[async_trait]
impl<S: KeyValueStore> KeyValueStore for FlakyStore<S> {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        if self.take_unavailable() {
            return Err(StoreError::Unavailable { message: "injected outage".to_string() });
        }
        self.inner.get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if self.take_unavailable() {
            return Err(StoreError::Unavailable { message: "injected outage".to_string() });
        }
        if self.write_should_fail(key) {
            return Err(StoreError::Write {
                key: key.to_string(),
                message: "injected write failure".to_string(),
            });
        }
        self.inner.set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        if self.take_unavailable() {
            return Err(StoreError::Unavailable { message: "injected outage".to_string() });
        }
        if self.write_should_fail(key) {
            return Err(StoreError::Write {
                key: key.to_string(),
                message: "injected removal failure".to_string(),
            });
        }
        self.inner.remove_item(key).await
    }

    async fn get_all_keys(&self) -> Result<Vec<String>> {
        if self.take_unavailable() || self.fail_listing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable { message: "injected outage".to_string() });
        }
        self.inner.get_all_keys().await
    }
}
