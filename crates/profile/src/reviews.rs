//! Re-owning of remotely stored reviews after account creation.
//!
//! Reviews live in a remote document collection, not in the device
//! key-value store, so they are a parallel migration concern with their own
//! failure semantics. The collection is a consumed boundary: create, read
//! by owner, delete by id.
//!
//! Re-owning is create-before-delete: a failure mid-review can leave a
//! duplicate behind but can never lose a review.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use placeway_types::{OwnerId, ReviewMigrationReport};
use serde::{Deserialize, Serialize};
use snafu::Snafu;
use tracing::{debug, info, warn};

use crate::error::{Result, VisitorTargetSnafu};

/// One review document in the remote collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Collection-assigned document id.
    pub id: String,
    /// Owner of the review.
    pub owner: OwnerId,
    /// The place being reviewed.
    pub place_id: String,
    /// Star rating, 1-5.
    pub rating: u8,
    /// Free-text comment.
    pub comment: String,
}

/// Errors from the remote review collection.
#[derive(Debug, Snafu)]
pub enum ReviewError {
    /// The remote collection rejected or failed an operation.
    #[snafu(display("Review service error: {message}"))]
    Remote {
        /// Description of the failure.
        message: String,
    },
}

/// Remote review document collection (consumed, not reimplemented).
#[async_trait]
pub trait ReviewCollection: Send + Sync {
    /// Lists every review owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::Remote` if the query fails.
    async fn get_by_owner(&self, owner: &OwnerId) -> std::result::Result<Vec<Review>, ReviewError>;

    /// Creates a review document; the collection assigns and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::Remote` if the write fails.
    async fn create(&self, review: &Review) -> std::result::Result<String, ReviewError>;

    /// Deletes a review document by id. Deleting an absent id is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::Remote` if the deletion fails.
    async fn delete_by_id(&self, id: &str) -> std::result::Result<(), ReviewError>;
}

/// Re-owns the visitor's remote reviews under a new account.
///
/// Kept separate from [`MigrationEngine`](crate::MigrationEngine) so the
/// local-field migration report keeps its own shape; callers opt in.
pub struct ReviewMigrator<C> {
    collection: Arc<C>,
}

impl<C: ReviewCollection> ReviewMigrator<C> {
    /// Create a migrator over the given review collection.
    pub fn new(collection: Arc<C>) -> Self {
        Self { collection }
    }

    /// Re-creates every visitor-owned review under `target`, deleting the
    /// originals.
    ///
    /// Per-review accounting matches the field migration: a single review's
    /// failure does not abort the loop, the report carries the count of
    /// successes and the last failure. A delete failure after a successful
    /// create counts the review as migrated (the copy exists) and records
    /// the leftover duplicate as the error.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::VisitorTarget` if `target` is the reserved
    /// visitor owner. Remote failures land inside the report.
    pub async fn migrate(&self, target: &OwnerId) -> Result<ReviewMigrationReport> {
        snafu::ensure!(!target.is_visitor(), VisitorTargetSnafu);

        let visitor = OwnerId::visitor();
        let reviews = match self.collection.get_by_owner(&visitor).await {
            Ok(reviews) => reviews,
            Err(err) => {
                warn!(error = %err, "visitor review listing failed, aborting re-owning");
                return Ok(ReviewMigrationReport { count: 0, error: Some(err.to_string()) });
            },
        };

        let mut count = 0;
        let mut last_error = None;
        for review in &reviews {
            let reassigned = Review { owner: target.clone(), ..review.clone() };
            match self.collection.create(&reassigned).await {
                Ok(new_id) => {
                    debug!(old_id = %review.id, new_id = %new_id, "re-created review");
                    count += 1;
                    if let Err(err) = self.collection.delete_by_id(&review.id).await {
                        warn!(id = %review.id, error = %err, "original review left behind");
                        last_error = Some(err.to_string());
                    }
                },
                Err(err) => {
                    warn!(id = %review.id, error = %err, "review re-creation failed");
                    last_error = Some(err.to_string());
                },
            }
        }

        info!(target = %target, count, partial = last_error.is_some(), "review re-owning finished");
        Ok(ReviewMigrationReport { count, error: last_error })
    }
}

/// In-memory review collection for tests.
#[derive(Debug, Default)]
pub struct InMemoryReviews {
    reviews: RwLock<Vec<Review>>,
    next_id: AtomicU64,
    /// Number of `create` calls to fail (for resilience tests).
    fail_creates: AtomicUsize,
}

impl InMemoryReviews {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `count` create calls.
    pub fn fail_next_creates(&self, count: usize) {
        self.fail_creates.store(count, Ordering::SeqCst);
    }

    /// Seed a review directly, bypassing id assignment.
    pub fn insert(&self, review: Review) {
        self.reviews.write().push(review);
    }

    /// Snapshot of every stored review.
    #[must_use]
    pub fn all(&self) -> Vec<Review> {
        self.reviews.read().clone()
    }
}

#[async_trait]
impl ReviewCollection for InMemoryReviews {
    async fn get_by_owner(&self, owner: &OwnerId) -> std::result::Result<Vec<Review>, ReviewError> {
        Ok(self.reviews.read().iter().filter(|r| r.owner == *owner).cloned().collect())
    }

    async fn create(&self, review: &Review) -> std::result::Result<String, ReviewError> {
        let armed = self
            .fail_creates
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if armed {
            return Err(ReviewError::Remote { message: "injected create failure".to_string() });
        }

        let id = format!("r{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let mut stored = review.clone();
        stored.id = id.clone();
        self.reviews.write().push(stored);
        Ok(id)
    }

    async fn delete_by_id(&self, id: &str) -> std::result::Result<(), ReviewError> {
        self.reviews.write().retain(|r| r.id != id);
        Ok(())
    }
}
