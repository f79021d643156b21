//! Trait definitions with mockall annotations for testing
//!
//! The store trait is the seam between the orchestrator and durable storage.
//! It is mocked in tests to exercise the orchestration pipelines without a
//! real database.

use chrono::{DateTime, Utc};
use shared::{Appeal, AppealId, AppealStatus};

use crate::error::AppealResult;

/// Durable keyed storage for appeals
///
/// The store owns schema, identity generation and query execution. Mutating
/// operations are durable before they return. Concurrent calls against the
/// same id are not synchronized here; single-entity overwrites are made safe
/// by the `expected_status` guard on [`AppealStore::update`].
#[mockall::automock]
#[async_trait::async_trait]
pub trait AppealStore: Send + Sync {
    /// Insert a new appeal with a fresh id, status `New` and a single
    /// timestamp for both `created_at` and `updated_at`.
    async fn create(&self, theme: &str, message: &str) -> AppealResult<Appeal>;

    /// Fetch one appeal by id; `NotFound` when no record matches.
    async fn get(&self, id: AppealId) -> AppealResult<Appeal>;

    /// All appeals in insertion order; an empty store yields an empty vec.
    async fn list(&self) -> AppealResult<Vec<Appeal>>;

    /// Appeals whose `created_at` lies in the inclusive `[start, end]`
    /// interval. Callers widen `end` when a whole day is intended.
    async fn list_by_created_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppealResult<Vec<Appeal>>;

    /// Full-record overwrite, conditional on the stored status still being
    /// `expected_status`. Refreshes `updated_at` and returns the persisted
    /// record. Fails with `NotFound` when the id has no row and with
    /// `Conflict` when the row exists but the status moved underneath the
    /// caller.
    async fn update(
        &self,
        appeal: &Appeal,
        expected_status: AppealStatus,
    ) -> AppealResult<Appeal>;

    /// Atomically set every appeal currently in one of `from_statuses` to
    /// `Cancelled`, refreshing `updated_at`. Returns the number of rows
    /// changed; zero matches is not an error.
    async fn bulk_cancel(&self, from_statuses: &[AppealStatus]) -> AppealResult<u64>;
}
