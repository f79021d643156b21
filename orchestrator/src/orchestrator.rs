//! Appeal orchestration: sequencing lifecycle decisions with store I/O
//!
//! Every single-entity use case is the same read-validate-write pipeline:
//! fetch the current record, ask the lifecycle table whether the requested
//! operation is legal, then persist the new state conditionally on the status
//! that was read. A concurrent writer that got there first turns the losing
//! write into a `Conflict` instead of a silent overwrite.

use chrono::{Duration, NaiveDate, NaiveTime};
use tracing::{debug, info};

use shared::{Appeal, AppealId, AppealStatus, Operation};

use crate::error::{AppealError, AppealResult};
use crate::traits::AppealStore;

/// Orchestrator over an injected appeal store
pub struct Orchestrator<S>
where
    S: AppealStore,
{
    store: S,
}

impl<S> Orchestrator<S>
where
    S: AppealStore + Send + Sync + 'static,
{
    /// Create an orchestrator with an injected store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a new appeal; theme and message must both be non-empty
    pub async fn create_appeal(&self, theme: &str, message: &str) -> AppealResult<Appeal> {
        if theme.is_empty() || message.is_empty() {
            return Err(AppealError::validation("theme and message are required"));
        }

        let appeal = self.store.create(theme, message).await?;
        info!(id = %appeal.id, "appeal created");
        Ok(appeal)
    }

    /// Fetch one appeal by id
    pub async fn get_appeal(&self, id: AppealId) -> AppealResult<Appeal> {
        self.store.get(id).await
    }

    /// All appeals, regardless of status
    pub async fn list_all(&self) -> AppealResult<Vec<Appeal>> {
        self.store.list().await
    }

    /// Appeals that are still active: status `New` or `InProgress`
    pub async fn list_started(&self) -> AppealResult<Vec<Appeal>> {
        let appeals = self.store.list().await?;
        Ok(appeals.into_iter().filter(Appeal::is_started).collect())
    }

    /// Appeals created within the inclusive day range `[start_date, end_date]`
    ///
    /// The end bound is widened to the last stored instant of that day so a
    /// day-level "between" query covers the whole end day.
    pub async fn list_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppealResult<Vec<Appeal>> {
        let start = start_date.and_time(NaiveTime::MIN).and_utc();
        let end = end_date.and_time(NaiveTime::MIN).and_utc() + Duration::days(1)
            - Duration::milliseconds(1);

        self.store.list_by_created_range(start, end).await
    }

    /// Move an appeal into `InProgress`; legal from `New` and `Cancelled`
    pub async fn start_processing(&self, id: AppealId) -> AppealResult<Appeal> {
        self.apply_transition(id, Operation::StartProcessing, |_| {})
            .await
    }

    /// Complete an appeal with the given solution; legal from `InProgress`
    pub async fn complete_appeal(&self, id: AppealId, solution: &str) -> AppealResult<Appeal> {
        if solution.is_empty() {
            return Err(AppealError::validation("solution is required"));
        }

        let solution = solution.to_string();
        self.apply_transition(id, Operation::Complete, move |appeal| {
            appeal.solution = solution;
        })
        .await
    }

    /// Cancel an appeal; legal from `New` and `InProgress`
    ///
    /// The reason is recorded when the caller supplies one but is not
    /// required.
    pub async fn cancel_appeal(
        &self,
        id: AppealId,
        reason: Option<&str>,
    ) -> AppealResult<Appeal> {
        let reason = reason.map(str::to_string);
        self.apply_transition(id, Operation::Cancel, move |appeal| {
            if let Some(reason) = reason {
                appeal.cancel_reason = reason;
            }
        })
        .await
    }

    /// Administrative override: cancel every appeal still in `New` or
    /// `InProgress` in one atomic statement, bypassing the per-entity
    /// transition check. Returns the number of appeals cancelled.
    pub async fn cancel_all_in_progress(&self) -> AppealResult<u64> {
        let cancelled = self
            .store
            .bulk_cancel(&[AppealStatus::New, AppealStatus::InProgress])
            .await?;
        info!(cancelled, "bulk cancel applied");
        Ok(cancelled)
    }

    /// Shared read-validate-write pipeline for single-entity transitions
    async fn apply_transition(
        &self,
        id: AppealId,
        operation: Operation,
        mutate: impl FnOnce(&mut Appeal),
    ) -> AppealResult<Appeal> {
        let mut appeal = self.store.get(id).await?;
        let current = appeal.status;

        if !operation.allowed_from(current) {
            return Err(AppealError::InvalidTransition {
                status: current,
                operation,
            });
        }

        appeal.status = operation.resulting_status();
        mutate(&mut appeal);

        let updated = self.store.update(&appeal, current).await?;
        debug!(
            id = %id,
            from = %current,
            to = %updated.status,
            "appeal transition applied"
        );
        Ok(updated)
    }
}
