//! Lifecycle transition rules for appeals
//!
//! The transition table is a pure function of (current status, operation).
//! It holds no state; persistence and error reporting are the orchestrator's
//! job.
//!
//! | Operation        | Allowed from       | Resulting status |
//! |------------------|--------------------|------------------|
//! | StartProcessing  | New, Cancelled     | InProgress       |
//! | Complete         | InProgress         | Completed        |
//! | Cancel           | New, InProgress    | Cancelled        |
//!
//! `Cancelled` is deliberately re-startable while `Completed` has no outgoing
//! edge.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::AppealStatus;

/// A status-changing operation requested against an appeal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    StartProcessing,
    Complete,
    Cancel,
}

impl Operation {
    /// Whether this operation is legal from the given status
    pub fn allowed_from(&self, status: AppealStatus) -> bool {
        matches!(
            (*self, status),
            (Operation::StartProcessing, AppealStatus::New)
                | (Operation::StartProcessing, AppealStatus::Cancelled)
                | (Operation::Complete, AppealStatus::InProgress)
                | (Operation::Cancel, AppealStatus::New)
                | (Operation::Cancel, AppealStatus::InProgress)
        )
    }

    /// The status an appeal ends up in after this operation succeeds
    pub fn resulting_status(&self) -> AppealStatus {
        match self {
            Operation::StartProcessing => AppealStatus::InProgress,
            Operation::Complete => AppealStatus::Completed,
            Operation::Cancel => AppealStatus::Cancelled,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::StartProcessing => write!(f, "start processing"),
            Operation::Complete => write!(f, "complete"),
            Operation::Cancel => write!(f, "cancel"),
        }
    }
}
