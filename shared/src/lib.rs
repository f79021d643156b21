//! Shared types for the appeals tracking system
//!
//! Contains the domain model (`Appeal`, `AppealStatus`, `AppealId`), the pure
//! lifecycle transition rules, request payload types and logging setup that
//! are used by both the orchestrator and the webserver.

pub mod errors;
pub mod lifecycle;
pub mod logging;
pub mod types;

pub use errors::{SharedError, SharedResult};
pub use lifecycle::Operation;
pub use types::{
    Appeal, AppealId, AppealStatus, CancelAppealRequest, CompleteAppealRequest,
    CreateAppealRequest, DateRangeQuery,
};
