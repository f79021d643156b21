//! Orchestrator library for the appeals lifecycle
//!
//! Composes the pure lifecycle rules from `shared` with a durable appeal
//! store: read current state, validate the requested transition, persist the
//! new state. Also owns the bulk-cancel and date-range operations that have
//! no single-entity analogue.

pub mod error;
pub mod orchestrator;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use error::{AppealError, AppealResult};
pub use orchestrator::Orchestrator;
pub use services::SqliteStore;
pub use traits::AppealStore;
