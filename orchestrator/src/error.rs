//! Error taxonomy for appeal operations

use shared::{AppealId, AppealStatus, Operation, SharedError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppealError {
    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Appeal {id} not found")]
    NotFound { id: AppealId },

    #[error("Cannot {operation} appeal with status: {status}")]
    InvalidTransition {
        status: AppealStatus,
        operation: Operation,
    },

    #[error("Appeal {id} no longer has status {expected}")]
    Conflict {
        id: AppealId,
        expected: AppealStatus,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Shared component error")]
    Shared(#[from] SharedError),
}

impl AppealError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppealError::Validation {
            message: message.into(),
        }
    }
}

pub type AppealResult<T> = Result<T, AppealError>;
