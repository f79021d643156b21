//! Shared error types for the appeals tracking system

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid appeal id: {input}")]
    InvalidId { input: String },

    #[error("Invalid appeal status: {input}")]
    InvalidStatus { input: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
