//! Core domain types for the appeals tracking system

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::SharedError;
use crate::lifecycle::Operation;

/// Unique identifier for an appeal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppealId(Uuid);

impl AppealId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, SharedError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| SharedError::InvalidId {
                input: s.to_string(),
            })
    }
}

impl Default for AppealId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AppealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of an appeal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppealStatus {
    New,
    InProgress,
    Completed,
    Cancelled,
}

impl AppealStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppealStatus::New => "New",
            AppealStatus::InProgress => "InProgress",
            AppealStatus::Completed => "Completed",
            AppealStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for AppealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppealStatus {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(AppealStatus::New),
            "InProgress" => Ok(AppealStatus::InProgress),
            "Completed" => Ok(AppealStatus::Completed),
            "Cancelled" => Ok(AppealStatus::Cancelled),
            other => Err(SharedError::InvalidStatus {
                input: other.to_string(),
            }),
        }
    }
}

/// A support ticket progressing through a fixed status lifecycle
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Appeal {
    pub id: AppealId,
    pub theme: String,
    pub message: String,
    pub status: AppealStatus,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub solution: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cancel_reason: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appeal {
    pub fn is_new(&self) -> bool {
        self.status == AppealStatus::New
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == AppealStatus::InProgress
    }

    pub fn is_completed(&self) -> bool {
        self.status == AppealStatus::Completed
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == AppealStatus::Cancelled
    }

    /// An appeal counts as started while it has not reached a settled status
    pub fn is_started(&self) -> bool {
        self.is_new() || self.is_in_progress()
    }

    pub fn can_start_processing(&self) -> bool {
        Operation::StartProcessing.allowed_from(self.status)
    }

    pub fn can_complete(&self) -> bool {
        Operation::Complete.allowed_from(self.status)
    }

    pub fn can_cancel(&self) -> bool {
        Operation::Cancel.allowed_from(self.status)
    }
}

/// Payload for creating an appeal
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateAppealRequest {
    pub theme: String,
    pub message: String,
}

/// Payload for completing an appeal
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompleteAppealRequest {
    pub solution: String,
}

/// Payload for cancelling an appeal; the reason is recorded when supplied
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CancelAppealRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

/// Query parameters for the created-at date range listing
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DateRangeQuery {
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}
