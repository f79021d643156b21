//! SQLite-backed appeal store
//!
//! Uses SQLite with WAL mode so reads stay concurrent with writes. The
//! connection sits behind a mutex; every statement is durable before the
//! call returns.

// Mutex poisoning indicates a panic in another thread, which is unrecoverable.
#![allow(clippy::missing_panics_doc)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OpenFlags, Row, ToSql};

use shared::{Appeal, AppealId, AppealStatus};

use crate::error::{AppealError, AppealResult};
use crate::traits::AppealStore;

/// Schema SQL embedded at compile time.
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// The appeal store backed by SQLite.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens or creates the appeals database at the specified path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open(path: impl AsRef<Path>) -> AppealResult<Self> {
        let conn = Connection::open_with_flags(
            path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Self::initialize_connection(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Creates an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn in_memory() -> AppealResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize_connection(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn initialize_connection(conn: &Connection) -> AppealResult<()> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }
}

/// Timestamps are persisted at millisecond precision; creation uses a single
/// captured instant so `created_at == updated_at` holds exactly.
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

fn datetime_from_millis(column: usize, ms: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(column, ms))
}

fn appeal_from_row(row: &Row<'_>) -> rusqlite::Result<Appeal> {
    let id_text: String = row.get(0)?;
    let status_text: String = row.get(3)?;

    let id = AppealId::from_string(&id_text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let status = status_text.parse::<AppealStatus>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Appeal {
        id,
        theme: row.get(1)?,
        message: row.get(2)?,
        status,
        solution: row.get(4)?,
        cancel_reason: row.get(5)?,
        created_at: datetime_from_millis(6, row.get(6)?)?,
        updated_at: datetime_from_millis(7, row.get(7)?)?,
    })
}

const SELECT_COLUMNS: &str =
    "id, theme, message, status, solution, cancel_reason, created_at, updated_at";

#[async_trait::async_trait]
impl AppealStore for SqliteStore {
    async fn create(&self, theme: &str, message: &str) -> AppealResult<Appeal> {
        let now = now_millis();
        let appeal = Appeal {
            id: AppealId::new(),
            theme: theme.to_string(),
            message: message.to_string(),
            status: AppealStatus::New,
            solution: String::new(),
            cancel_reason: String::new(),
            created_at: now,
            updated_at: now,
        };

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO appeals (id, theme, message, status, solution, cancel_reason, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                appeal.id.to_string(),
                appeal.theme,
                appeal.message,
                appeal.status.as_str(),
                appeal.solution,
                appeal.cancel_reason,
                appeal.created_at.timestamp_millis(),
                appeal.updated_at.timestamp_millis(),
            ],
        )?;

        Ok(appeal)
    }

    async fn get(&self, id: AppealId) -> AppealResult<Appeal> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM appeals WHERE id = ?1"
        ))?;

        stmt.query_row(params![id.to_string()], appeal_from_row)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => AppealError::NotFound { id },
                other => AppealError::Storage(other),
            })
    }

    async fn list(&self) -> AppealResult<Vec<Appeal>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM appeals ORDER BY rowid ASC"
        ))?;

        let appeals = stmt
            .query_map([], appeal_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(appeals)
    }

    async fn list_by_created_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppealResult<Vec<Appeal>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM appeals
             WHERE created_at BETWEEN ?1 AND ?2
             ORDER BY created_at ASC"
        ))?;

        let appeals = stmt
            .query_map(
                params![start.timestamp_millis(), end.timestamp_millis()],
                appeal_from_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(appeals)
    }

    async fn update(
        &self,
        appeal: &Appeal,
        expected_status: AppealStatus,
    ) -> AppealResult<Appeal> {
        let updated_at = now_millis();

        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE appeals
             SET theme = ?1, message = ?2, status = ?3, solution = ?4,
                 cancel_reason = ?5, updated_at = ?6
             WHERE id = ?7 AND status = ?8",
            params![
                appeal.theme,
                appeal.message,
                appeal.status.as_str(),
                appeal.solution,
                appeal.cancel_reason,
                updated_at.timestamp_millis(),
                appeal.id.to_string(),
                expected_status.as_str(),
            ],
        )?;

        if changed == 0 {
            // Distinguish a missing row from a row whose status moved
            // underneath the caller.
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM appeals WHERE id = ?1)",
                params![appeal.id.to_string()],
                |row| row.get(0),
            )?;
            return Err(if exists {
                AppealError::Conflict {
                    id: appeal.id,
                    expected: expected_status,
                }
            } else {
                AppealError::NotFound { id: appeal.id }
            });
        }

        Ok(Appeal {
            updated_at,
            ..appeal.clone()
        })
    }

    async fn bulk_cancel(&self, from_statuses: &[AppealStatus]) -> AppealResult<u64> {
        if from_statuses.is_empty() {
            return Ok(0);
        }

        let placeholders = vec!["?"; from_statuses.len()].join(", ");
        let sql = format!(
            "UPDATE appeals SET status = ?, updated_at = ? WHERE status IN ({placeholders})"
        );

        let cancelled = AppealStatus::Cancelled.as_str();
        let updated_at = now_millis().timestamp_millis();
        let sources: Vec<&str> = from_statuses.iter().map(AppealStatus::as_str).collect();

        let mut args: Vec<&dyn ToSql> = vec![&cancelled, &updated_at];
        for source in &sources {
            args.push(source);
        }

        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(&sql, &args[..])?;

        Ok(changed as u64)
    }
}
