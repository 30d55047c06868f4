//! SQLite-backed implementation of the `TimerRepository` port.
//!
//! All database operations run in `spawn_blocking` to avoid blocking the
//! async runtime. Range queries use half-open `[start, end)` predicates on
//! `created_at` so the `(owner_id, created_at)` index is used.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tempo_core::timer::tags::{join_tags, parse_tags};
use tempo_core::TimerRepository;
use tempo_domain::{DateRange, Result as DomainResult, Timer, TimerKind, TimerType};
use tokio::task;
use uuid::Uuid;

use super::manager::DbManager;
use super::rows::{opt_timestamp_at, parsed_at, timestamp_at, to_unix, uuid_at};
use crate::errors::{map_join_error, InfraError, InfraResult};

/// SQLite-backed timer repository.
pub struct SqliteTimerRepository {
    db: Arc<DbManager>,
}

impl SqliteTimerRepository {
    /// Create a repository backed by the shared pool.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TimerRepository for SqliteTimerRepository {
    async fn find_timer(&self, owner_id: Uuid, id: Uuid) -> DomainResult<Option<Timer>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<Timer>> {
            let conn = db.get_connection()?;
            Ok(query_timer(&conn, owner_id, id)?)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn load_timers_for_owner(
        &self,
        owner_id: Uuid,
        range: DateRange,
    ) -> DomainResult<Vec<Timer>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<Timer>> {
            let conn = db.get_connection()?;
            Ok(query_timers_in_range(&conn, owner_id, range)?)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn save(&self, timer: &Timer) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let timer = timer.clone();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            Ok(upsert_timer(&conn, &timer)?)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> DomainResult<bool> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<bool> {
            let conn = db.get_connection()?;
            let deleted = conn
                .execute(
                    "DELETE FROM timers WHERE id = ?1 AND owner_id = ?2",
                    params![id.to_string(), owner_id.to_string()],
                )
                .map_err(InfraError::from)?;
            Ok(deleted > 0)
        })
        .await
        .map_err(map_join_error)?
    }
}

// ============================================================================
// Synchronous SQL Operations (called inside spawn_blocking)
// ============================================================================

const TIMER_COLUMNS: &str = "id, owner_id, task_name, timer_type, status, start_time, end_time,
        duration, target_duration, remaining_duration, completed_at, tags, notes, created_at,
        updated_at";

/// Last write wins; a concurrent save of the same timer simply replaces it.
const TIMER_UPSERT_SQL: &str = "INSERT INTO timers (
        id, owner_id, task_name, timer_type, status, start_time, end_time, duration,
        target_duration, remaining_duration, completed_at, tags, notes, created_at, updated_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
    ON CONFLICT(id) DO UPDATE SET
        task_name = excluded.task_name,
        timer_type = excluded.timer_type,
        status = excluded.status,
        start_time = excluded.start_time,
        end_time = excluded.end_time,
        duration = excluded.duration,
        target_duration = excluded.target_duration,
        remaining_duration = excluded.remaining_duration,
        completed_at = excluded.completed_at,
        tags = excluded.tags,
        notes = excluded.notes,
        updated_at = excluded.updated_at";

fn upsert_timer(conn: &Connection, timer: &Timer) -> InfraResult<()> {
    conn.execute(
        TIMER_UPSERT_SQL,
        params![
            timer.id.to_string(),
            timer.owner_id.to_string(),
            timer.task_name,
            timer.timer_type().as_str(),
            timer.status.as_str(),
            to_unix(timer.start_time),
            to_unix(timer.end_time),
            timer.duration,
            timer.target_duration(),
            timer.remaining_duration(),
            to_unix(timer.completed_at),
            join_tags(&timer.tags),
            timer.notes,
            timer.created_at.timestamp(),
            timer.updated_at.timestamp(),
        ],
    )?;
    Ok(())
}

fn query_timer(conn: &Connection, owner_id: Uuid, id: Uuid) -> InfraResult<Option<Timer>> {
    let sql = format!("SELECT {TIMER_COLUMNS} FROM timers WHERE id = ?1 AND owner_id = ?2");
    Ok(conn
        .query_row(&sql, params![id.to_string(), owner_id.to_string()], map_timer_row)
        .optional()?)
}

fn query_timers_in_range(
    conn: &Connection,
    owner_id: Uuid,
    range: DateRange,
) -> InfraResult<Vec<Timer>> {
    let sql = format!(
        "SELECT {TIMER_COLUMNS} FROM timers
         WHERE owner_id = ?1 AND created_at >= ?2 AND created_at < ?3
         ORDER BY created_at DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let timers = stmt
        .query_map(
            params![owner_id.to_string(), range.start.timestamp(), range.end.timestamp()],
            map_timer_row,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(timers)
}

fn map_timer_row(row: &Row<'_>) -> rusqlite::Result<Timer> {
    let kind = match parsed_at::<TimerType>(row, 3)? {
        TimerType::Stopwatch => TimerKind::Stopwatch,
        TimerType::Countdown => {
            let target_duration: i64 = row.get::<_, Option<i64>>(8)?.unwrap_or_default();
            let remaining_duration = row.get::<_, Option<i64>>(9)?.unwrap_or(target_duration);
            TimerKind::Countdown { target_duration, remaining_duration }
        }
    };
    let tags: String = row.get(11)?;

    Ok(Timer {
        id: uuid_at(row, 0)?,
        owner_id: uuid_at(row, 1)?,
        task_name: row.get(2)?,
        kind,
        status: parsed_at(row, 4)?,
        start_time: opt_timestamp_at(row, 5)?,
        end_time: opt_timestamp_at(row, 6)?,
        duration: row.get(7)?,
        completed_at: opt_timestamp_at(row, 10)?,
        tags: parse_tags(&tags),
        notes: row.get(12)?,
        created_at: timestamp_at(row, 13)?,
        updated_at: timestamp_at(row, 14)?,
    })
}
