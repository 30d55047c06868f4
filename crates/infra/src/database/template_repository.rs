//! SQLite-backed implementation of the `TemplateRepository` port.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tempo_core::timer::tags::{join_tags, parse_tags};
use tempo_core::TemplateRepository;
use tempo_domain::{Result as DomainResult, TemplateKind, TimerTemplate, TimerType};
use tokio::task;
use uuid::Uuid;

use super::manager::DbManager;
use super::rows::{opt_timestamp_at, parsed_at, timestamp_at, to_unix, uuid_at};
use crate::errors::{map_join_error, InfraError, InfraResult};

/// SQLite-backed template repository.
pub struct SqliteTemplateRepository {
    db: Arc<DbManager>,
}

impl SqliteTemplateRepository {
    /// Create a repository backed by the shared pool.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TemplateRepository for SqliteTemplateRepository {
    async fn find_template(&self, owner_id: Uuid, id: Uuid) -> DomainResult<Option<TimerTemplate>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<TimerTemplate>> {
            let conn = db.get_connection()?;
            Ok(query_template(&conn, owner_id, id)?)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_templates(&self, owner_id: Uuid) -> DomainResult<Vec<TimerTemplate>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<TimerTemplate>> {
            let conn = db.get_connection()?;
            Ok(query_templates(&conn, owner_id)?)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn save_template(&self, template: &TimerTemplate) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let template = template.clone();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            Ok(upsert_template(&conn, &template)?)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete_template(&self, owner_id: Uuid, id: Uuid) -> DomainResult<bool> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<bool> {
            let conn = db.get_connection()?;
            let deleted = conn
                .execute(
                    "DELETE FROM timer_templates WHERE id = ?1 AND owner_id = ?2",
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

const TEMPLATE_COLUMNS: &str = "id, owner_id, name, task_name, timer_type, target_duration, tags,
        notes, usage_count, last_used_at, created_at, updated_at";

const TEMPLATE_UPSERT_SQL: &str = "INSERT INTO timer_templates (
        id, owner_id, name, task_name, timer_type, target_duration, tags, notes, usage_count,
        last_used_at, created_at, updated_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
    ON CONFLICT(id) DO UPDATE SET
        name = excluded.name,
        task_name = excluded.task_name,
        timer_type = excluded.timer_type,
        target_duration = excluded.target_duration,
        tags = excluded.tags,
        notes = excluded.notes,
        usage_count = excluded.usage_count,
        last_used_at = excluded.last_used_at,
        updated_at = excluded.updated_at";

fn upsert_template(conn: &Connection, template: &TimerTemplate) -> InfraResult<()> {
    conn.execute(
        TEMPLATE_UPSERT_SQL,
        params![
            template.id.to_string(),
            template.owner_id.to_string(),
            template.name,
            template.task_name,
            template.timer_type().as_str(),
            template.kind.target_duration(),
            join_tags(&template.tags),
            template.notes,
            template.usage_count,
            to_unix(template.last_used_at),
            template.created_at.timestamp(),
            template.updated_at.timestamp(),
        ],
    )?;
    Ok(())
}

fn query_template(
    conn: &Connection,
    owner_id: Uuid,
    id: Uuid,
) -> InfraResult<Option<TimerTemplate>> {
    let sql = format!("SELECT {TEMPLATE_COLUMNS} FROM timer_templates WHERE id = ?1 AND owner_id = ?2");
    Ok(conn
        .query_row(&sql, params![id.to_string(), owner_id.to_string()], map_template_row)
        .optional()?)
}

fn query_templates(conn: &Connection, owner_id: Uuid) -> InfraResult<Vec<TimerTemplate>> {
    let sql = format!("SELECT {TEMPLATE_COLUMNS} FROM timer_templates WHERE owner_id = ?1 ORDER BY name");
    let mut stmt = conn.prepare(&sql)?;
    let templates = stmt
        .query_map(params![owner_id.to_string()], map_template_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(templates)
}

fn map_template_row(row: &Row<'_>) -> rusqlite::Result<TimerTemplate> {
    let kind = match parsed_at::<TimerType>(row, 4)? {
        TimerType::Stopwatch => TemplateKind::Stopwatch,
        TimerType::Countdown => TemplateKind::Countdown {
            target_duration: row.get::<_, Option<i64>>(5)?.unwrap_or_default(),
        },
    };
    let tags: String = row.get(6)?;

    Ok(TimerTemplate {
        id: uuid_at(row, 0)?,
        owner_id: uuid_at(row, 1)?,
        name: row.get(2)?,
        task_name: row.get(3)?,
        kind,
        tags: parse_tags(&tags),
        notes: row.get(7)?,
        usage_count: row.get(8)?,
        last_used_at: opt_timestamp_at(row, 9)?,
        created_at: timestamp_at(row, 10)?,
        updated_at: timestamp_at(row, 11)?,
    })
}
