//! SQLite-backed implementation of the `TagRepository` port.
//!
//! Tag rows are shared across timers and keyed by their normalised name.
//! Syncing replaces a timer's link rows inside one transaction.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use tempo_core::TagRepository;
use tempo_domain::constants::DEFAULT_TAG_COLOR;
use tempo_domain::{Result as DomainResult, Tag};
use tokio::task;
use tracing::debug;
use uuid::Uuid;

use super::manager::DbManager;
use super::rows::uuid_at;
use crate::errors::{map_join_error, InfraResult};

/// SQLite-backed tag repository.
pub struct SqliteTagRepository {
    db: Arc<DbManager>,
}

impl SqliteTagRepository {
    /// Create a repository backed by the shared pool.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TagRepository for SqliteTagRepository {
    async fn sync_timer_tags(&self, timer_id: Uuid, names: &[String]) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let names = names.to_vec();

        task::spawn_blocking(move || -> DomainResult<()> {
            let mut conn = db.get_connection()?;
            replace_links(&mut conn, timer_id, &names)?;
            debug!(timer_id = %timer_id, tag_count = names.len(), "Timer tags synced");
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn tags_for_timer(&self, timer_id: Uuid) -> DomainResult<Vec<Tag>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<Tag>> {
            let conn = db.get_connection()?;
            Ok(query_tags_for_timer(&conn, timer_id)?)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn save_tag(&self, tag: &Tag) -> DomainResult<Tag> {
        let db = Arc::clone(&self.db);
        let tag = tag.clone();

        task::spawn_blocking(move || -> DomainResult<Tag> {
            let conn = db.get_connection()?;
            Ok(upsert_tag(&conn, &tag)?)
        })
        .await
        .map_err(map_join_error)?
    }
}

// ============================================================================
// Synchronous SQL Operations (called inside spawn_blocking)
// ============================================================================

fn replace_links(conn: &mut Connection, timer_id: Uuid, names: &[String]) -> InfraResult<()> {
    let tx = conn.transaction()?;
    let timer_id = timer_id.to_string();
    let now = Utc::now().timestamp();

    tx.execute("DELETE FROM timer_tags WHERE timer_id = ?1", params![timer_id])?;
    for name in names {
        tx.execute(
            "INSERT OR IGNORE INTO tags (id, name, color, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![Uuid::now_v7().to_string(), name, DEFAULT_TAG_COLOR, now],
        )?;
        tx.execute(
            "INSERT OR IGNORE INTO timer_tags (timer_id, tag_id)
             SELECT ?1, id FROM tags WHERE name = ?2",
            params![timer_id, name],
        )?;
    }
    tx.commit()?;
    Ok(())
}

fn upsert_tag(conn: &Connection, tag: &Tag) -> InfraResult<Tag> {
    conn.execute(
        "INSERT INTO tags (id, name, color, created_at) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(name) DO UPDATE SET color = excluded.color",
        params![tag.id.to_string(), tag.name, tag.color, Utc::now().timestamp()],
    )?;
    let stored = conn.query_row(
        "SELECT id, name, color FROM tags WHERE name = ?1",
        params![tag.name],
        map_tag_row,
    )?;
    Ok(stored)
}

fn query_tags_for_timer(conn: &Connection, timer_id: Uuid) -> InfraResult<Vec<Tag>> {
    let mut stmt = conn.prepare(
        "SELECT tags.id, tags.name, tags.color
         FROM tags
         JOIN timer_tags ON timer_tags.tag_id = tags.id
         WHERE timer_tags.timer_id = ?1
         ORDER BY tags.name",
    )?;
    let tags = stmt
        .query_map(params![timer_id.to_string()], map_tag_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tags)
}

fn map_tag_row(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag { id: uuid_at(row, 0)?, name: row.get(1)?, color: row.get(2)? })
}
