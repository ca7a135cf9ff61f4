//! SQLite-backed implementation of the `ScheduleStore` port.
//!
//! Provides async persistence for the three schedule record sets. All
//! queries go through the shared r2d2 pool; SQLite work runs on the
//! blocking thread pool so the async runtime is never stalled on I/O.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use planbord_core::ScheduleStore;
use planbord_domain::constants::{DATE_FORMAT, TIME_FORMAT};
use planbord_domain::{
    CityScope, DateBlock, DateSpan, NewScheduleAssignment, PlanbordError, Result,
    ScheduleAssignment, TimeSlotBlock,
};
use rusqlite::{params, Row};
use tokio::task;
use tracing::instrument;

use super::manager::{DbManager, SqliteConn, SqlitePool};
use crate::errors::InfraError;

/// SQLite implementation of the schedule store.
pub struct SqliteScheduleStore {
    pool: Arc<SqlitePool>,
}

impl SqliteScheduleStore {
    /// Create a new store backed by the shared `DbManager` pool.
    pub fn new(db: &DbManager) -> Self {
        Self { pool: db.pool() }
    }

    fn connection(pool: &SqlitePool) -> Result<SqliteConn> {
        Ok(pool.get().map_err(InfraError::from)?)
    }
}

fn map_join_error(err: task::JoinError) -> PlanbordError {
    PlanbordError::Internal(format!("blocking task failed: {err}"))
}

fn encode_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn encode_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

fn encode_scope(scope: &CityScope) -> Result<String> {
    serde_json::to_string(scope)
        .map_err(|e| PlanbordError::Internal(format!("failed to encode city scope: {e}")))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| PlanbordError::Store(format!("malformed date '{raw}' in store: {e}")))
}

fn parse_time(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .map_err(|e| PlanbordError::Store(format!("malformed time '{raw}' in store: {e}")))
}

fn parse_scope(raw: &str) -> Result<CityScope> {
    serde_json::from_str(raw)
        .map_err(|e| PlanbordError::Store(format!("malformed city scope '{raw}' in store: {e}")))
}

fn read_date_block(row: &Row<'_>) -> rusqlite::Result<(String, String, String, Option<String>, bool)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
}

fn query_date_blocks(conn: &SqliteConn, span: DateSpan) -> Result<Vec<DateBlock>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, date, cities, reason, is_full_day
             FROM date_blocks
             WHERE date >= ?1 AND date <= ?2
             ORDER BY date",
        )
        .map_err(InfraError::from)?;

    let rows = stmt
        .query_map(params![encode_date(span.start()), encode_date(span.end())], read_date_block)
        .map_err(InfraError::from)?;

    let mut blocks = Vec::new();
    for row in rows {
        let (id, date, cities, reason, is_full_day) = row.map_err(InfraError::from)?;
        blocks.push(DateBlock {
            id,
            date: parse_date(&date)?,
            scope: parse_scope(&cities)?,
            reason,
            is_full_day,
        });
    }
    Ok(blocks)
}

fn query_slot_blocks(conn: &SqliteConn, span: DateSpan) -> Result<Vec<TimeSlotBlock>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, date, start_time, end_time, cities, reason
             FROM time_slot_blocks
             WHERE date >= ?1 AND date <= ?2
             ORDER BY date, start_time",
        )
        .map_err(InfraError::from)?;

    let rows = stmt
        .query_map(params![encode_date(span.start()), encode_date(span.end())], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, Option<String>>(5)?,
            ))
        })
        .map_err(InfraError::from)?;

    let mut blocks = Vec::new();
    for row in rows {
        let (id, date, start, end, cities, reason) = row.map_err(InfraError::from)?;
        blocks.push(TimeSlotBlock {
            id,
            date: parse_date(&date)?,
            start_time: parse_time(&start)?,
            end_time: parse_time(&end)?,
            scope: parse_scope(&cities)?,
            reason,
        });
    }
    Ok(blocks)
}

fn query_assignments(conn: &SqliteConn, span: DateSpan) -> Result<Vec<ScheduleAssignment>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, date, city
             FROM schedule_assignments
             WHERE date >= ?1 AND date <= ?2
             ORDER BY date, city",
        )
        .map_err(InfraError::from)?;

    let rows = stmt
        .query_map(params![encode_date(span.start()), encode_date(span.end())], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
        })
        .map_err(InfraError::from)?;

    let mut assignments = Vec::new();
    for row in rows {
        let (id, date, city) = row.map_err(InfraError::from)?;
        assignments.push(ScheduleAssignment { id, date: parse_date(&date)?, city });
    }
    Ok(assignments)
}

#[async_trait]
impl ScheduleStore for SqliteScheduleStore {
    async fn list_date_blocks(&self, span: DateSpan) -> Result<Vec<DateBlock>> {
        let pool = Arc::clone(&self.pool);
        task::spawn_blocking(move || {
            let conn = Self::connection(&pool)?;
            query_date_blocks(&conn, span)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_time_slot_blocks(&self, span: DateSpan) -> Result<Vec<TimeSlotBlock>> {
        let pool = Arc::clone(&self.pool);
        task::spawn_blocking(move || {
            let conn = Self::connection(&pool)?;
            query_slot_blocks(&conn, span)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_assignments(&self, span: DateSpan) -> Result<Vec<ScheduleAssignment>> {
        let pool = Arc::clone(&self.pool);
        task::spawn_blocking(move || {
            let conn = Self::connection(&pool)?;
            query_assignments(&conn, span)
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self, rows), fields(count = rows.len()))]
    async fn insert_assignments(&self, rows: &[NewScheduleAssignment]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let pool = Arc::clone(&self.pool);
        let rows = rows.to_vec();

        task::spawn_blocking(move || -> Result<()> {
            let mut conn = Self::connection(&pool)?;
            let tx = conn.transaction().map_err(InfraError::from)?;
            let now = Utc::now().timestamp();
            for row in &rows {
                // UNIQUE(date, city) makes re-inserts a no-op
                tx.execute(
                    "INSERT OR IGNORE INTO schedule_assignments (id, date, city, created_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        uuid::Uuid::now_v7().to_string(),
                        encode_date(row.date),
                        row.city,
                        now
                    ],
                )
                .map_err(InfraError::from)?;
            }
            tx.commit().map_err(InfraError::from)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self))]
    async fn delete_assignment(&self, id: &str) -> Result<()> {
        let pool = Arc::clone(&self.pool);
        let id = id.to_owned();

        task::spawn_blocking(move || -> Result<()> {
            let conn = Self::connection(&pool)?;
            let affected = conn
                .execute("DELETE FROM schedule_assignments WHERE id = ?1", params![id])
                .map_err(InfraError::from)?;
            if affected == 0 {
                return Err(PlanbordError::NotFound(format!("assignment {id}")));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self, block), fields(id = %block.id, date = %block.date))]
    async fn insert_date_block(&self, block: &DateBlock) -> Result<()> {
        let pool = Arc::clone(&self.pool);
        let block = block.clone();

        task::spawn_blocking(move || -> Result<()> {
            let conn = Self::connection(&pool)?;
            conn.execute(
                "INSERT INTO date_blocks (id, date, cities, reason, is_full_day, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    block.id,
                    encode_date(block.date),
                    encode_scope(&block.scope)?,
                    block.reason,
                    block.is_full_day,
                    Utc::now().timestamp()
                ],
            )
            .map_err(InfraError::from)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self, block), fields(id = %block.id))]
    async fn update_date_block(&self, block: &DateBlock) -> Result<()> {
        let pool = Arc::clone(&self.pool);
        let block = block.clone();

        task::spawn_blocking(move || -> Result<()> {
            let conn = Self::connection(&pool)?;
            let affected = conn
                .execute(
                    "UPDATE date_blocks
                     SET date = ?2, cities = ?3, reason = ?4, is_full_day = ?5
                     WHERE id = ?1",
                    params![
                        block.id,
                        encode_date(block.date),
                        encode_scope(&block.scope)?,
                        block.reason,
                        block.is_full_day
                    ],
                )
                .map_err(InfraError::from)?;
            if affected == 0 {
                return Err(PlanbordError::NotFound(format!("date block {}", block.id)));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self))]
    async fn delete_date_block(&self, id: &str) -> Result<()> {
        let pool = Arc::clone(&self.pool);
        let id = id.to_owned();

        task::spawn_blocking(move || -> Result<()> {
            let conn = Self::connection(&pool)?;
            let affected = conn
                .execute("DELETE FROM date_blocks WHERE id = ?1", params![id])
                .map_err(InfraError::from)?;
            if affected == 0 {
                return Err(PlanbordError::NotFound(format!("date block {id}")));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self, block), fields(id = %block.id, date = %block.date))]
    async fn insert_time_slot_block(&self, block: &TimeSlotBlock) -> Result<()> {
        block.validate()?;
        let pool = Arc::clone(&self.pool);
        let block = block.clone();

        task::spawn_blocking(move || -> Result<()> {
            let conn = Self::connection(&pool)?;
            conn.execute(
                "INSERT INTO time_slot_blocks (id, date, start_time, end_time, cities, reason, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    block.id,
                    encode_date(block.date),
                    encode_time(block.start_time),
                    encode_time(block.end_time),
                    encode_scope(&block.scope)?,
                    block.reason,
                    Utc::now().timestamp()
                ],
            )
            .map_err(InfraError::from)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self, block), fields(id = %block.id))]
    async fn update_time_slot_block(&self, block: &TimeSlotBlock) -> Result<()> {
        block.validate()?;
        let pool = Arc::clone(&self.pool);
        let block = block.clone();

        task::spawn_blocking(move || -> Result<()> {
            let conn = Self::connection(&pool)?;
            let affected = conn
                .execute(
                    "UPDATE time_slot_blocks
                     SET date = ?2, start_time = ?3, end_time = ?4, cities = ?5, reason = ?6
                     WHERE id = ?1",
                    params![
                        block.id,
                        encode_date(block.date),
                        encode_time(block.start_time),
                        encode_time(block.end_time),
                        encode_scope(&block.scope)?,
                        block.reason
                    ],
                )
                .map_err(InfraError::from)?;
            if affected == 0 {
                return Err(PlanbordError::NotFound(format!("time slot block {}", block.id)));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self))]
    async fn delete_time_slot_block(&self, id: &str) -> Result<()> {
        let pool = Arc::clone(&self.pool);
        let id = id.to_owned();

        task::spawn_blocking(move || -> Result<()> {
            let conn = Self::connection(&pool)?;
            let affected = conn
                .execute("DELETE FROM time_slot_blocks WHERE id = ?1", params![id])
                .map_err(InfraError::from)?;
            if affected == 0 {
                return Err(PlanbordError::NotFound(format!("time slot block {id}")));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}
