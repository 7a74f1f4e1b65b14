//! Chunk CRUD operations, deadline aggregation and backfill.

use jiff::{Timestamp, civil::Date};
use rusqlite::{Connection, OptionalExtension, params, types::Type};
use serde_json::{Map, Value};

use super::plan_queries::{date_column, plan_exists, timestamp_column};
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Chunk, ChunkDraft, ChunkStatus, Frequency, UpdateChunkRequest},
    schedule,
};

const CHUNK_COLUMNS: &str = "id, plan_id, title, description, status, estimated_hours, duration_minutes, frequency, scheduled_date, deadline, history, position, created_at, updated_at";
const NEXT_POSITION_SQL: &str =
    "SELECT COALESCE(MAX(position), -1) + 1 FROM chunks WHERE plan_id = ?1";
const INSERT_CHUNK_SQL: &str = "INSERT INTO chunks (plan_id, title, description, status, estimated_hours, duration_minutes, frequency, scheduled_date, deadline, history, position, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";
const UPDATE_CHUNK_SQL: &str = "UPDATE chunks SET title = ?1, description = ?2, status = ?3, estimated_hours = ?4, duration_minutes = ?5, frequency = ?6, deadline = ?7, history = ?8, updated_at = ?9 WHERE id = ?10";
const DELETE_CHUNK_SQL: &str = "DELETE FROM chunks WHERE id = ?1 AND plan_id = ?2";
const SELECT_CHUNK_DEADLINES_SQL: &str = "SELECT deadline FROM chunks WHERE plan_id = ?1";
const UPDATE_PLAN_DEADLINE_SQL: &str = "UPDATE plans SET deadline = ?1 WHERE id = ?2";
const UPDATE_PLAN_TIMESTAMP_SQL: &str = "UPDATE plans SET updated_at = ?1 WHERE id = ?2";
const SELECT_CHUNKS_MISSING_DEADLINE_SQL: &str =
    "SELECT id, estimated_hours, duration_minutes, frequency, scheduled_date FROM chunks WHERE deadline IS NULL";
const SET_CHUNK_DEADLINE_SQL: &str = "UPDATE chunks SET deadline = ?1 WHERE id = ?2";
const SELECT_PLAN_IDS_SQL: &str = "SELECT id FROM plans ORDER BY id";

/// Outcome of a deadline backfill run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillSummary {
    /// Chunks that received a computed deadline
    pub chunks_updated: usize,
    /// Plans whose deadline was recomputed
    pub plans_recalculated: usize,
}

/// Recomputes and stores a plan's deadline from its chunks.
///
/// Takes a plain connection so it can run inside an open transaction.
fn refresh_plan_deadline(conn: &Connection, plan_id: u64) -> Result<Option<Date>> {
    let mut stmt = conn
        .prepare(SELECT_CHUNK_DEADLINES_SQL)
        .map_err(|e| PlannerError::database_error("Failed to prepare query", e))?;

    let deadlines = stmt
        .query_map(params![plan_id as i64], |row| date_column(row, 0))
        .map_err(|e| PlannerError::database_error("Failed to query chunk deadlines", e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| PlannerError::database_error("Failed to fetch chunk deadlines", e))?;

    let deadline = schedule::latest_deadline(deadlines);

    conn.execute(
        UPDATE_PLAN_DEADLINE_SQL,
        params![deadline.map(|d| d.to_string()), plan_id as i64],
    )
    .map_err(|e| PlannerError::database_error("Failed to update plan deadline", e))?;

    Ok(deadline)
}

fn history_to_text(history: &Map<String, Value>) -> Result<String> {
    Ok(serde_json::to_string(history)?)
}

impl super::Database {
    /// Helper function to construct a Chunk from a database row
    fn build_chunk_from_row(row: &rusqlite::Row) -> rusqlite::Result<Chunk> {
        let status_str: String = row.get(4)?;
        let status = status_str.parse::<ChunkStatus>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
        })?;

        let history = match row.get::<_, Option<String>>(10)? {
            Some(text) if !text.is_empty() => serde_json::from_str(&text).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(10, Type::Text, Box::new(e))
            })?,
            _ => Map::new(),
        };

        Ok(Chunk {
            id: row.get::<_, i64>(0)? as u64,
            plan_id: row.get::<_, i64>(1)? as u64,
            title: row.get(2)?,
            description: row.get(3)?,
            status,
            estimated_hours: row.get(5)?,
            duration_minutes: row.get(6)?,
            frequency: Frequency::parse(&row.get::<_, String>(7)?),
            scheduled_date: date_column(row, 8)?,
            deadline: date_column(row, 9)?,
            history,
            position: row.get::<_, i64>(11)? as u32,
            created_at: timestamp_column(row, 12)?,
            updated_at: timestamp_column(row, 13)?,
        })
    }

    fn select_chunk(conn: &Connection, plan_id: u64, chunk_id: u64) -> Result<Option<Chunk>> {
        conn.query_row(
            &format!("SELECT {CHUNK_COLUMNS} FROM chunks WHERE id = ?1 AND plan_id = ?2"),
            params![chunk_id as i64, plan_id as i64],
            Self::build_chunk_from_row,
        )
        .optional()
        .map_err(|e| PlannerError::database_error("Failed to query chunk", e))
    }

    /// Appends `drafts` to a plan in order and restores the plan deadline.
    ///
    /// Returns the persisted chunks.
    pub fn insert_chunks(&mut self, plan_id: u64, drafts: &[ChunkDraft]) -> Result<Vec<Chunk>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if !plan_exists(&tx, plan_id)? {
            return Err(PlannerError::PlanNotFound { id: plan_id });
        }

        let mut position: i64 = tx
            .query_row(NEXT_POSITION_SQL, params![plan_id as i64], |row| row.get(0))
            .db_context("Failed to get next chunk position")?;

        let now = Timestamp::now();
        let now_str = now.to_string();
        let mut chunks = Vec::with_capacity(drafts.len());

        for draft in drafts {
            tx.execute(
                INSERT_CHUNK_SQL,
                params![
                    plan_id as i64,
                    &draft.title,
                    &draft.description,
                    draft.status.as_str(),
                    draft.estimated_hours,
                    draft.duration_minutes,
                    draft.frequency.as_str(),
                    draft.scheduled_date.map(|d| d.to_string()),
                    draft.deadline.map(|d| d.to_string()),
                    history_to_text(&draft.history)?,
                    position,
                    &now_str,
                    &now_str
                ],
            )
            .map_err(|e| PlannerError::database_error("Failed to insert chunk", e))?;

            chunks.push(Chunk {
                id: tx.last_insert_rowid() as u64,
                plan_id,
                title: draft.title.clone(),
                description: draft.description.clone(),
                status: draft.status,
                estimated_hours: draft.estimated_hours,
                duration_minutes: draft.duration_minutes,
                frequency: draft.frequency.clone(),
                scheduled_date: draft.scheduled_date,
                deadline: draft.deadline,
                history: draft.history.clone(),
                position: position as u32,
                created_at: now,
                updated_at: now,
            });
            position += 1;
        }

        refresh_plan_deadline(&tx, plan_id)?;
        tx.execute(UPDATE_PLAN_TIMESTAMP_SQL, params![&now_str, plan_id as i64])
            .map_err(|e| PlannerError::database_error("Failed to update plan timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(chunks)
    }

    /// Retrieves all chunks for a given plan in creation order.
    pub fn get_chunks(&self, plan_id: u64) -> Result<Vec<Chunk>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {CHUNK_COLUMNS} FROM chunks WHERE plan_id = ?1 ORDER BY position, id"
            ))
            .map_err(|e| PlannerError::database_error("Failed to prepare query", e))?;

        let chunks = stmt
            .query_map(params![plan_id as i64], Self::build_chunk_from_row)
            .map_err(|e| PlannerError::database_error("Failed to query chunks", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| PlannerError::database_error("Failed to fetch chunks", e))?;

        Ok(chunks)
    }

    /// Retrieves one chunk, only if it belongs to `plan_id`.
    pub fn get_chunk(&self, plan_id: u64, chunk_id: u64) -> Result<Option<Chunk>> {
        Self::select_chunk(&self.connection, plan_id, chunk_id)
    }

    /// Applies a partial update to a chunk and restores the plan deadline.
    ///
    /// A chunk that exists under a different plan is reported as not found.
    pub fn update_chunk(
        &mut self,
        plan_id: u64,
        chunk_id: u64,
        request: UpdateChunkRequest,
    ) -> Result<Chunk> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if !plan_exists(&tx, plan_id)? {
            return Err(PlannerError::PlanNotFound { id: plan_id });
        }

        let mut chunk = Self::select_chunk(&tx, plan_id, chunk_id)?
            .ok_or(PlannerError::ChunkNotFound { id: chunk_id })?;

        if let Some(title) = request.title {
            chunk.title = title;
        }
        if let Some(description) = request.description {
            chunk.description = Some(description);
        }
        if let Some(status) = request.status {
            chunk.status = status;
        }
        if let Some(hours) = request.estimated_hours {
            chunk.estimated_hours = hours;
        }
        if let Some(minutes) = request.duration_minutes {
            chunk.duration_minutes = minutes;
        }
        if let Some(frequency) = request.frequency {
            chunk.frequency = frequency;
        }
        if let Some(deadline) = request.deadline {
            chunk.deadline = Some(deadline);
        }
        if let Some(history) = request.history {
            chunk.history = history;
        }

        let now = Timestamp::now();
        let now_str = now.to_string();
        chunk.updated_at = now;

        tx.execute(
            UPDATE_CHUNK_SQL,
            params![
                &chunk.title,
                &chunk.description,
                chunk.status.as_str(),
                chunk.estimated_hours,
                chunk.duration_minutes,
                chunk.frequency.as_str(),
                chunk.deadline.map(|d| d.to_string()),
                history_to_text(&chunk.history)?,
                &now_str,
                chunk_id as i64
            ],
        )
        .map_err(|e| PlannerError::database_error("Failed to update chunk", e))?;

        refresh_plan_deadline(&tx, plan_id)?;
        tx.execute(UPDATE_PLAN_TIMESTAMP_SQL, params![&now_str, plan_id as i64])
            .map_err(|e| PlannerError::database_error("Failed to update plan timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(chunk)
    }

    /// Deletes a chunk of a plan and restores the plan deadline.
    ///
    /// Returns the deleted chunk.
    pub fn delete_chunk(&mut self, plan_id: u64, chunk_id: u64) -> Result<Chunk> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if !plan_exists(&tx, plan_id)? {
            return Err(PlannerError::PlanNotFound { id: plan_id });
        }

        let chunk = Self::select_chunk(&tx, plan_id, chunk_id)?
            .ok_or(PlannerError::ChunkNotFound { id: chunk_id })?;

        tx.execute(DELETE_CHUNK_SQL, params![chunk_id as i64, plan_id as i64])
            .map_err(|e| PlannerError::database_error("Failed to delete chunk", e))?;

        refresh_plan_deadline(&tx, plan_id)?;
        tx.execute(
            UPDATE_PLAN_TIMESTAMP_SQL,
            params![Timestamp::now().to_string(), plan_id as i64],
        )
        .map_err(|e| PlannerError::database_error("Failed to update plan timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(chunk)
    }

    /// Recomputes a plan's deadline as the latest of its chunk deadlines.
    pub fn recalculate_plan_deadline(&mut self, plan_id: u64) -> Result<Option<Date>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if !plan_exists(&tx, plan_id)? {
            return Err(PlannerError::PlanNotFound { id: plan_id });
        }

        let deadline = refresh_plan_deadline(&tx, plan_id)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(deadline)
    }

    /// Fills in missing chunk deadlines from each chunk's effort and cadence,
    /// counting from its scheduled date or `today`, then recomputes every
    /// plan's deadline.
    pub fn backfill_deadlines(&mut self, today: Date) -> Result<BackfillSummary> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let pending = {
            let mut stmt = tx
                .prepare(SELECT_CHUNKS_MISSING_DEADLINE_SQL)
                .map_err(|e| PlannerError::database_error("Failed to prepare query", e))?;

            stmt.query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, i64>(2)?,
                    Frequency::parse(&row.get::<_, String>(3)?),
                    date_column(row, 4)?,
                ))
            })
            .map_err(|e| PlannerError::database_error("Failed to query chunks", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| PlannerError::database_error("Failed to fetch chunks", e))?
        };

        let mut summary = BackfillSummary::default();

        for (chunk_id, hours, minutes, frequency, scheduled) in pending {
            let start = scheduled.unwrap_or(today);
            let Some(deadline) = schedule::calculate_deadline(hours, minutes, &frequency, start)
            else {
                log::debug!("Chunk {chunk_id} has no computable deadline");
                continue;
            };

            tx.execute(
                SET_CHUNK_DEADLINE_SQL,
                params![deadline.to_string(), chunk_id],
            )
            .map_err(|e| PlannerError::database_error("Failed to set chunk deadline", e))?;
            summary.chunks_updated += 1;
        }

        let plan_ids = {
            let mut stmt = tx
                .prepare(SELECT_PLAN_IDS_SQL)
                .map_err(|e| PlannerError::database_error("Failed to prepare query", e))?;

            stmt.query_map([], |row| row.get::<_, i64>(0))
                .map_err(|e| PlannerError::database_error("Failed to query plans", e))?
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| PlannerError::database_error("Failed to fetch plans", e))?
        };

        for plan_id in plan_ids {
            refresh_plan_deadline(&tx, plan_id as u64)?;
            summary.plans_recalculated += 1;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(summary)
    }
}
