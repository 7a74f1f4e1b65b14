//! Plan CRUD operations and queries.

use jiff::{Timestamp, civil::Date};
use rusqlite::{Connection, OptionalExtension, params, types::Type};

use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{DEFAULT_PLAN_COLOR, Plan},
    params::PlanChanges,
};

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (title, description, color, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_PLAN_SQL: &str =
    "SELECT id, title, description, color, deadline, created_at, updated_at FROM plans WHERE id = ?1";
const SELECT_PLANS_SQL: &str =
    "SELECT id, title, description, color, deadline, created_at, updated_at FROM plans ORDER BY id";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1)";
const UPDATE_PLAN_SQL: &str = "UPDATE plans SET title = COALESCE(?1, title), description = COALESCE(?2, description), color = COALESCE(?3, color), updated_at = ?4 WHERE id = ?5";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";

/// Parses an optional `YYYY-MM-DD` column.
pub(super) fn date_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Option<Date>> {
    row.get::<_, Option<String>>(idx)?
        .map(|s| {
            s.parse::<Date>()
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
        })
        .transpose()
}

/// Parses an RFC 3339 timestamp column.
pub(super) fn timestamp_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Returns whether a plan with `plan_id` exists.
pub(super) fn plan_exists(conn: &Connection, plan_id: u64) -> Result<bool> {
    conn.query_row(CHECK_PLAN_EXISTS_SQL, params![plan_id as i64], |row| {
        row.get(0)
    })
    .db_context("Failed to check plan existence")
}

impl super::Database {
    /// Helper function to construct a Plan (without chunks) from a row
    fn build_plan_from_row(row: &rusqlite::Row) -> rusqlite::Result<Plan> {
        Ok(Plan {
            id: row.get::<_, i64>(0)? as u64,
            title: row.get(1)?,
            description: row.get(2)?,
            color: row.get(3)?,
            deadline: date_column(row, 4)?,
            created_at: timestamp_column(row, 5)?,
            updated_at: timestamp_column(row, 6)?,
            chunks: Vec::new(),
        })
    }

    /// Creates a new plan. A missing color gets the default one.
    pub fn create_plan(
        &mut self,
        title: &str,
        description: Option<&str>,
        color: Option<&str>,
    ) -> Result<Plan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();
        let description = description.unwrap_or_default();
        let color = color.unwrap_or(DEFAULT_PLAN_COLOR);

        tx.execute(
            INSERT_PLAN_SQL,
            params![title, description, color, &now_str, &now_str],
        )
        .map_err(|e| PlannerError::database_error("Failed to insert plan", e))?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Plan {
            id,
            title: title.into(),
            description: description.into(),
            color: color.into(),
            deadline: None,
            created_at: now,
            updated_at: now,
            chunks: Vec::new(),
        })
    }

    /// Retrieves a plan by its ID, chunks included.
    pub fn get_plan(&self, id: u64) -> Result<Option<Plan>> {
        let mut plan = self
            .connection
            .query_row(SELECT_PLAN_SQL, params![id as i64], Self::build_plan_from_row)
            .optional()
            .map_err(|e| PlannerError::database_error("Failed to query plan", e))?;

        if let Some(ref mut plan) = plan {
            plan.chunks = self.get_chunks(plan.id)?;
        }

        Ok(plan)
    }

    /// Lists every plan in creation order, chunks included.
    pub fn list_plans(&self) -> Result<Vec<Plan>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLANS_SQL)
            .map_err(|e| PlannerError::database_error("Failed to prepare query", e))?;

        let mut plans = stmt
            .query_map([], Self::build_plan_from_row)
            .map_err(|e| PlannerError::database_error("Failed to query plans", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| PlannerError::database_error("Failed to fetch plans", e))?;

        for plan in &mut plans {
            plan.chunks = self.get_chunks(plan.id)?;
        }

        Ok(plans)
    }

    /// Applies the non-empty fields of `changes` to a plan.
    pub fn update_plan(&mut self, id: u64, changes: &PlanChanges) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = Timestamp::now().to_string();
        let affected = tx
            .execute(
                UPDATE_PLAN_SQL,
                params![
                    changes.title.as_deref(),
                    changes.description.as_deref(),
                    changes.color.as_deref(),
                    &now_str,
                    id as i64
                ],
            )
            .map_err(|e| PlannerError::database_error("Failed to update plan", e))?;

        if affected == 0 {
            return Err(PlannerError::PlanNotFound { id });
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Deletes a plan; its chunks go with it through the foreign key cascade.
    pub fn delete_plan(&mut self, id: u64) -> Result<()> {
        let affected = self
            .connection
            .execute(DELETE_PLAN_SQL, params![id as i64])
            .map_err(|e| PlannerError::database_error("Failed to delete plan", e))?;

        if affected == 0 {
            return Err(PlannerError::PlanNotFound { id });
        }

        Ok(())
    }
}
