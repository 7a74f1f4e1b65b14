//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, PlannerError, Result};

const HAS_HISTORY_COLUMN_SQL: &str =
    "SELECT COUNT(*) FROM pragma_table_info('chunks') WHERE name = 'history'";
const ADD_HISTORY_COLUMN_SQL: &str =
    "ALTER TABLE chunks ADD COLUMN history TEXT NOT NULL DEFAULT '{}'";

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Cascading deletes rely on this, and it is per connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        // Databases created before skip/defer tracking lack the history column
        let has_history_column: bool = self
            .connection
            .query_row(HAS_HISTORY_COLUMN_SQL, [], |row| row.get(0))
            .map(|count: i64| count > 0)
            .db_context("Failed to inspect chunks table")?;

        if !has_history_column {
            log::info!("Adding history column to chunks table");
            self.connection
                .execute(ADD_HISTORY_COLUMN_SQL, [])
                .map_err(|e| {
                    PlannerError::database_error("Failed to add history column to chunks table", e)
                })?;
        }

        Ok(())
    }
}
