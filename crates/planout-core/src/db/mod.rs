//! Database operations and SQLite management for plans and chunks.
//!
//! Handles the SQLite connection, schema setup and migrations, and exposes
//! query methods for plans and chunks. Every mutating chunk query restores
//! the parent plan's deadline inside the same transaction.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod chunk_queries;
pub mod migrations;
pub mod plan_queries;

pub use chunk_queries::BackfillSummary;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
