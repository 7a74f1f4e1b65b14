//! Plan model definition and related functionality.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

use super::{Chunk, ChunkStatus};

/// Display color assigned to plans created without one.
pub const DEFAULT_PLAN_COLOR: &str = "#3b82f6";

/// Represents a complete plan with metadata and chunks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Title of the plan
    pub title: String,

    /// Free-text description of the goal, possibly empty
    #[serde(default)]
    pub description: String,

    /// Opaque display color
    pub color: String,

    /// Latest chunk deadline, recomputed whenever chunks change
    pub deadline: Option<Date>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,

    /// Chunks in creation order
    #[serde(default)]
    pub chunks: Vec<Chunk>,
}

impl Plan {
    /// Number of chunks marked done.
    pub fn done_chunks(&self) -> usize {
        self.chunks
            .iter()
            .filter(|chunk| chunk.status == ChunkStatus::Done)
            .count()
    }
}
