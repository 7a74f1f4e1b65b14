//! Chunk model definition and related functionality.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ChunkStatus, Frequency};

/// Effort assumed for a chunk when none is supplied.
pub const DEFAULT_ESTIMATED_HOURS: f64 = 1.0;

/// Session length assumed for a chunk when none is supplied.
pub const DEFAULT_DURATION_MINUTES: i64 = 30;

/// One unit of work belonging to a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// Unique identifier for the chunk
    pub id: u64,

    /// ID of the parent plan
    pub plan_id: u64,

    /// Brief title of the work session
    pub title: String,

    /// Optional execution notes
    pub description: Option<String>,

    /// Current status of the chunk
    pub status: ChunkStatus,

    /// Estimated total effort in hours
    pub estimated_hours: f64,

    /// Length of one work session in minutes
    pub duration_minutes: i64,

    /// How often sessions recur
    pub frequency: Frequency,

    /// Date assigned by the scheduler
    pub scheduled_date: Option<Date>,

    /// Date by which the work should be finished
    pub deadline: Option<Date>,

    /// Skip and defer bookkeeping, stored as-is
    #[serde(default)]
    pub history: Map<String, Value>,

    /// Order of the chunk within the plan (0-indexed)
    pub position: u32,

    /// Timestamp when the chunk was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the chunk was last updated (UTC)
    pub updated_at: Timestamp,
}

/// A chunk that has not been persisted yet.
///
/// Produced by the heuristic splitter or built from caller input, then
/// scheduled and inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkDraft {
    pub title: String,
    pub description: Option<String>,
    pub status: ChunkStatus,
    pub estimated_hours: f64,
    pub duration_minutes: i64,
    pub frequency: Frequency,
    pub scheduled_date: Option<Date>,
    pub deadline: Option<Date>,
    pub history: Map<String, Value>,
}

impl ChunkDraft {
    /// Creates a draft with the given title and default attributes.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: ChunkStatus::default(),
            estimated_hours: DEFAULT_ESTIMATED_HOURS,
            duration_minutes: DEFAULT_DURATION_MINUTES,
            frequency: Frequency::default(),
            scheduled_date: None,
            deadline: None,
            history: Map::new(),
        }
    }
}
