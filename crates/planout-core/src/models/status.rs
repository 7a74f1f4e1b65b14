//! Status enumeration for chunks.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// Type-safe enumeration of chunk statuses.
///
/// Any status may move to any other; no transition is enforced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChunkStatus {
    /// Chunk has not been started
    #[default]
    Todo,

    /// Chunk is being worked on
    InProgress,

    /// Chunk has been completed
    Done,

    /// A session of the chunk was skipped
    Skipped,

    /// A session of the chunk was pushed to a later date
    Deferred,
}

impl ChunkStatus {
    /// Every recognized status, in display order.
    pub const ALL: [ChunkStatus; 5] = [
        ChunkStatus::Todo,
        ChunkStatus::InProgress,
        ChunkStatus::Done,
        ChunkStatus::Skipped,
        ChunkStatus::Deferred,
    ];

    /// Wire and database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkStatus::Todo => "TODO",
            ChunkStatus::InProgress => "IN_PROGRESS",
            ChunkStatus::Done => "DONE",
            ChunkStatus::Skipped => "SKIPPED",
            ChunkStatus::Deferred => "DEFERRED",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use planout_core::models::ChunkStatus;
    ///
    /// assert_eq!(ChunkStatus::Done.with_icon(), "✓ Done");
    /// assert_eq!(ChunkStatus::Todo.with_icon(), "○ Todo");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            ChunkStatus::Todo => "○ Todo",
            ChunkStatus::InProgress => "➤ In Progress",
            ChunkStatus::Done => "✓ Done",
            ChunkStatus::Skipped => "↷ Skipped",
            ChunkStatus::Deferred => "⏸ Deferred",
        }
    }
}

impl FromStr for ChunkStatus {
    type Err = PlannerError;

    /// Parses the exact upper-case wire name; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChunkStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| PlannerError::InvalidStatus {
                value: s.to_string(),
            })
    }
}
