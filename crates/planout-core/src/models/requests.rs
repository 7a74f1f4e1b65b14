//! Validated request types built from [`crate::params`].

use std::str::FromStr;

use jiff::civil::Date;
use serde_json::{Map, Value};

use super::{
    ChunkDraft, ChunkStatus, Frequency,
    chunk::{DEFAULT_DURATION_MINUTES, DEFAULT_ESTIMATED_HOURS},
};
use crate::{
    error::PlannerError,
    params::{ChunkChanges, NewChunk},
    schedule,
};

/// Typed partial update of a chunk.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UpdateChunkRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ChunkStatus>,
    pub estimated_hours: Option<f64>,
    pub duration_minutes: Option<i64>,
    pub frequency: Option<Frequency>,
    pub deadline: Option<Date>,
    pub history: Option<Map<String, Value>>,
}

impl UpdateChunkRequest {
    /// Human-readable list of the fields this request changes.
    pub fn describe_changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if self.title.is_some() {
            changes.push("Updated title".to_string());
        }
        if self.description.is_some() {
            changes.push("Updated description".to_string());
        }
        if let Some(status) = self.status {
            changes.push(format!("Changed status to {}", status.as_str()));
        }
        if self.estimated_hours.is_some() {
            changes.push("Updated estimated hours".to_string());
        }
        if self.duration_minutes.is_some() {
            changes.push("Updated session length".to_string());
        }
        if let Some(frequency) = &self.frequency {
            changes.push(format!("Changed frequency to {}", frequency.as_str()));
        }
        if let Some(deadline) = self.deadline {
            changes.push(format!("Set deadline to {deadline}"));
        }
        if self.history.is_some() {
            changes.push("Replaced history".to_string());
        }
        changes
    }
}

impl TryFrom<ChunkChanges> for UpdateChunkRequest {
    type Error = PlannerError;

    /// Validates status and deadline text.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidStatus` - status is not an exact upper-case
    ///   status name
    /// * `PlannerError::InvalidInput` - deadline is not a date
    fn try_from(changes: ChunkChanges) -> Result<Self, Self::Error> {
        let status = changes
            .status
            .as_deref()
            .map(ChunkStatus::from_str)
            .transpose()?;
        let deadline = changes
            .deadline
            .as_deref()
            .map(|raw| schedule::parse_date("deadline", raw))
            .transpose()?;

        Ok(Self {
            title: changes.title,
            description: changes.description,
            status,
            estimated_hours: changes.estimated_hours,
            duration_minutes: changes.duration_minutes,
            frequency: changes.frequency.map(Frequency::from),
            deadline,
            history: changes.history,
        })
    }
}

impl TryFrom<NewChunk> for ChunkDraft {
    type Error = PlannerError;

    /// Fills defaults and validates the status. Deadlines that do not parse
    /// are dropped rather than rejected.
    fn try_from(chunk: NewChunk) -> Result<Self, Self::Error> {
        let status = chunk
            .status
            .as_deref()
            .map(ChunkStatus::from_str)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            title: chunk.title,
            description: chunk.description,
            status,
            estimated_hours: chunk.estimated_hours.unwrap_or(DEFAULT_ESTIMATED_HOURS),
            duration_minutes: chunk.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES),
            frequency: chunk.frequency.map(Frequency::from).unwrap_or_default(),
            scheduled_date: None,
            deadline: chunk.deadline.as_deref().and_then(schedule::parse_date_lenient),
            history: chunk.history.unwrap_or_default(),
        })
    }
}
