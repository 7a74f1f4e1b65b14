//! Parameter structures for Planout operations
//!
//! Shared parameter structures used by every interface (CLI, HTTP, MCP)
//! without framework-specific derives. Interface layers wrap or convert into
//! these types; the core validates them into typed requests.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  CLI / HTTP     │    │   MCP Params    │    │  Core Params    │
//! │  (clap, axum)   │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Dates, statuses and frequencies travel as strings here so every interface
//! can pass caller text through untouched. Conversion into
//! [`crate::models`] types happens in [`crate::models::requests`].

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the plan to operate on
    pub id: u64,
}

/// Parameters for creating a new plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreatePlan {
    /// Title of the plan (required, non-empty)
    pub title: String,
    /// Free-text description; one work item per line helps the breakdown
    #[serde(default)]
    pub description: Option<String>,
    /// Display color, defaults to #3b82f6
    #[serde(default)]
    pub color: Option<String>,
}

/// Partial changes to a plan. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PlanChanges {
    /// New title
    #[serde(default)]
    pub title: Option<String>,
    /// New description
    #[serde(default)]
    pub description: Option<String>,
    /// New display color
    #[serde(default)]
    pub color: Option<String>,
}

/// Parameters for updating a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdatePlan {
    /// ID of the plan to update
    pub id: u64,
    /// Fields to change
    #[serde(flatten)]
    pub changes: PlanChanges,
}

/// Parameters for the heuristic breakdown of a plan's description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Breakdown {
    /// ID of the plan to break down
    pub id: u64,
    /// How many chunks to schedule on the same day (0 behaves as 1)
    #[serde(default = "default_chunks_per_day")]
    pub chunks_per_day: u32,
    /// First scheduled date as YYYY-MM-DD, defaults to today
    #[serde(default)]
    pub start_date: Option<String>,
}

fn default_chunks_per_day() -> u32 {
    1
}

/// One chunk supplied by a caller for bulk insertion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct NewChunk {
    /// Title of the chunk
    pub title: String,
    /// Optional execution notes
    #[serde(default)]
    pub description: Option<String>,
    /// Initial status: TODO, IN_PROGRESS, DONE, SKIPPED or DEFERRED
    #[serde(default)]
    pub status: Option<String>,
    /// Total effort in hours, defaults to 1.0
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    /// Session length in minutes, defaults to 30
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    /// Once, Daily, Weekly or Monthly; defaults to Daily
    #[serde(default)]
    pub frequency: Option<String>,
    /// Deadline as YYYY-MM-DD or an RFC 3339 timestamp; dropped when
    /// unparseable
    #[serde(default)]
    pub deadline: Option<String>,
    /// Free-form skip/defer bookkeeping
    #[serde(default)]
    pub history: Option<Map<String, Value>>,
}

/// Parameters for inserting chunks into a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddChunks {
    /// ID of the plan receiving the chunks
    pub plan_id: u64,
    /// Chunks to insert, scheduled one per day from today
    pub chunks: Vec<NewChunk>,
}

/// Partial changes to a chunk. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ChunkChanges {
    /// New title
    #[serde(default)]
    pub title: Option<String>,
    /// New execution notes
    #[serde(default)]
    pub description: Option<String>,
    /// New status: TODO, IN_PROGRESS, DONE, SKIPPED or DEFERRED
    #[serde(default)]
    pub status: Option<String>,
    /// New total effort in hours
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    /// New session length in minutes
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    /// New recurrence; unrecognized values are stored verbatim
    #[serde(default)]
    pub frequency: Option<String>,
    /// New deadline as YYYY-MM-DD or an RFC 3339 timestamp
    #[serde(default)]
    pub deadline: Option<String>,
    /// Replacement history object (replaces the stored one wholesale)
    #[serde(default)]
    pub history: Option<Map<String, Value>>,
}

/// Parameters for updating a chunk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateChunk {
    /// ID of the plan owning the chunk
    pub plan_id: u64,
    /// ID of the chunk to update
    pub chunk_id: u64,
    /// Fields to change
    #[serde(flatten)]
    pub changes: ChunkChanges,
}

/// Identifies one chunk of one plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ChunkRef {
    /// ID of the plan owning the chunk
    pub plan_id: u64,
    /// ID of the chunk
    pub chunk_id: u64,
}

/// Parameters for asking the generator how to carry out a chunk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SuggestDetails {
    /// Title of the chunk to describe
    pub title: String,
}

/// Parameters for persisting a generation API key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetApiKey {
    /// The API key to store
    pub key: String,
}
