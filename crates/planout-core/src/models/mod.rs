//! Data models for plans and chunks.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping data and presentation apart.
//!
//! - [`Plan`]: a goal owning an ordered list of [`Chunk`]s
//! - [`Chunk`]: one unit of work with effort, cadence, schedule and deadline
//! - [`ChunkDraft`]: a chunk that is not persisted yet
//! - [`PlanSummary`]: compact list view with chunk counts

pub mod chunk;
pub mod frequency;
pub mod plan;
pub mod requests;
pub mod status;
pub mod summary;


pub use chunk::{Chunk, ChunkDraft};
pub use frequency::Frequency;
pub use plan::{DEFAULT_PLAN_COLOR, Plan};
pub use requests::UpdateChunkRequest;
pub use status::ChunkStatus;
pub use summary::PlanSummary;
