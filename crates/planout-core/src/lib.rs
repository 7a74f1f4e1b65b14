//! Core library for the Planout task planning backend.
//!
//! Plans are goals; chunks are the work sessions a plan is broken into. This
//! crate holds the models, SQLite storage, the scheduling engine that turns
//! effort into calendar deadlines, the suggestion post-processor, the text
//! generation client, and the async [`Planner`] facade every interface goes
//! through.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use planout_core::{PlannerBuilder, params::CreatePlan};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("planout.db"))
//!     .build()
//!     .await?;
//!
//! let plan = planner
//!     .create_plan(&CreatePlan {
//!         title: "Learn guitar".to_string(),
//!         description: Some("Buy strings\nRestring\nPractice chords".to_string()),
//!         color: None,
//!     })
//!     .await?;
//! println!("{plan}");
//!
//! for summary in &planner.list_plan_summaries().await? {
//!     println!("Plan: {}", summary.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod generation;
pub mod models;
pub mod params;
pub mod planner;
pub mod schedule;
pub mod suggestions;

pub use config::Credential;
pub use db::{BackfillSummary, Database};
pub use display::{
    CreateResult, DeleteResult, LocalDateTime, OperationStatus, PlanSummaries, Suggestions,
    UpdateResult,
};
pub use error::{ErrorKind, PlannerError, Result};
pub use generation::{ChunkDetails, GeminiClient, GenerationError, TextGenerator};
pub use models::{Chunk, ChunkDraft, ChunkStatus, Frequency, Plan, PlanSummary, UpdateChunkRequest};
pub use planner::{Planner, PlannerBuilder};
