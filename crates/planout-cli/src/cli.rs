//! Command-line argument wrappers and command execution.
//!
//! Each clap structure here converts into a core parameter type, so the core
//! never depends on clap:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand, ValueEnum};
use planout_core::{
    Planner, UpdateChunkRequest,
    config::{self, API_KEY_VAR, Credential},
    display::{CreateResult, DeleteResult, OperationStatus, Suggestions, UpdateResult},
    models::ChunkStatus,
    params::*,
};
use serde_json::{Map, Value};

use crate::renderer::TerminalRenderer;

/// Create a new plan
#[derive(Args)]
pub struct CreatePlanArgs {
    /// Title of the plan
    pub title: String,
    /// Description of the goal; one work item per line helps the breakdown
    #[arg(short, long)]
    pub description: Option<String>,
    /// Display color, e.g. "#10b981"
    #[arg(long)]
    pub color: Option<String>,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            title: val.title,
            description: val.description,
            color: val.color,
        }
    }
}

/// Identify a plan by ID
#[derive(Args)]
pub struct PlanIdArgs {
    /// ID of the plan
    pub id: u64,
}

impl From<PlanIdArgs> for Id {
    fn from(val: PlanIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Change a plan's title, description or color
#[derive(Args)]
pub struct UpdatePlanArgs {
    /// ID of the plan to update
    pub id: u64,
    #[arg(short, long, help = "New title for the plan")]
    pub title: Option<String>,
    #[arg(short, long, help = "New description for the plan")]
    pub description: Option<String>,
    #[arg(long, help = "New display color")]
    pub color: Option<String>,
}

impl From<UpdatePlanArgs> for UpdatePlan {
    fn from(val: UpdatePlanArgs) -> Self {
        UpdatePlan {
            id: val.id,
            changes: PlanChanges {
                title: val.title,
                description: val.description,
                color: val.color,
            },
        }
    }
}

/// Delete a plan and all its chunks
#[derive(Args)]
pub struct DeletePlanArgs {
    /// ID of the plan to delete
    pub id: u64,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

/// Split a plan's description into scheduled chunks
///
/// Every non-blank line becomes a chunk; a line with several "Step " markers
/// is split at each marker. Chunks are placed on consecutive days.
#[derive(Args)]
pub struct BreakdownArgs {
    /// ID of the plan to break down
    pub id: u64,
    /// Number of chunks to place on the same day
    #[arg(long, default_value_t = 1)]
    pub per_day: u32,
    /// First scheduled date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub start: Option<String>,
}

impl From<BreakdownArgs> for Breakdown {
    fn from(val: BreakdownArgs) -> Self {
        Breakdown {
            id: val.id,
            chunks_per_day: val.per_day,
            start_date: val.start,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List all plans
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a plan with its chunks
    #[command(alias = "s")]
    Show(PlanIdArgs),
    /// Change a plan's title, description or color
    #[command(alias = "u")]
    Update(UpdatePlanArgs),
    /// Delete a plan and all its chunks
    #[command(aliases = ["d", "rm"])]
    Delete(DeletePlanArgs),
    /// Split the description into scheduled chunks
    #[command(alias = "b")]
    Breakdown(BreakdownArgs),
    /// Ask the generator for chunk suggestions (nothing is saved)
    Suggest(PlanIdArgs),
}

/// Chunk status values accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ChunkStatusArg {
    Todo,
    InProgress,
    Done,
    Skipped,
    Deferred,
}

impl From<ChunkStatusArg> for ChunkStatus {
    fn from(val: ChunkStatusArg) -> Self {
        match val {
            ChunkStatusArg::Todo => ChunkStatus::Todo,
            ChunkStatusArg::InProgress => ChunkStatus::InProgress,
            ChunkStatusArg::Done => ChunkStatus::Done,
            ChunkStatusArg::Skipped => ChunkStatus::Skipped,
            ChunkStatusArg::Deferred => ChunkStatus::Deferred,
        }
    }
}

fn status_name(status: Option<ChunkStatusArg>) -> Option<String> {
    status.map(|s| ChunkStatus::from(s).as_str().to_string())
}

fn parse_history(raw: &str) -> std::result::Result<Map<String, Value>, String> {
    serde_json::from_str(raw).map_err(|e| format!("history must be a JSON object: {e}"))
}

/// Append a chunk to a plan
#[derive(Args)]
pub struct AddChunkArgs {
    /// ID of the plan receiving the chunk
    pub plan_id: u64,
    /// Title of the chunk
    pub title: String,
    #[arg(short, long, help = "Execution notes")]
    pub description: Option<String>,
    #[arg(short, long, help = "Initial status")]
    pub status: Option<ChunkStatusArg>,
    #[arg(long, help = "Total effort in hours (default 1)")]
    pub hours: Option<f64>,
    #[arg(long, help = "Session length in minutes (default 30)")]
    pub minutes: Option<i64>,
    #[arg(short, long, help = "Once, Daily, Weekly or Monthly (default Daily)")]
    pub frequency: Option<String>,
    #[arg(long, help = "Deadline as YYYY-MM-DD")]
    pub deadline: Option<String>,
}

impl From<AddChunkArgs> for AddChunks {
    fn from(val: AddChunkArgs) -> Self {
        AddChunks {
            plan_id: val.plan_id,
            chunks: vec![NewChunk {
                title: val.title,
                description: val.description,
                status: status_name(val.status),
                estimated_hours: val.hours,
                duration_minutes: val.minutes,
                frequency: val.frequency,
                deadline: val.deadline,
                history: None,
            }],
        }
    }
}

/// Change a chunk's status or details
#[derive(Args)]
pub struct UpdateChunkArgs {
    /// ID of the plan the chunk belongs to
    pub plan_id: u64,
    /// ID of the chunk to update
    pub chunk_id: u64,
    #[arg(short, long, help = "Updated title")]
    pub title: Option<String>,
    #[arg(short, long, help = "Updated execution notes")]
    pub description: Option<String>,
    #[arg(short, long, help = "New status")]
    pub status: Option<ChunkStatusArg>,
    #[arg(long, help = "Updated total effort in hours")]
    pub hours: Option<f64>,
    #[arg(long, help = "Updated session length in minutes")]
    pub minutes: Option<i64>,
    #[arg(short, long, help = "Updated recurrence")]
    pub frequency: Option<String>,
    #[arg(long, help = "Updated deadline as YYYY-MM-DD")]
    pub deadline: Option<String>,
    #[arg(
        long,
        value_parser = parse_history,
        help = "Replacement skip/defer history as a JSON object"
    )]
    pub history: Option<Map<String, Value>>,
}

impl From<UpdateChunkArgs> for UpdateChunk {
    fn from(val: UpdateChunkArgs) -> Self {
        UpdateChunk {
            plan_id: val.plan_id,
            chunk_id: val.chunk_id,
            changes: ChunkChanges {
                title: val.title,
                description: val.description,
                status: status_name(val.status),
                estimated_hours: val.hours,
                duration_minutes: val.minutes,
                frequency: val.frequency,
                deadline: val.deadline,
                history: val.history,
            },
        }
    }
}

/// Identify a chunk within a plan
#[derive(Args)]
pub struct ChunkRefArgs {
    /// ID of the plan the chunk belongs to
    pub plan_id: u64,
    /// ID of the chunk
    pub chunk_id: u64,
}

impl From<ChunkRefArgs> for ChunkRef {
    fn from(val: ChunkRefArgs) -> Self {
        ChunkRef {
            plan_id: val.plan_id,
            chunk_id: val.chunk_id,
        }
    }
}

/// Ask how to carry out a chunk
#[derive(Args)]
pub struct ChunkDetailsArgs {
    /// Title of the chunk
    pub title: String,
}

#[derive(Subcommand)]
pub enum ChunkCommands {
    /// Append a chunk to a plan, scheduled for today
    #[command(alias = "a")]
    Add(AddChunkArgs),
    /// Change a chunk's status or details
    #[command(alias = "u")]
    Update(UpdateChunkArgs),
    /// Delete a chunk
    #[command(aliases = ["d", "rm"])]
    Delete(ChunkRefArgs),
    /// Ask the generator how to carry out a chunk
    Details(ChunkDetailsArgs),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Report whether a generation API key is configured
    Status,
    /// Save the generation API key for future runs
    SetApiKey {
        /// The API key
        key: String,
    },
}

/// Executes CLI commands against a planner and renders the output.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self
                    .planner
                    .create_plan(&args.into())
                    .await
                    .context("Failed to create plan")?;
                self.renderer.render(&CreateResult::new(plan).to_string())
            }
            PlanCommands::List => self.list_plans().await,
            PlanCommands::Show(args) => {
                let id = args.id;
                let plan = self
                    .planner
                    .get_plan(&args.into())
                    .await
                    .context("Failed to get plan")?;
                match plan {
                    Some(plan) => self.renderer.render(&plan.to_string()),
                    None => bail!("Plan with ID {id} not found"),
                }
            }
            PlanCommands::Update(args) => {
                let params = UpdatePlan::from(args);
                let changes = describe_plan_changes(&params.changes);
                let plan = self
                    .planner
                    .update_plan(&params)
                    .await
                    .context("Failed to update plan")?;
                self.renderer
                    .render(&UpdateResult::with_changes(plan, changes).to_string())
            }
            PlanCommands::Delete(args) => {
                if !args.confirm {
                    bail!(
                        "Deleting plan {} removes all of its chunks. Re-run with --confirm.",
                        args.id
                    );
                }
                let plan = self
                    .planner
                    .delete_plan(&Id { id: args.id })
                    .await
                    .context("Failed to delete plan")?;
                self.renderer.render(&DeleteResult::new(plan).to_string())
            }
            PlanCommands::Breakdown(args) => {
                let plan = self
                    .planner
                    .breakdown_plan(&args.into())
                    .await
                    .context("Failed to break down plan")?;
                let note = format!("Plan now has {} scheduled chunks", plan.chunks.len());
                self.renderer
                    .render(&UpdateResult::with_changes(plan, vec![note]).to_string())
            }
            PlanCommands::Suggest(args) => {
                let suggestions = self
                    .planner
                    .suggest_plan_chunks(&args.into(), None)
                    .await
                    .context("Failed to suggest chunks")?;
                self.renderer
                    .render(&format!("# Suggestions\n\n{}", Suggestions(suggestions)))
            }
        }
    }

    pub async fn handle_chunk_command(&self, command: ChunkCommands) -> Result<()> {
        match command {
            ChunkCommands::Add(args) => {
                let title = args.title.clone();
                let plan = self
                    .planner
                    .add_chunks(&args.into())
                    .await
                    .context("Failed to add chunk")?;
                let note = format!("Added chunk '{title}'");
                self.renderer
                    .render(&UpdateResult::with_changes(plan, vec![note]).to_string())
            }
            ChunkCommands::Update(args) => {
                let params = UpdateChunk::from(args);
                let changes = UpdateChunkRequest::try_from(params.changes.clone())
                    .map(|request| request.describe_changes())
                    .unwrap_or_default();
                let chunk = self
                    .planner
                    .update_chunk(&params)
                    .await
                    .context("Failed to update chunk")?;
                self.renderer
                    .render(&UpdateResult::with_changes(chunk, changes).to_string())
            }
            ChunkCommands::Delete(args) => {
                let chunk = self
                    .planner
                    .delete_chunk(&args.into())
                    .await
                    .context("Failed to delete chunk")?;
                self.renderer.render(&DeleteResult::new(chunk).to_string())
            }
            ChunkCommands::Details(args) => {
                let details = self
                    .planner
                    .suggest_chunk_details(&SuggestDetails { title: args.title.clone() }, None)
                    .await;
                self.renderer
                    .render(&format!("# {}\n\n{details}", args.title))
            }
        }
    }

    pub async fn backfill(&self) -> Result<()> {
        let summary = self
            .planner
            .backfill_deadlines()
            .await
            .context("Failed to backfill deadlines")?;
        self.renderer
            .render(&OperationStatus::success(summary.to_string().trim_end()).to_string())
    }

    pub fn handle_config_command(&self, command: ConfigCommands, env_file: &Path) -> Result<()> {
        match command {
            ConfigCommands::Status => {
                let status = OperationStatus::ai_status(self.planner.ai_configured());
                self.renderer.render(&format!(
                    "{status}\n- Database: {}\n- Key file: {}\n",
                    self.planner.database_path().display(),
                    env_file.display()
                ))
            }
            ConfigCommands::SetApiKey { key } => {
                if Credential::new(&key).is_none() {
                    bail!("API key must not be empty");
                }
                config::upsert_env_var(env_file, API_KEY_VAR, key.trim())
                    .context("Failed to save API key")?;
                self.renderer.render(
                    &OperationStatus::success(format!(
                        "Saved API key to {}. It is used from the next start.",
                        env_file.display()
                    ))
                    .to_string(),
                )
            }
        }
    }

    pub async fn list_plans(&self) -> Result<()> {
        let summaries = self
            .planner
            .list_plan_summaries()
            .await
            .context("Failed to list plans")?;

        if summaries.is_empty() {
            self.renderer.render(&summaries.to_string())
        } else {
            self.renderer.render(&format!("# Plans\n\n{summaries}"))
        }
    }
}

fn describe_plan_changes(changes: &PlanChanges) -> Vec<String> {
    let mut described = Vec::new();
    if let Some(title) = &changes.title {
        described.push(format!("Title changed to '{title}'"));
    }
    if changes.description.is_some() {
        described.push("Description updated".to_string());
    }
    if let Some(color) = &changes.color {
        described.push(format!("Color changed to {color}"));
    }
    described
}
