//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use planout_core::{
    Planner,
    display::{CreateResult, DeleteResult, OperationStatus, Suggestions, UpdateResult},
    params as core,
};
use rmcp::{
    ErrorData,
    handler::server::tool::Parameters,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::errors::to_mcp_error;

/// Generic MCP wrapper for core parameter types with serde integration
///
/// `#[serde(transparent)]` passes deserialization straight through to the
/// wrapped core type, and the schema is the core type's schema.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreatePlan = McpParams<core::CreatePlan>;
pub type UpdatePlan = McpParams<core::UpdatePlan>;
pub type Breakdown = McpParams<core::Breakdown>;
pub type AddChunks = McpParams<core::AddChunks>;
pub type UpdateChunk = McpParams<core::UpdateChunk>;
pub type ChunkRef = McpParams<core::ChunkRef>;
pub type SuggestDetails = McpParams<core::SuggestDetails>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(body: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(body.to_string())]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    planner: Arc<Mutex<Planner>>,
}

impl McpHandlers {
    pub fn new(planner: Arc<Mutex<Planner>>) -> Self {
        Self { planner }
    }

    pub async fn create_plan(&self, Parameters(params): Parameters<CreatePlan>) -> McpResult {
        debug!("create_plan: {params:?}");

        let plan = self
            .planner
            .lock()
            .await
            .create_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create plan", &e))?;

        text(CreateResult::new(plan))
    }

    pub async fn list_plans(&self) -> McpResult {
        let summaries = self
            .planner
            .lock()
            .await
            .list_plan_summaries()
            .await
            .map_err(|e| to_mcp_error("Failed to list plans", &e))?;

        if summaries.is_empty() {
            text(summaries)
        } else {
            text(format!("# Plans\n\n{summaries}"))
        }
    }

    pub async fn show_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_plan: {params:?}");

        let plan = self
            .planner
            .lock()
            .await
            .get_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get plan", &e))?
            .ok_or_else(|| {
                ErrorData::resource_not_found(
                    format!("Plan with ID {} not found", params.as_ref().id),
                    None,
                )
            })?;

        text(plan)
    }

    pub async fn update_plan(&self, Parameters(params): Parameters<UpdatePlan>) -> McpResult {
        debug!("update_plan: {params:?}");

        let plan = self
            .planner
            .lock()
            .await
            .update_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update plan", &e))?;

        text(UpdateResult::new(plan))
    }

    pub async fn delete_plan(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_plan: {params:?}");

        let plan = self
            .planner
            .lock()
            .await
            .delete_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete plan", &e))?;

        text(DeleteResult::new(plan))
    }

    pub async fn breakdown_plan(&self, Parameters(params): Parameters<Breakdown>) -> McpResult {
        debug!("breakdown_plan: {params:?}");

        let plan = self
            .planner
            .lock()
            .await
            .breakdown_plan(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to break down plan", &e))?;

        let note = format!("Plan now has {} scheduled chunks", plan.chunks.len());
        text(UpdateResult::with_changes(plan, vec![note]))
    }

    pub async fn suggest_chunks(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("suggest_chunks: {params:?}");

        let suggestions = self
            .planner
            .lock()
            .await
            .suggest_plan_chunks(params.as_ref(), None)
            .await
            .map_err(|e| to_mcp_error("Failed to suggest chunks", &e))?;

        text(format!("# Suggestions\n\n{}", Suggestions(suggestions)))
    }

    pub async fn add_chunks(&self, Parameters(params): Parameters<AddChunks>) -> McpResult {
        debug!("add_chunks: {params:?}");

        let added = params.as_ref().chunks.len();
        let plan = self
            .planner
            .lock()
            .await
            .add_chunks(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add chunks", &e))?;

        text(UpdateResult::with_changes(
            plan,
            vec![format!("Added {added} chunks")],
        ))
    }

    pub async fn update_chunk(&self, Parameters(params): Parameters<UpdateChunk>) -> McpResult {
        debug!("update_chunk: {params:?}");

        let chunk = self
            .planner
            .lock()
            .await
            .update_chunk(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update chunk", &e))?;

        text(UpdateResult::new(chunk))
    }

    pub async fn delete_chunk(&self, Parameters(params): Parameters<ChunkRef>) -> McpResult {
        debug!("delete_chunk: {params:?}");

        let chunk = self
            .planner
            .lock()
            .await
            .delete_chunk(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete chunk", &e))?;

        text(DeleteResult::new(chunk))
    }

    pub async fn suggest_chunk_details(
        &self,
        Parameters(params): Parameters<SuggestDetails>,
    ) -> McpResult {
        debug!("suggest_chunk_details: {params:?}");

        let details = self
            .planner
            .lock()
            .await
            .suggest_chunk_details(params.as_ref(), None)
            .await;

        text(format!("# {}\n\n{details}", params.as_ref().title))
    }

    pub async fn backfill_deadlines(&self) -> McpResult {
        let summary = self
            .planner
            .lock()
            .await
            .backfill_deadlines()
            .await
            .map_err(|e| to_mcp_error("Failed to backfill deadlines", &e))?;

        text(OperationStatus::success(summary.to_string().trim_end()))
    }

    pub async fn ai_status(&self) -> McpResult {
        let configured = self.planner.lock().await.ai_configured();
        text(OperationStatus::ai_status(configured))
    }
}
