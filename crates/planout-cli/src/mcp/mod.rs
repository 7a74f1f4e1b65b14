//! MCP server implementation for Planout
//!
//! Exposes the planner as Model Context Protocol tools over stdio so an AI
//! assistant can create plans, break them down and track chunks.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use planout_core::Planner;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use tokio::{
    signal::unix::{SignalKind, signal},
    sync::Mutex,
};

pub mod errors;
pub mod handlers;

pub use handlers::{
    AddChunks, Breakdown, ChunkRef, CreatePlan, Id, McpResult, SuggestDetails, UpdateChunk,
    UpdatePlan,
};

/// MCP server for Planout
#[derive(Clone)]
pub struct PlanoutMcpServer {
    planner: Arc<Mutex<Planner>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl PlanoutMcpServer {
    pub fn new(planner: Planner) -> Self {
        Self {
            planner: Arc::new(Mutex::new(planner)),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.planner.clone())
    }

    #[tool(
        name = "create_plan",
        description = "Create a new plan (a goal). Provide a title (required), an optional description, and an optional display color. Put one work item per line in the description, or write 'Step 1: ... Step 2: ...', so break_down_plan can turn it into chunks."
    )]
    async fn create_plan(&self, params: Parameters<CreatePlan>) -> McpResult {
        self.handlers().create_plan(params).await
    }

    #[tool(
        name = "list_plans",
        description = "List all plans with their deadline and how many chunks are done out of the total."
    )]
    async fn list_plans(&self) -> McpResult {
        self.handlers().list_plans().await
    }

    #[tool(
        name = "show_plan",
        description = "Show a plan with all of its chunks: status, scheduled date, deadline, effort and cadence."
    )]
    async fn show_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_plan(params).await
    }

    #[tool(
        name = "update_plan",
        description = "Change a plan's title, description or color. Omitted fields are left unchanged."
    )]
    async fn update_plan(&self, params: Parameters<UpdatePlan>) -> McpResult {
        self.handlers().update_plan(params).await
    }

    #[tool(
        name = "delete_plan",
        description = "Permanently delete a plan and all of its chunks. This cannot be undone."
    )]
    async fn delete_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_plan(params).await
    }

    #[tool(
        name = "break_down_plan",
        description = "Split a plan's description into chunks and schedule them on consecutive days, chunks_per_day at a time (default 1), starting on start_date (YYYY-MM-DD, default today). The chunks are saved and appended to the plan."
    )]
    async fn break_down_plan(&self, params: Parameters<Breakdown>) -> McpResult {
        self.handlers().breakdown_plan(params).await
    }

    #[tool(
        name = "suggest_chunks",
        description = "Ask the text generator for chunk suggestions for a plan, each with estimated hours and a computed deadline. Nothing is saved; pass the ones you want to add_chunks. Returns no suggestions when generation is unavailable."
    )]
    async fn suggest_chunks(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().suggest_chunks(params).await
    }

    #[tool(
        name = "add_chunks",
        description = "Append chunks to a plan, scheduled one per day from today. Each chunk needs a title; status defaults to TODO, estimated_hours to 1, duration_minutes to 30 and frequency to Daily. Status must be one of TODO, IN_PROGRESS, DONE, SKIPPED, DEFERRED."
    )]
    async fn add_chunks(&self, params: Parameters<AddChunks>) -> McpResult {
        self.handlers().add_chunks(params).await
    }

    #[tool(
        name = "update_chunk",
        description = "Change a chunk of a plan. Any of title, description, status (TODO, IN_PROGRESS, DONE, SKIPPED, DEFERRED), estimated_hours, duration_minutes, frequency, deadline and history may be given. History replaces the stored history entirely. The plan deadline follows the latest chunk deadline."
    )]
    async fn update_chunk(&self, params: Parameters<UpdateChunk>) -> McpResult {
        self.handlers().update_chunk(params).await
    }

    #[tool(
        name = "delete_chunk",
        description = "Delete a chunk from a plan. The plan deadline is recomputed from the remaining chunks."
    )]
    async fn delete_chunk(&self, params: Parameters<ChunkRef>) -> McpResult {
        self.handlers().delete_chunk(params).await
    }

    #[tool(
        name = "suggest_chunk_details",
        description = "Ask the text generator how to carry out a chunk: advice, a session length and a cadence."
    )]
    async fn suggest_chunk_details(&self, params: Parameters<SuggestDetails>) -> McpResult {
        self.handlers().suggest_chunk_details(params).await
    }

    #[tool(
        name = "backfill_deadlines",
        description = "Compute deadlines for every chunk that has none from its effort and cadence, then recompute every plan deadline."
    )]
    async fn backfill_deadlines(&self) -> McpResult {
        self.handlers().backfill_deadlines().await
    }

    #[tool(
        name = "ai_status",
        description = "Report whether a text generation API key is configured."
    )]
    async fn ai_status(&self) -> McpResult {
        self.handlers().ai_status().await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for PlanoutMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "planout".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"Planout breaks personal goals into scheduled work sessions.

## Core Concepts
- **Plans**: goals with a title, description, color and a deadline derived from their chunks
- **Chunks**: work sessions within a plan, each with a status (TODO, IN_PROGRESS, DONE, SKIPPED, DEFERRED), estimated hours, session length, frequency, scheduled date and deadline

## Workflow
1. Create a plan with `create_plan`
2. Turn its description into scheduled chunks with `break_down_plan`, or ask `suggest_chunks` and save the ones you like with `add_chunks`
3. Track progress with `update_chunk`; record skipped or deferred sessions in `history`
4. Review with `show_plan` and `list_plans`

A plan's deadline is always the latest deadline among its chunks."#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: PlanoutMcpServer) -> Result<()> {
    use rmcp::{ServiceExt, transport::stdio};

    info!("Starting Planout MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
