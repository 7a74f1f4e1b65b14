//! Planout CLI Application
//!
//! Command-line interface, HTTP API and MCP server for the planout task
//! planning tool.

mod args;
mod cli;
mod http;
mod mcp;
mod renderer;

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use http::HttpServer;
use log::{info, warn};
use mcp::{PlanoutMcpServer, run_stdio_server};
use planout_core::{
    Credential, PlannerBuilder,
    config::{self, API_KEY_VAR},
};
use renderer::TerminalRenderer;
use Commands::*;

/// Key from `--api-key`/`GEMINI_API_KEY`, else from the saved key file.
fn resolve_credential(api_key: Option<String>) -> Option<Credential> {
    if let Some(credential) = api_key.and_then(Credential::new) {
        return Some(credential);
    }

    let env_file = match config::default_env_file() {
        Ok(path) => path,
        Err(e) => {
            warn!("Could not locate key file: {e}");
            return None;
        }
    };

    match config::read_env_var(&env_file, API_KEY_VAR) {
        Ok(key) => key.and_then(Credential::new),
        Err(e) => {
            warn!("Could not read {}: {e}", env_file.display());
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        api_key,
        ai_timeout_secs,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .with_credential(resolve_credential(api_key))
        .with_generation_timeout(Duration::from_secs(ai_timeout_secs))
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Planout started");

    match command {
        Some(Plan { command }) => {
            Cli::new(planner, renderer)
                .handle_plan_command(command)
                .await
        }
        Some(Chunk { command }) => {
            Cli::new(planner, renderer)
                .handle_chunk_command(command)
                .await
        }
        Some(Backfill) => Cli::new(planner, renderer).backfill().await,
        Some(Config { command }) => {
            let env_file = config::default_env_file().context("Failed to locate key file")?;
            Cli::new(planner, renderer).handle_config_command(command, &env_file)
        }
        Some(Http { bind }) => {
            let env_file = config::default_env_file().context("Failed to locate key file")?;
            let server = HttpServer::start(Arc::new(planner), env_file, bind)
                .await
                .context("Failed to start HTTP API")?;
            println!("Planout API listening on http://{}", server.addr());

            tokio::signal::ctrl_c()
                .await
                .context("Failed to wait for Ctrl-C")?;
            info!("Received Ctrl-C, shutting down HTTP API");
            server.shutdown();
            Ok(())
        }
        Some(Serve) => {
            info!("Starting Planout MCP server");
            run_stdio_server(PlanoutMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
        None => Cli::new(planner, renderer).list_plans().await,
    }
}
