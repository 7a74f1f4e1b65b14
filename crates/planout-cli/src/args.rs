use std::{net::SocketAddr, path::PathBuf};

use clap::{Parser, Subcommand};
use planout_core::config::API_KEY_VAR;

use crate::cli::{ChunkCommands, ConfigCommands, PlanCommands};

/// Planout: break goals into scheduled work sessions
///
/// Plans are goals; chunks are the work sessions a plan is broken into.
/// Planout splits a plan's description into chunks, spreads them over the
/// calendar and derives deadlines from effort and cadence. The same planner
/// is reachable from this command line, an HTTP API (`planout http`) and an
/// MCP server on stdio (`planout serve`).
#[derive(Parser)]
#[command(version, about, name = "planout")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/planout/planout.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// API key for text generation. Falls back to the key saved in
    /// $XDG_CONFIG_HOME/planout/planout.env
    #[arg(long, global = true, env = API_KEY_VAR, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Timeout in seconds for each text generation request
    #[arg(long, global = true, default_value_t = 30)]
    pub ai_timeout_secs: u64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Planout CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage chunks within plans
    #[command(alias = "c")]
    Chunk {
        #[command(subcommand)]
        command: ChunkCommands,
    },
    /// Fill in missing chunk deadlines and recompute plan deadlines
    Backfill,
    /// Inspect or change the text generation setup
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Start the HTTP API
    Http {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8000")]
        bind: SocketAddr,
    },
    /// Start the MCP server
    Serve,
}
