//! HTTP API for Planout.
//!
//! ## Endpoints
//!
//! - `GET /`: liveness message
//! - `GET /config/ai-status`, `POST /config/api-key`
//! - `GET|POST /plans`, `GET|PATCH|DELETE /plans/{id}`
//! - `POST /plans/{id}/breakdown`, `POST /plans/{id}/suggest`
//! - `POST /plans/{id}/chunks`, `PATCH|DELETE /plans/{id}/chunks/{chunk_id}`
//! - `POST /chunks/suggest_details`
//!
//! Errors carry a `{"detail": ...}` body: 404 for unknown plans and chunks,
//! 400 for rejected input, 500 otherwise.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, patch, post},
};
use log::{error, info};
use planout_core::Planner;
use tokio::{net::TcpListener, task::JoinHandle};

mod error;
mod routes;


/// Header carrying a per-request generation key.
pub const API_KEY_HEADER: &str = "x-gemini-api-key";

/// Shared state for the request handlers.
#[derive(Clone)]
pub struct AppState {
    planner: Arc<Planner>,
    /// File `POST /config/api-key` writes the key to
    env_file: PathBuf,
}

/// Builds the router with every endpoint.
pub fn router(planner: Arc<Planner>, env_file: PathBuf) -> Router {
    let state = AppState { planner, env_file };

    Router::new()
        .route("/", get(routes::root))
        .route("/config/ai-status", get(routes::ai_status))
        .route("/config/api-key", post(routes::set_api_key))
        .route("/plans", get(routes::list_plans).post(routes::create_plan))
        .route(
            "/plans/{plan_id}",
            get(routes::get_plan)
                .patch(routes::update_plan)
                .delete(routes::delete_plan),
        )
        .route("/plans/{plan_id}/breakdown", post(routes::breakdown_plan))
        .route("/plans/{plan_id}/suggest", post(routes::suggest_plan))
        .route("/plans/{plan_id}/chunks", post(routes::add_chunks))
        .route(
            "/plans/{plan_id}/chunks/{chunk_id}",
            patch(routes::update_chunk).delete(routes::delete_chunk),
        )
        .route("/chunks/suggest_details", post(routes::suggest_details))
        .with_state(state)
}

/// HTTP server running in a background task.
pub struct HttpServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl HttpServer {
    /// Binds `bind` (port `0` picks a free port) and starts serving.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot bind.
    pub async fn start(planner: Arc<Planner>, env_file: PathBuf, bind: SocketAddr) -> Result<Self> {
        let app = router(planner, env_file);

        let listener = TcpListener::bind(bind)
            .await
            .with_context(|| format!("Failed to bind {bind}"))?;
        let addr = listener
            .local_addr()
            .context("Failed to read the bound address")?;

        info!("HTTP API listening on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!("HTTP server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stops the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for HttpServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
