//! Request handlers for the HTTP API.

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use log::{debug, warn};
use planout_core::{
    Chunk, ChunkDetails, ErrorKind, Plan,
    config::{self, API_KEY_VAR, Credential},
    params::{
        AddChunks, Breakdown, ChunkChanges, ChunkRef, CreatePlan, Id, NewChunk, PlanChanges,
        SetApiKey, SuggestDetails, UpdateChunk, UpdatePlan,
    },
};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{API_KEY_HEADER, AppState, error::ApiError};

type ApiResult<T> = Result<Json<T>, ApiError>;

fn plan_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse().map_err(|_| ApiError::not_found("Plan not found"))
}

fn chunk_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse().map_err(|_| ApiError::not_found("Chunk not found"))
}

/// Per-request credential from the `x-gemini-api-key` header.
fn header_credential(headers: &HeaderMap) -> Option<Credential> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(Credential::new)
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Planout API with Persistence" }))
}

pub async fn ai_status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "configured": state.planner.ai_configured() }))
}

pub async fn set_api_key(
    State(state): State<AppState>,
    Json(params): Json<SetApiKey>,
) -> Json<Value> {
    let Some(credential) = Credential::new(params.key) else {
        return Json(json!({ "status": "error", "message": "API key must not be empty" }));
    };

    match config::upsert_env_var(&state.env_file, API_KEY_VAR, credential.expose()) {
        Ok(()) => {
            state.planner.set_credential(Some(credential));
            Json(json!({ "status": "success" }))
        }
        Err(err) => {
            warn!("Could not save API key: {err}");
            Json(json!({ "status": "error", "message": err.to_string() }))
        }
    }
}

pub async fn list_plans(State(state): State<AppState>) -> ApiResult<Vec<Plan>> {
    Ok(Json(state.planner.list_plans().await?))
}

pub async fn create_plan(
    State(state): State<AppState>,
    Json(params): Json<CreatePlan>,
) -> ApiResult<Plan> {
    Ok(Json(state.planner.create_plan(&params).await?))
}

pub async fn get_plan(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Plan> {
    let id = plan_id(&raw_id)?;
    state
        .planner
        .get_plan(&Id { id })
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Plan not found"))
}

pub async fn update_plan(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(changes): Json<PlanChanges>,
) -> ApiResult<Plan> {
    let params = UpdatePlan {
        id: plan_id(&raw_id)?,
        changes,
    };
    Ok(Json(state.planner.update_plan(&params).await?))
}

pub async fn delete_plan(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Value> {
    let id = plan_id(&raw_id)?;
    state.planner.delete_plan(&Id { id }).await?;
    Ok(Json(json!({ "message": "Plan deleted" })))
}

/// Optional breakdown settings; an absent body means one chunk per day from
/// today.
#[derive(Debug, Default, Deserialize)]
pub struct BreakdownOptions {
    #[serde(default)]
    chunks_per_day: Option<u32>,
    #[serde(default)]
    start_date: Option<String>,
}

pub async fn breakdown_plan(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    options: Option<Json<BreakdownOptions>>,
) -> ApiResult<Plan> {
    let options = options.map(|Json(options)| options).unwrap_or_default();
    let params = Breakdown {
        id: plan_id(&raw_id)?,
        chunks_per_day: options.chunks_per_day.unwrap_or(1),
        start_date: options.start_date,
    };
    Ok(Json(state.planner.breakdown_plan(&params).await?))
}

pub async fn suggest_plan(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Vec<Value>> {
    let id = plan_id(&raw_id)?;
    let credential = header_credential(&headers);
    let suggestions = state
        .planner
        .suggest_plan_chunks(&Id { id }, credential.as_ref())
        .await?;
    Ok(Json(suggestions))
}

pub async fn add_chunks(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(chunks): Json<Vec<NewChunk>>,
) -> ApiResult<Plan> {
    let params = AddChunks {
        plan_id: plan_id(&raw_id)?,
        chunks,
    };
    debug!("POST chunks: {} for plan {}", params.chunks.len(), params.plan_id);

    state
        .planner
        .add_chunks(&params)
        .await
        .map(Json)
        .map_err(|err| match err.kind() {
            ErrorKind::NotFound | ErrorKind::BadRequest => ApiError::from(err),
            ErrorKind::Internal => {
                ApiError::internal(format!("Internal Server Error: {err}"))
            }
        })
}

pub async fn update_chunk(
    State(state): State<AppState>,
    Path((raw_plan_id, raw_chunk_id)): Path<(String, String)>,
    Json(changes): Json<ChunkChanges>,
) -> ApiResult<Chunk> {
    let params = UpdateChunk {
        plan_id: plan_id(&raw_plan_id)?,
        chunk_id: chunk_id(&raw_chunk_id)?,
        changes,
    };
    Ok(Json(state.planner.update_chunk(&params).await?))
}

pub async fn delete_chunk(
    State(state): State<AppState>,
    Path((raw_plan_id, raw_chunk_id)): Path<(String, String)>,
) -> ApiResult<Value> {
    let params = ChunkRef {
        plan_id: plan_id(&raw_plan_id)?,
        chunk_id: chunk_id(&raw_chunk_id)?,
    };
    state.planner.delete_chunk(&params).await?;
    Ok(Json(json!({ "message": "Chunk deleted" })))
}

pub async fn suggest_details(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(params): Json<SuggestDetails>,
) -> Json<ChunkDetails> {
    let credential = header_credential(&headers);
    Json(
        state
            .planner
            .suggest_chunk_details(&params, credential.as_ref())
            .await,
    )
}
