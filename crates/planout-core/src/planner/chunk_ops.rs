//! Chunk operations for the Planner.

use log::debug;

use super::Planner;
use crate::{
    error::{PlannerError, Result},
    models::{Chunk, ChunkDraft, Plan, UpdateChunkRequest},
    params::{AddChunks, ChunkRef, UpdateChunk},
    schedule,
};

impl Planner {
    /// Inserts caller-supplied chunks, scheduled one per day from today.
    ///
    /// Returns the plan with all of its chunks.
    pub async fn add_chunks(&self, params: &AddChunks) -> Result<Plan> {
        debug!("add_chunks: {} chunks to plan {}", params.chunks.len(), params.plan_id);
        let mut drafts = params
            .chunks
            .iter()
            .cloned()
            .map(ChunkDraft::try_from)
            .collect::<Result<Vec<_>>>()?;
        schedule::schedule(&mut drafts, schedule::today(), 1);

        let plan_id = params.plan_id;
        self.with_database(move |db| {
            db.insert_chunks(plan_id, &drafts)?;
            db.get_plan(plan_id)?
                .ok_or(PlannerError::PlanNotFound { id: plan_id })
        })
        .await
    }

    /// Applies a partial update to a chunk of a plan.
    ///
    /// # Errors
    ///
    /// * `PlannerError::PlanNotFound` - the plan does not exist
    /// * `PlannerError::ChunkNotFound` - the chunk does not exist in that plan
    /// * `PlannerError::InvalidStatus` - the status is not a recognized name
    pub async fn update_chunk(&self, params: &UpdateChunk) -> Result<Chunk> {
        debug!("update_chunk: {} of plan {}", params.chunk_id, params.plan_id);
        let request = UpdateChunkRequest::try_from(params.changes.clone())?;
        let (plan_id, chunk_id) = (params.plan_id, params.chunk_id);

        self.with_database(move |db| db.update_chunk(plan_id, chunk_id, request))
            .await
    }

    /// Deletes a chunk of a plan and returns it.
    pub async fn delete_chunk(&self, params: &ChunkRef) -> Result<Chunk> {
        debug!("delete_chunk: {} of plan {}", params.chunk_id, params.plan_id);
        let (plan_id, chunk_id) = (params.plan_id, params.chunk_id);

        self.with_database(move |db| db.delete_chunk(plan_id, chunk_id))
            .await
    }

    /// Retrieves a chunk of a plan.
    pub async fn get_chunk(&self, params: &ChunkRef) -> Result<Option<Chunk>> {
        let (plan_id, chunk_id) = (params.plan_id, params.chunk_id);
        self.with_database(move |db| db.get_chunk(plan_id, chunk_id))
            .await
    }
}
