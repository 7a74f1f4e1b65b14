//! Generated suggestions for the Planner.
//!
//! Generation failures never surface as errors here: plan suggestions fall
//! back to an empty list and chunk details to [`ChunkDetails::default`].

use log::{debug, warn};
use serde_json::Value;

use super::Planner;
use crate::{
    config::Credential,
    error::{PlannerError, Result},
    generation::{ChunkDetails, GenerationError, prompts},
    params::{Id, SuggestDetails},
    schedule, suggestions,
};

impl Planner {
    /// Whether a default generation credential is configured.
    pub fn ai_configured(&self) -> bool {
        self.default_credential().is_some()
    }

    /// Asks the generator for chunk suggestions for a plan.
    ///
    /// Suggestions are returned, not persisted. `credential` overrides the
    /// configured one for this call only.
    pub async fn suggest_plan_chunks(
        &self,
        params: &Id,
        credential: Option<&Credential>,
    ) -> Result<Vec<Value>> {
        let plan = self
            .get_plan(params)
            .await?
            .ok_or(PlannerError::PlanNotFound { id: params.id })?;

        let prompt = prompts::plan_suggestions(&plan.title, &plan.description, plan.deadline);
        match self.generate_json::<Vec<Value>>(&prompt, credential).await {
            Ok(records) => {
                debug!("Generator suggested {} chunks for plan {}", records.len(), plan.id);
                Ok(suggestions::resolve_suggestions(records, schedule::today()))
            }
            Err(err) => {
                warn!("Plan suggestions for {} failed: {err}", plan.id);
                Ok(Vec::new())
            }
        }
    }

    /// Asks the generator how to carry out a chunk.
    pub async fn suggest_chunk_details(
        &self,
        params: &SuggestDetails,
        credential: Option<&Credential>,
    ) -> ChunkDetails {
        let prompt = prompts::chunk_details(&params.title);
        match self.generate_json::<Value>(&prompt, credential).await {
            Ok(value) => ChunkDetails::from_generated(&value),
            Err(err) => {
                warn!("Chunk details for '{}' failed: {err}", params.title);
                ChunkDetails::default()
            }
        }
    }

    async fn generate_json<T: serde::de::DeserializeOwned>(
        &self,
        prompt: &str,
        credential: Option<&Credential>,
    ) -> std::result::Result<T, GenerationError> {
        let default = self.default_credential();
        let credential = credential.or(default.as_ref());
        let text = self.generator.complete(prompt, credential).await?;
        Ok(serde_json::from_str(&prompts::strip_code_fences(&text))?)
    }
}
