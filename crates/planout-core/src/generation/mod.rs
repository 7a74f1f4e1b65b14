//! Text generation collaborator.
//!
//! The planner talks to a [`TextGenerator`]; [`GeminiClient`] is the
//! production implementation. Callers never see a [`GenerationError`]: the
//! planner degrades every failure to an empty or default result.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{config::Credential, models::Frequency, suggestions};

mod error;
mod gemini;
pub mod prompts;

pub use error::GenerationError;
pub use gemini::{DEFAULT_BASE_URL, GEMINI_MODELS, GeminiClient};

/// Produces text for a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Completes `prompt`, authenticating with `credential` when the service
    /// needs one.
    async fn complete(
        &self,
        prompt: &str,
        credential: Option<&Credential>,
    ) -> Result<String, GenerationError>;
}

/// Suggested way to carry out a single chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkDetails {
    /// Actionable advice
    pub description: String,
    /// Suggested session length
    pub duration_minutes: i64,
    /// Suggested cadence
    pub frequency: Frequency,
}

impl Default for ChunkDetails {
    /// The canned answer returned when generation fails.
    fn default() -> Self {
        Self {
            description: "Could not generate details.".to_string(),
            duration_minutes: 30,
            frequency: Frequency::Once,
        }
    }
}

impl ChunkDetails {
    /// Reads generated details loosely. Missing or mistyped fields fall back
    /// to the [`Default`] answer one by one; numeric strings are accepted for
    /// `duration_minutes`.
    pub fn from_generated(value: &Value) -> Self {
        let fallback = Self::default();
        Self {
            description: value
                .get("description")
                .and_then(Value::as_str)
                .map_or(fallback.description, str::to_string),
            duration_minutes: value
                .get("duration_minutes")
                .and_then(suggestions::as_minutes)
                .unwrap_or(fallback.duration_minutes),
            frequency: value
                .get("frequency")
                .and_then(Value::as_str)
                .map_or(fallback.frequency, Frequency::parse),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_details_fill_gaps_from_default() {
        let details = ChunkDetails::from_generated(&json!({"description": "Tune first"}));
        assert_eq!(details.description, "Tune first");
        assert_eq!(details.duration_minutes, 30);
        assert_eq!(details.frequency, Frequency::Once);

        let details =
            ChunkDetails::from_generated(&json!({"duration_minutes": "45", "frequency": "Weekly"}));
        assert_eq!(details.description, "Could not generate details.");
        assert_eq!(details.duration_minutes, 45);
        assert_eq!(details.frequency, Frequency::Weekly);
    }

    #[test]
    fn test_details_from_non_object_is_default() {
        assert_eq!(
            ChunkDetails::from_generated(&json!(["advice"])),
            ChunkDetails::default()
        );
    }
}
