//! Text generation error types

use thiserror::Error;

/// Errors that can occur while generating text
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Generation API key not configured")]
    MissingCredential,

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("All {attempts} models failed")]
    Exhausted { attempts: usize },
}
