//! Gemini REST client with ordered model fallback.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{GenerationError, TextGenerator};
use crate::config::Credential;

/// Public endpoint of the Generative Language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Models tried in order until one answers with text.
pub const GEMINI_MODELS: [&str; 4] = [
    "gemini-2.5-flash",
    "gemini-2.0-flash",
    "gemini-1.5-flash",
    "gemini-pro",
];

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    models: Vec<String>,
}

impl GeminiClient {
    /// Create a client whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, GenerationError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GenerationError::Network)?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            models: GEMINI_MODELS.iter().map(ToString::to_string).collect(),
        })
    }

    /// Point the client at a different server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the model fallback order.
    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        credential: &Credential,
    ) -> Result<String, GenerationError> {
        let url = format!("{}/v1beta/models/{model}:generateContent", self.base_url);
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", credential.expose())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GenerationError::InvalidResponse(format!(
                "model {model} returned no text"
            )));
        }

        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn complete(
        &self,
        prompt: &str,
        credential: Option<&Credential>,
    ) -> Result<String, GenerationError> {
        let credential = credential.ok_or(GenerationError::MissingCredential)?;

        for model in &self.models {
            debug!("Trying Gemini model {model}");
            match self.generate(model, prompt, credential).await {
                Ok(text) => return Ok(text),
                Err(err) => warn!("Model {model} failed: {err}"),
            }
        }

        Err(GenerationError::Exhausted {
            attempts: self.models.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Json, Router,
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::post,
    };
    use serde_json::Value;
    use tokio::net::TcpListener;

    use super::*;

    async fn fake_gemini(
        Path(model): Path<String>,
        headers: HeaderMap,
    ) -> Result<Json<Value>, StatusCode> {
        if headers.get("x-goog-api-key").is_none() {
            return Err(StatusCode::UNAUTHORIZED);
        }
        if model.starts_with("broken") {
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
        let answer = format!("answer from {}", model.trim_end_matches(":generateContent"));
        Ok(Json(json!({
            "candidates": [{ "content": { "parts": [{ "text": answer }] } }]
        })))
    }

    async fn start_fake_server() -> String {
        let app = Router::new().route("/v1beta/models/{model}", post(fake_gemini));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_falls_back_to_next_model() {
        let base = start_fake_server().await;
        let client = GeminiClient::new(Duration::from_secs(5))
            .unwrap()
            .with_base_url(base)
            .with_models(["broken-model", "good-model"]);
        let key = Credential::new("k").unwrap();

        let text = client.complete("hi", Some(&key)).await.unwrap();
        assert_eq!(text, "answer from good-model");
    }

    #[tokio::test]
    async fn test_all_models_failing_is_an_error() {
        let base = start_fake_server().await;
        let client = GeminiClient::new(Duration::from_secs(5))
            .unwrap()
            .with_base_url(base)
            .with_models(["broken-a", "broken-b"]);
        let key = Credential::new("k").unwrap();

        let err = client.complete("hi", Some(&key)).await.unwrap_err();
        assert!(matches!(err, GenerationError::Exhausted { attempts: 2 }));
    }

    #[tokio::test]
    async fn test_missing_credential_fails_fast() {
        let client = GeminiClient::new(Duration::from_secs(1)).unwrap();
        let err = client.complete("hi", None).await.unwrap_err();
        assert!(matches!(err, GenerationError::MissingCredential));
    }
}
