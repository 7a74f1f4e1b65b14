//! Builder for creating and configuring Planner instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use log::info;
use tokio::task;

use super::Planner;
use crate::{
    config::{self, Credential},
    db::Database,
    error::{PlannerError, Result},
    generation::{GeminiClient, TextGenerator},
};

/// Request timeout used for the generation service unless overridden.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for creating and configuring Planner instances.
#[derive(Clone)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
    generator: Option<Arc<dyn TextGenerator>>,
    credential: Option<Credential>,
    generation_timeout: Duration,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            generator: None,
            credential: None,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/planout/planout.db` or
    /// `~/.local/share/planout/planout.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the default credential for text generation.
    pub fn with_credential(mut self, credential: Option<Credential>) -> Self {
        self.credential = credential;
        self
    }

    /// Replaces the Gemini client with another generator.
    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Sets the request timeout of the default Gemini client.
    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FileSystem` if the database path is invalid
    /// Returns `PlannerError::Database` if database initialization fails
    /// Returns `PlannerError::Configuration` if the HTTP client cannot be
    /// created
    pub async fn build(self) -> Result<Planner> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => config::default_database_path()?,
        };

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| PlannerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), PlannerError>(())
        })
        .await
        .map_err(PlannerError::join)??;

        let generator: Arc<dyn TextGenerator> = match self.generator {
            Some(generator) => generator,
            None => Arc::new(GeminiClient::new(self.generation_timeout).map_err(|e| {
                PlannerError::Configuration {
                    message: format!("Failed to create generation client: {e}"),
                }
            })?),
        };

        info!(
            "Planner ready (database: {}, generation key: {})",
            db_path.display(),
            if self.credential.is_some() { "set" } else { "unset" }
        );

        Ok(Planner::new(db_path, generator, self.credential))
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
