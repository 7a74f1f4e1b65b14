use std::sync::Arc;

use async_trait::async_trait;
use planout_core::{Credential, GenerationError, Planner, PlannerBuilder, TextGenerator};
use tempfile::TempDir;

/// Generator that never reaches a network service.
pub struct OfflineGenerator;

#[async_trait]
impl TextGenerator for OfflineGenerator {
    async fn complete(
        &self,
        _prompt: &str,
        _credential: Option<&Credential>,
    ) -> Result<String, GenerationError> {
        Err(GenerationError::MissingCredential)
    }
}

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_generator(Arc::new(OfflineGenerator))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}
