//! High-level planner API for managing plans and chunks.
//!
//! The [`Planner`] is the single entry point used by every interface. Each
//! storage call runs on a blocking thread with its own SQLite connection;
//! text generation runs on the async runtime through a [`TextGenerator`].
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Operations    │    │    Schedule     │    │    Database     │
//! │ (plan_ops,      │───▶│ (split, place,  │───▶│   (via db/)     │
//! │  chunk_ops, ..) │    │  deadlines)     │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use planout_core::{PlannerBuilder, params::{Breakdown, CreatePlan}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/tmp/planout.db"))
//!     .build()
//!     .await?;
//!
//! let plan = planner
//!     .create_plan(&CreatePlan {
//!         title: "Guitar".to_string(),
//!         description: Some("Step 1: Buy strings. Step 2: Restring.".to_string()),
//!         color: None,
//!     })
//!     .await?;
//!
//! let plan = planner
//!     .breakdown_plan(&Breakdown { id: plan.id, chunks_per_day: 1, start_date: None })
//!     .await?;
//! assert_eq!(plan.chunks.len(), 2);
//! # Ok(())
//! # }
//! ```

use std::{
    path::PathBuf,
    sync::{Arc, PoisonError, RwLock},
};

use tokio::task;

use crate::{
    config::Credential,
    db::Database,
    error::{PlannerError, Result},
    generation::TextGenerator,
};

pub mod builder;
pub mod chunk_ops;
pub mod plan_ops;
pub mod suggest_ops;


pub use builder::PlannerBuilder;

/// Main planner interface for managing plans and chunks.
pub struct Planner {
    pub(crate) db_path: PathBuf,
    pub(crate) generator: Arc<dyn TextGenerator>,
    credential: RwLock<Option<Credential>>,
}

impl Planner {
    /// Creates a new planner with the specified database path.
    pub(crate) fn new(
        db_path: PathBuf,
        generator: Arc<dyn TextGenerator>,
        credential: Option<Credential>,
    ) -> Self {
        Self {
            db_path,
            generator,
            credential: RwLock::new(credential),
        }
    }

    /// The default generation credential.
    pub(crate) fn default_credential(&self) -> Option<Credential> {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the default generation credential for subsequent calls.
    pub fn set_credential(&self, credential: Option<Credential>) {
        *self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner) = credential;
    }

    /// Location of the SQLite database file.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Runs `f` against a fresh connection on a blocking thread.
    pub(crate) async fn with_database<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(PlannerError::join)?
    }
}
