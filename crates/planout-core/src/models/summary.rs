//! Plan summary types and functionality.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

use super::Plan;

/// Summary information about a plan with chunk statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Plan ID
    pub id: u64,
    /// Title of the plan
    pub title: String,
    /// Description of the plan
    pub description: String,
    /// Display color
    pub color: String,
    /// Aggregated deadline
    pub deadline: Option<Date>,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Total number of chunks
    pub total_chunks: u32,
    /// Number of chunks marked done
    pub done_chunks: u32,
    /// Number of chunks not yet done
    pub pending_chunks: u32,
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        let total_chunks = plan.chunks.len() as u32;
        let done_chunks = plan.done_chunks() as u32;

        Self {
            id: plan.id,
            title: plan.title.clone(),
            description: plan.description.clone(),
            color: plan.color.clone(),
            deadline: plan.deadline,
            created_at: plan.created_at,
            total_chunks,
            done_chunks,
            pending_chunks: total_chunks - done_chunks,
        }
    }
}
