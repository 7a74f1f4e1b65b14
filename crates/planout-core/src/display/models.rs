//! Display implementations for domain models.
//!
//! Markdown output with status icons and structured sections, kept apart
//! from the model definitions.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    db::BackfillSummary,
    generation::ChunkDetails,
    models::{Chunk, ChunkStatus, Frequency, Plan, PlanSummary},
};

impl fmt::Display for ChunkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Color: {}", self.color)?;
        match self.deadline {
            Some(deadline) => writeln!(f, "- Deadline: {deadline}")?,
            None => writeln!(f, "- Deadline: none")?,
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }

        if !self.chunks.is_empty() {
            writeln!(f, "\n## Chunks")?;
            writeln!(f)?;
            for chunk in &self.chunks {
                write!(f, "{chunk}")?;
            }
        } else {
            writeln!(f, "\nNo chunks in this plan.")?;
        }

        Ok(())
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.id,
            self.title,
            self.status.with_icon()
        )?;
        writeln!(f)?;

        if let Some(date) = self.scheduled_date {
            writeln!(f, "- Scheduled: {date}")?;
        }
        if let Some(deadline) = self.deadline {
            writeln!(f, "- Deadline: {deadline}")?;
        }
        writeln!(
            f,
            "- Effort: {}h in {} min sessions, {}",
            self.estimated_hours, self.duration_minutes, self.frequency
        )?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "{desc}")?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_chunks > 0 {
            format!(" ({}/{})", self.done_chunks, self.total_chunks)
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){progress}", self.title, self.id)?;
        writeln!(f)?;

        if !self.description.is_empty() {
            writeln!(f, "- **Description**: {}", self.description)?;
        }
        if let Some(deadline) = self.deadline {
            writeln!(f, "- **Deadline**: {deadline}")?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for ChunkDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Session length: {} min", self.duration_minutes)?;
        writeln!(f, "- Frequency: {}", self.frequency)?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)
    }
}

impl fmt::Display for BackfillSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Filled {} chunk deadlines and recalculated {} plans",
            self.chunks_updated, self.plans_recalculated
        )
    }
}
