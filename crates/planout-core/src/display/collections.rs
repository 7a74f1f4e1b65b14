//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use serde_json::Value;

use crate::models::PlanSummary;

/// Newtype wrapper for displaying collections of plan summaries.
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plan summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the plan summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }
}

impl IntoIterator for PlanSummaries {
    type Item = PlanSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PlanSummaries {
    type Item = &'a PlanSummary;
    type IntoIter = std::slice::Iter<'a, PlanSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No plans found.")
        } else {
            for plan in &self.0 {
                write!(f, "{plan}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying generated chunk suggestions.
///
/// Suggestions are loose JSON records; known fields are shown when present.
pub struct Suggestions(pub Vec<Value>);

impl fmt::Display for Suggestions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No suggestions available.");
        }

        for (index, record) in self.0.iter().enumerate() {
            let field = |key: &str| match record.get(key) {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            };

            let title = field("title").unwrap_or_else(|| "(untitled)".to_string());
            writeln!(f, "## {}. {title}", index + 1)?;
            writeln!(f)?;
            for (label, key) in [
                ("Effort", "estimated_hours"),
                ("Session", "duration_minutes"),
                ("Frequency", "frequency"),
                ("Deadline", "deadline"),
            ] {
                if let Some(value) = field(key) {
                    writeln!(f, "- {label}: {value}")?;
                }
            }
            if let Some(desc) = field("description") {
                writeln!(f)?;
                writeln!(f, "{desc}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
