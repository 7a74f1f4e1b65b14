//! Prompt templates and response cleanup.

use jiff::civil::Date;

/// Builds the prompt asking for a plan breakdown.
pub fn plan_suggestions(title: &str, description: &str, deadline: Option<Date>) -> String {
    let context = deadline
        .map(|d| format!("The plan must be completed by {d}. Ensure tasks fit within this timeframe."))
        .unwrap_or_default();

    format!(
        r#"You are an expert project planner. Create a list of 3-5 concrete recurring or single tasks to achieve this goal:
Title: {title}
Description: {description}
{context}

Return ONLY a raw JSON array of objects. No markdown formatting. Each object must have:
- title (string)
- description (string, short)
- estimated_total_hours (float, TOTAL effort to complete this aspect of the project)
- duration_minutes (int, length of each work session, e.g., 30, 60)
- frequency (string, one of: "Once", "Daily", "Weekly", "Monthly")
- deadline (string, YYYY-MM-DD format, optional. If omitted, it is calculated from the total hours.)

Example JSON:
[
    {{ "title": "Read Docs", "description": "Read documentation", "estimated_total_hours": 20.0, "duration_minutes": 60, "frequency": "Daily" }}
]
"#
    )
}

/// Builds the prompt asking how to carry out one chunk.
pub fn chunk_details(title: &str) -> String {
    format!(
        r#"Suggest optimal execution details for a task titled: "{title}".
Return ONLY a raw JSON object. No markdown.
Fields:
- description (string, actionable advice)
- duration_minutes (int)
- frequency (string: "Once", "Daily", "Weekly", "Monthly")
"#
    )
}

/// Removes markdown code fences the model tends to wrap JSON in.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_plan_prompt_mentions_deadline_only_when_set() {
        let with = plan_suggestions("Guitar", "Learn songs", Some(date(2024, 6, 1)));
        assert!(with.contains("completed by 2024-06-01"));
        assert!(with.contains("Title: Guitar"));

        let without = plan_suggestions("Guitar", "Learn songs", None);
        assert!(!without.contains("completed by"));
    }

    #[test]
    fn test_details_prompt_quotes_title() {
        assert!(chunk_details("Restring").contains("\"Restring\""));
    }
}
