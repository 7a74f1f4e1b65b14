//! Post-processing of generated chunk suggestions.
//!
//! Generated records are loose JSON. Each object gets a resolved
//! `estimated_hours`, and a `deadline` computed from its effort and cadence
//! unless it already names one. A record that cannot be resolved keeps an
//! empty deadline; it never fails the batch.

use jiff::civil::Date;
use log::warn;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{models::Frequency, schedule};

/// Effort assumed for a suggestion that does not estimate one.
pub const DEFAULT_SUGGESTED_HOURS: f64 = 5.0;

/// Why a single suggestion's deadline could not be computed.
#[derive(Debug, Error)]
enum SuggestionError {
    #[error("estimated effort {0} is not a number")]
    Effort(Value),
    #[error("duration_minutes {0} is not a whole number")]
    Minutes(Value),
    #[error("effort of {0} hours does not yield a calendar date")]
    OutOfRange(f64),
}

/// Resolves effort and deadline on every object in `records`, counting from
/// `today`. Non-object records are returned unchanged.
pub fn resolve_suggestions(records: Vec<Value>, today: Date) -> Vec<Value> {
    records
        .into_iter()
        .map(|mut record| {
            if let Value::Object(fields) = &mut record {
                resolve_record(fields, today);
            }
            record
        })
        .collect()
}

fn resolve_record(fields: &mut Map<String, Value>, today: Date) {
    let hours = ["estimated_total_hours", "estimated_hours"]
        .into_iter()
        .find_map(|key| fields.get(key).filter(|v| !v.is_null()).cloned())
        .unwrap_or_else(|| Value::from(DEFAULT_SUGGESTED_HOURS));
    fields.insert("estimated_hours".to_string(), hours.clone());

    if has_deadline(fields) {
        return;
    }

    match compute_deadline(fields, &hours, today) {
        Ok(deadline) => {
            fields.insert("deadline".to_string(), Value::String(deadline.to_string()));
        }
        Err(err) => {
            let title = fields.get("title").and_then(Value::as_str).unwrap_or("?");
            warn!("Could not compute deadline for suggestion '{title}': {err}");
        }
    }
}

fn has_deadline(fields: &Map<String, Value>) -> bool {
    match fields.get("deadline") {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn compute_deadline(
    fields: &Map<String, Value>,
    hours: &Value,
    today: Date,
) -> Result<Date, SuggestionError> {
    let total_hours = as_hours(hours).ok_or_else(|| SuggestionError::Effort(hours.clone()))?;

    let minutes = match fields.get("duration_minutes") {
        None => schedule::DEFAULT_SESSION_MINUTES,
        Some(raw) => as_minutes(raw).ok_or_else(|| SuggestionError::Minutes(raw.clone()))?,
    };

    // A non-string frequency behaves like an unknown cadence
    let frequency = match fields.get("frequency") {
        None => Frequency::Daily,
        Some(Value::String(s)) => Frequency::parse(s),
        Some(other) => Frequency::Unknown(other.to_string()),
    };

    if !frequency.is_recognized() {
        warn!(
            "Unrecognized frequency {:?}, counting one day per session",
            frequency.as_str()
        );
    }

    schedule::calculate_deadline(total_hours, minutes, &frequency, today)
        .ok_or(SuggestionError::OutOfRange(total_hours))
}

fn as_hours(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Whole minutes from a number or a numeric string.
pub(crate) fn as_minutes(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use serde_json::json;

    use super::*;

    const TODAY: Date = date(2024, 1, 1);

    #[test]
    fn test_missing_effort_defaults_to_five_hours() {
        let out = resolve_suggestions(vec![json!({"title": "Practice"})], TODAY);
        assert_eq!(out[0]["estimated_hours"], json!(5.0));
        // 5 sessions of 60 minutes, daily
        assert_eq!(out[0]["deadline"], json!("2024-01-06"));
    }

    #[test]
    fn test_total_hours_take_precedence() {
        let out = resolve_suggestions(
            vec![json!({
                "title": "Read docs",
                "estimated_total_hours": 20.0,
                "estimated_hours": 2.0,
                "duration_minutes": 60,
                "frequency": "Weekly"
            })],
            TODAY,
        );
        assert_eq!(out[0]["estimated_hours"], json!(20.0));
        assert_eq!(out[0]["deadline"], json!("2024-05-20"));
    }

    #[test]
    fn test_explicit_deadline_is_untouched() {
        let out = resolve_suggestions(
            vec![json!({"title": "Ship", "estimated_hours": 3, "deadline": "2030-12-31"})],
            TODAY,
        );
        assert_eq!(out[0]["deadline"], json!("2030-12-31"));
        assert_eq!(out[0]["estimated_hours"], json!(3));
    }

    #[test]
    fn test_empty_deadline_is_computed() {
        let out = resolve_suggestions(
            vec![json!({"title": "Ship", "estimated_hours": 2, "deadline": ""})],
            TODAY,
        );
        assert_eq!(out[0]["deadline"], json!("2024-01-03"));
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let out = resolve_suggestions(
            vec![json!({"title": "Run", "estimated_hours": "3.5", "duration_minutes": "30"})],
            TODAY,
        );
        assert_eq!(out[0]["deadline"], json!("2024-01-08"));
    }

    #[test]
    fn test_bad_record_does_not_abort_batch() {
        let out = resolve_suggestions(
            vec![
                json!({"title": "Broken", "estimated_hours": "lots"}),
                json!({"title": "Fine", "estimated_hours": 1}),
                json!({"title": "Bad minutes", "estimated_hours": 1, "duration_minutes": "an hour"}),
            ],
            TODAY,
        );
        assert_eq!(out.len(), 3);
        assert!(out[0].get("deadline").is_none());
        assert_eq!(out[1]["deadline"], json!("2024-01-02"));
        assert!(out[2].get("deadline").is_none());
    }

    #[test]
    fn test_non_string_frequency_uses_multiplier_one() {
        let out = resolve_suggestions(
            vec![json!({"title": "x", "estimated_hours": 2, "frequency": 7})],
            TODAY,
        );
        assert_eq!(out[0]["deadline"], json!("2024-01-03"));
    }

    #[test]
    fn test_lowercase_frequency_is_unrecognized() {
        let out = resolve_suggestions(
            vec![json!({
                "title": "Scales",
                "estimated_hours": 2,
                "duration_minutes": 60,
                "frequency": "weekly"
            })],
            TODAY,
        );
        assert_eq!(out[0]["deadline"], json!("2024-01-03"));
        assert_eq!(out[0]["frequency"], json!("weekly"));
    }

    #[test]
    fn test_non_objects_pass_through() {
        let out = resolve_suggestions(vec![json!("just text"), json!(42)], TODAY);
        assert_eq!(out, vec![json!("just text"), json!(42)]);
    }
}
