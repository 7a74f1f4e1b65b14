//! Effort-to-calendar deadline calculation.

use jiff::{Span, civil::Date};

use crate::models::Frequency;

/// Session length substituted when a caller supplies a non-positive one.
pub const DEFAULT_SESSION_MINUTES: i64 = 60;

/// Computes the date by which `total_hours` of work is finished when done in
/// sessions of `session_minutes`, one session per `frequency` period,
/// starting on `start`.
///
/// The fractional day count is floored once, after applying the frequency
/// multiplier. Returns `None` for non-finite or non-positive effort and when
/// the result falls outside the supported calendar range.
///
/// # Examples
///
/// ```rust
/// use jiff::civil::date;
/// use planout_core::{models::Frequency, schedule::calculate_deadline};
///
/// let start = date(2024, 1, 1);
/// assert_eq!(
///     calculate_deadline(20.0, 60, &Frequency::Weekly, start),
///     Some(date(2024, 5, 20)),
/// );
/// ```
pub fn calculate_deadline(
    total_hours: f64,
    session_minutes: i64,
    frequency: &Frequency,
    start: Date,
) -> Option<Date> {
    if !total_hours.is_finite() || total_hours <= 0.0 {
        return None;
    }

    let minutes = if session_minutes <= 0 {
        DEFAULT_SESSION_MINUTES
    } else {
        session_minutes
    };
    let session_hours = minutes as f64 / 60.0;
    let sessions_needed = total_hours / session_hours;
    let total_days = (sessions_needed * f64::from(frequency.day_multiplier())).floor();

    // Anything beyond i64 is certainly beyond the calendar as well.
    if !total_days.is_finite() || total_days > i64::MAX as f64 {
        return None;
    }

    let span = Span::new().try_days(total_days as i64).ok()?;
    start.checked_add(span).ok()
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_daily_and_once_add_one_day_per_session() {
        let start = date(2024, 1, 1);
        for frequency in [Frequency::Daily, Frequency::Once] {
            assert_eq!(
                calculate_deadline(5.0, 60, &frequency, start),
                Some(date(2024, 1, 6))
            );
            // 2h in 30 minute sessions is 4 sessions
            assert_eq!(
                calculate_deadline(2.0, 30, &frequency, start),
                Some(date(2024, 1, 5))
            );
        }
    }

    #[test]
    fn test_weekly_multiplies_by_seven() {
        let start = date(2024, 1, 1);
        assert_eq!(
            calculate_deadline(20.0, 60, &Frequency::Weekly, start),
            start.checked_add(Span::new().days(140)).ok()
        );
    }

    #[test]
    fn test_monthly_multiplies_by_thirty() {
        let start = date(2024, 1, 1);
        assert_eq!(
            calculate_deadline(2.0, 60, &Frequency::Monthly, start),
            Some(date(2024, 3, 1))
        );
    }

    #[test]
    fn test_non_positive_minutes_behave_as_sixty() {
        let start = date(2024, 6, 10);
        let expected = calculate_deadline(3.0, 60, &Frequency::Daily, start);
        assert_eq!(calculate_deadline(3.0, 0, &Frequency::Daily, start), expected);
        assert_eq!(calculate_deadline(3.0, -15, &Frequency::Daily, start), expected);
    }

    #[test]
    fn test_fractional_sessions_floor_once_at_the_end() {
        // 1h / 45min = 1.333 sessions, * 7 = 9.33 days
        let start = date(2024, 1, 1);
        assert_eq!(
            calculate_deadline(1.0, 45, &Frequency::Weekly, start),
            Some(date(2024, 1, 10))
        );
    }

    #[test]
    fn test_sub_day_effort_lands_on_start() {
        let start = date(2024, 1, 1);
        assert_eq!(
            calculate_deadline(0.5, 60, &Frequency::Daily, start),
            Some(start)
        );
    }

    #[test]
    fn test_unknown_frequency_uses_multiplier_one() {
        let start = date(2024, 1, 1);
        assert_eq!(
            calculate_deadline(3.0, 60, &Frequency::parse("Biweekly"), start),
            Some(date(2024, 1, 4))
        );
    }

    #[test]
    fn test_invalid_effort_yields_none() {
        let start = date(2024, 1, 1);
        assert_eq!(calculate_deadline(0.0, 60, &Frequency::Daily, start), None);
        assert_eq!(calculate_deadline(-2.0, 60, &Frequency::Daily, start), None);
        assert_eq!(
            calculate_deadline(f64::NAN, 60, &Frequency::Daily, start),
            None
        );
        assert_eq!(
            calculate_deadline(f64::INFINITY, 60, &Frequency::Daily, start),
            None
        );
    }

    #[test]
    fn test_out_of_calendar_range_yields_none() {
        let start = date(2024, 1, 1);
        assert_eq!(
            calculate_deadline(1.0e12, 1, &Frequency::Monthly, start),
            None
        );
    }
}
