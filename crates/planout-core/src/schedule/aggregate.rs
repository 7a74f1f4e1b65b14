//! Plan-level deadline aggregation.

use jiff::civil::Date;

/// Latest non-empty deadline, or `None` when no chunk has one.
pub fn latest_deadline<I>(deadlines: I) -> Option<Date>
where
    I: IntoIterator<Item = Option<Date>>,
{
    deadlines.into_iter().flatten().max()
}
