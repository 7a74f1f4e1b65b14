//! Fixed-cadence calendar assignment.

use jiff::civil::Date;
use log::warn;

use crate::models::ChunkDraft;

/// Assigns consecutive calendar dates to `drafts` in order, starting on
/// `start` and placing `chunks_per_day` drafts on each date.
///
/// A `chunks_per_day` of zero behaves as one.
pub fn schedule(drafts: &mut [ChunkDraft], start: Date, chunks_per_day: u32) {
    let per_day = chunks_per_day.max(1);
    let mut current = start;
    let mut placed = 0;

    for draft in drafts.iter_mut() {
        draft.scheduled_date = Some(current);
        placed += 1;
        if placed == per_day {
            placed = 0;
            current = match current.tomorrow() {
                Ok(next) => next,
                Err(err) => {
                    warn!("Schedule reached the end of the calendar: {err}");
                    current
                }
            };
        }
    }
}
