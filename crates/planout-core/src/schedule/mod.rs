//! Pure scheduling engine.
//!
//! Everything here is free of I/O: turning effort into calendar deadlines,
//! splitting a description into chunk drafts, laying drafts out on the
//! calendar, and folding chunk deadlines into a plan deadline. The planner
//! composes these with storage.

mod aggregate;
mod cadence;
mod dates;
mod deadline;
mod splitter;

pub use aggregate::latest_deadline;
pub use cadence::schedule;
pub use dates::{parse_date, parse_date_lenient, today};
pub use deadline::{DEFAULT_SESSION_MINUTES, calculate_deadline};
pub use splitter::suggest_chunks;
