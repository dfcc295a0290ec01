//! Scheduling and scoring logic: fixture catalogue, timeslots, score keys, standings.

mod fixtures;
mod schedule;
mod scores;
mod standings;

pub use fixtures::{max_courts_for, FixtureCatalog, TableInfo};
pub use schedule::{build_timeslots, TimeslotCache};
pub use scores::{migrate_legacy_key, parse_score_key, score_key};
pub use standings::compute_standings;
