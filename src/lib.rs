//! Americano doubles tournaments: timeslot scheduling across courts, score bookkeeping
//! keyed by fixture, and ranked standings.

pub mod config;
pub mod logic;
pub mod models;

pub use logic::{
    build_timeslots, compute_standings, max_courts_for, migrate_legacy_key, parse_score_key,
    score_key, FixtureCatalog, TableInfo, TimeslotCache,
};
pub use models::{
    Access, Fixture, FixtureIndex, FixtureTable, PlayerNumber, PlayerStanding, ScheduledMatch,
    Score, ScoreRecord, ScoreStore, Scoring, Settings, SettingsUpdate, Team, Timeslot,
    Tournament, TournamentError, TournamentId, WireScore,
};
