//! Data structures: fixtures, timeslots, scores, standings, settings, tournament.

mod fixture;
mod score;
mod settings;
mod standing;
mod timeslot;
mod tournament;

pub use fixture::{Fixture, FixtureIndex, FixtureTable, PlayerNumber, Team};
pub use score::{Score, ScoreRecord, ScoreStore, WireScore};
pub use settings::{Scoring, Settings, SettingsUpdate};
pub use standing::PlayerStanding;
pub use timeslot::{ScheduledMatch, Timeslot};
pub use tournament::{Access, Tournament, TournamentError, TournamentId};
