//! Timeslot: fixtures played at the same time on different courts.

use crate::models::fixture::{Fixture, FixtureIndex, PlayerNumber};
use serde::{Deserialize, Serialize};

/// A fixture placed on a court. Court number is the position within `Timeslot::matches`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduledMatch {
    /// Index into the fixture table; use this (not the court position) to look up scores.
    pub fixture_index: FixtureIndex,
    pub team_a: [PlayerNumber; 2],
    pub team_b: [PlayerNumber; 2],
}

impl From<&Fixture> for ScheduledMatch {
    fn from(f: &Fixture) -> Self {
        Self {
            fixture_index: f.index,
            team_a: f.team_a,
            team_b: f.team_b,
        }
    }
}

impl ScheduledMatch {
    pub fn players(&self) -> [PlayerNumber; 4] {
        [self.team_a[0], self.team_a[1], self.team_b[0], self.team_b[1]]
    }
}

/// One round of concurrent play. No player appears in two of its matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Timeslot {
    /// 0-based position among the timeslots.
    pub ordinal: usize,
    /// At most `court_count` matches, in court order.
    pub matches: Vec<ScheduledMatch>,
    /// Players in none of the matches, ascending.
    pub resting_players: Vec<PlayerNumber>,
}

impl Timeslot {
    pub fn fixture_indices(&self) -> impl Iterator<Item = FixtureIndex> + '_ {
        self.matches.iter().map(|m| m.fixture_index)
    }

    pub fn is_playing(&self, player: PlayerNumber) -> bool {
        self.matches.iter().any(|m| m.players().contains(&player))
    }
}
