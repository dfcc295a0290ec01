//! Fixture, Team, and the fixture table for one player count.

use serde::{Deserialize, Serialize};

/// 1-indexed player number within a tournament (1..=player_count).
pub type PlayerNumber = u8;

/// 0-based position of a fixture in its table; the stable key for scoring.
pub type FixtureIndex = usize;

/// Which side of a fixture.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    #[default]
    A,
    B,
}

/// One match from the static round-robin table: two pairs. Never mutated.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub index: FixtureIndex,
    pub team_a: [PlayerNumber; 2],
    pub team_b: [PlayerNumber; 2],
}

impl Fixture {
    pub fn new(index: FixtureIndex, team_a: [PlayerNumber; 2], team_b: [PlayerNumber; 2]) -> Self {
        Self {
            index,
            team_a,
            team_b,
        }
    }

    /// All four players, team A first.
    pub fn players(&self) -> [PlayerNumber; 4] {
        [self.team_a[0], self.team_a[1], self.team_b[0], self.team_b[1]]
    }

    /// Side the player is on, or None if resting.
    pub fn team_of(&self, player: PlayerNumber) -> Option<Team> {
        if self.team_a.contains(&player) {
            Some(Team::A)
        } else if self.team_b.contains(&player) {
            Some(Team::B)
        } else {
            None
        }
    }

    pub fn involves(&self, player: PlayerNumber) -> bool {
        self.team_of(player).is_some()
    }

    /// Players of `1..=player_count` not in this fixture, ascending.
    pub fn resting_players(&self, player_count: u8) -> Vec<PlayerNumber> {
        (1..=player_count).filter(|&p| !self.involves(p)).collect()
    }
}

/// Ordered fixture list for one player count.
///
/// `court_variant` is set when the player count has alternative tables chosen by court
/// count (12 players: one table for 2 courts, another for 3).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FixtureTable {
    pub player_count: u8,
    pub court_variant: Option<u8>,
    pub fixtures: Vec<Fixture>,
}

impl FixtureTable {
    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    pub fn get(&self, index: FixtureIndex) -> Option<&Fixture> {
        self.fixtures.get(index)
    }

    /// Number of fixtures each player appears in, indexed by `player - 1`.
    pub fn games_per_player(&self) -> Vec<u32> {
        let mut games = vec![0u32; self.player_count as usize];
        for fixture in &self.fixtures {
            for p in fixture.players() {
                if let Some(g) = (p as usize).checked_sub(1).and_then(|i| games.get_mut(i)) {
                    *g += 1;
                }
            }
        }
        games
    }
}
