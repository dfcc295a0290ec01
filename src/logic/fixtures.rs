//! Fixture catalogue: the built-in round-robin tables, lookup by player and court count,
//! validation, and import of externally supplied tables.
//!
//! Each table is hand-curated so every player partners every other player, and ordered so
//! the greedy timeslot packer in `schedule` yields the intended number of rounds.

use crate::config;
use crate::models::{Fixture, FixtureTable, PlayerNumber, TournamentError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::RangeInclusive;

/// Team A and team B of one fixture.
type Pairing = [[PlayerNumber; 2]; 2];

/// Most courts a field can fill at once (four players per court).
pub fn max_courts_for(player_count: u8) -> u8 {
    (player_count / config::PLAYERS_PER_COURT).min(config::MAX_COURTS)
}

/// External record format: `{ "teamA": [1, 2], "teamB": [3, 4], "resting": [5] }`.
/// `resting` is accepted and ignored; resting players are always derived.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FixtureRecord {
    team_a: Vec<PlayerNumber>,
    team_b: Vec<PlayerNumber>,
}

/// Check one fixture against the field: two players per team, four distinct players,
/// all within `1..=player_count`.
pub(crate) fn validate_fixture(
    index: usize,
    team_a: &[PlayerNumber],
    team_b: &[PlayerNumber],
    player_count: u8,
) -> Result<Fixture, TournamentError> {
    let invalid = |reason: &str| TournamentError::InvalidFixture {
        index,
        reason: reason.to_string(),
    };
    let (team_a, team_b): ([PlayerNumber; 2], [PlayerNumber; 2]) =
        match (team_a.try_into(), team_b.try_into()) {
            (Ok(a), Ok(b)) => (a, b),
            _ => return Err(invalid("each team must have exactly 2 players")),
        };
    let fixture = Fixture::new(index, team_a, team_b);
    let players = fixture.players();
    if players.iter().any(|&p| p == 0 || p > player_count) {
        return Err(invalid("player number outside the field"));
    }
    let distinct: HashSet<_> = players.iter().collect();
    if distinct.len() != players.len() {
        return Err(invalid("a player appears twice in the fixture"));
    }
    Ok(fixture)
}

impl FixtureTable {
    fn from_pairings(player_count: u8, court_variant: Option<u8>, pairings: &[Pairing]) -> Self {
        let fixtures = pairings
            .iter()
            .enumerate()
            .map(|(i, [a, b])| Fixture::new(i, *a, *b))
            .collect();
        Self {
            player_count,
            court_variant,
            fixtures,
        }
    }

    /// Parse a table in the external record format and validate it.
    pub fn from_json(
        player_count: u8,
        court_variant: Option<u8>,
        json: &str,
    ) -> Result<Self, TournamentError> {
        let records: Vec<FixtureRecord> = serde_json::from_str(json)
            .map_err(|e| TournamentError::InvalidFixtureTable(e.to_string()))?;
        let fixtures = records
            .iter()
            .enumerate()
            .map(|(i, r)| validate_fixture(i, &r.team_a, &r.team_b, player_count))
            .collect::<Result<Vec<_>, _>>()?;
        let table = Self {
            player_count,
            court_variant,
            fixtures,
        };
        table.validate()?;
        Ok(table)
    }

    /// Check the player count and every fixture; indices must match table positions.
    pub fn validate(&self) -> Result<(), TournamentError> {
        if !(config::MIN_PLAYERS..=config::MAX_PLAYERS).contains(&self.player_count) {
            return Err(TournamentError::UnsupportedPlayerCount(self.player_count));
        }
        if let Some(courts) = self.court_variant {
            if courts == 0 || courts > max_courts_for(self.player_count) {
                return Err(TournamentError::CourtCountOutOfRange {
                    court_count: courts,
                    min: config::MIN_COURTS,
                    max: max_courts_for(self.player_count),
                });
            }
        }
        for (i, f) in self.fixtures.iter().enumerate() {
            if f.index != i {
                return Err(TournamentError::InvalidFixture {
                    index: i,
                    reason: format!("fixture at position {} carries index {}", i, f.index),
                });
            }
            validate_fixture(i, &f.team_a, &f.team_b, self.player_count)?;
        }
        Ok(())
    }

    pub fn info(&self) -> TableInfo {
        let games = self.games_per_player();
        TableInfo {
            fixtures: self.len(),
            max_courts: max_courts_for(self.player_count),
            games_per_player_min: games.iter().copied().min().unwrap_or(0),
            games_per_player_max: games.iter().copied().max().unwrap_or(0),
        }
    }
}

/// Summary of a fixture table.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    pub fixtures: usize,
    pub max_courts: u8,
    pub games_per_player_min: u32,
    pub games_per_player_max: u32,
}

/// All fixture tables a tournament can pick from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FixtureCatalog {
    tables: Vec<FixtureTable>,
}

impl Default for FixtureCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FixtureCatalog {
    /// No tables at all.
    pub fn empty() -> Self {
        Self { tables: Vec::new() }
    }

    /// Built-in tables for 5 to 12 players. 12 players has a 2-court and a 3-court table.
    pub fn builtin() -> Self {
        let tables = vec![
            FixtureTable::from_pairings(5, None, FIVE_PLAYERS),
            FixtureTable::from_pairings(6, None, SIX_PLAYERS),
            FixtureTable::from_pairings(7, None, SEVEN_PLAYERS),
            FixtureTable::from_pairings(8, None, EIGHT_PLAYERS),
            FixtureTable::from_pairings(9, None, NINE_PLAYERS),
            FixtureTable::from_pairings(10, None, TEN_PLAYERS),
            FixtureTable::from_pairings(11, None, ELEVEN_PLAYERS),
            FixtureTable::from_pairings(12, Some(2), TWELVE_PLAYERS_TWO_COURTS),
            FixtureTable::from_pairings(12, Some(3), TWELVE_PLAYERS_THREE_COURTS),
        ];
        Self { tables }
    }

    /// Add a validated table, replacing any table for the same player count and variant.
    pub fn insert(&mut self, table: FixtureTable) -> Result<(), TournamentError> {
        table.validate()?;
        log::info!(
            "Installing fixture table for {} players (variant {:?}, {} fixtures)",
            table.player_count,
            table.court_variant,
            table.len()
        );
        self.tables.retain(|t| {
            !(t.player_count == table.player_count && t.court_variant == table.court_variant)
        });
        self.tables.push(table);
        Ok(())
    }

    pub fn tables(&self) -> &[FixtureTable] {
        &self.tables
    }

    fn candidates(&self, player_count: u8) -> impl Iterator<Item = &FixtureTable> + '_ {
        self.tables
            .iter()
            .filter(move |t| t.player_count == player_count)
    }

    pub fn supports(&self, player_count: u8) -> bool {
        self.candidates(player_count).next().is_some()
    }

    /// Valid court counts for a field. Player counts whose tables are all court variants
    /// need at least the smallest variant's courts.
    pub fn court_range(&self, player_count: u8) -> Result<RangeInclusive<u8>, TournamentError> {
        if !(config::MIN_PLAYERS..=config::MAX_PLAYERS).contains(&player_count)
            || !self.supports(player_count)
        {
            return Err(TournamentError::UnsupportedPlayerCount(player_count));
        }
        let min = if self
            .candidates(player_count)
            .any(|t| t.court_variant.is_none())
        {
            config::MIN_COURTS
        } else {
            self.candidates(player_count)
                .filter_map(|t| t.court_variant)
                .min()
                .unwrap_or(config::MIN_COURTS)
        };
        Ok(min..=max_courts_for(player_count).max(min))
    }

    /// Table to play for this field and court count.
    ///
    /// Prefers a table made for exactly this court count, then a table for any court count,
    /// then the largest court variant that still fits.
    pub fn table(&self, player_count: u8, court_count: u8) -> Result<&FixtureTable, TournamentError> {
        let courts = self.court_range(player_count)?;
        if !courts.contains(&court_count) {
            return Err(TournamentError::CourtCountOutOfRange {
                court_count,
                min: *courts.start(),
                max: *courts.end(),
            });
        }
        self.candidates(player_count)
            .find(|t| t.court_variant == Some(court_count))
            .or_else(|| self.candidates(player_count).find(|t| t.court_variant.is_none()))
            .or_else(|| {
                self.candidates(player_count)
                    .filter(|t| t.court_variant.is_some_and(|c| c <= court_count))
                    .max_by_key(|t| t.court_variant)
            })
            .ok_or(TournamentError::UnsupportedPlayerCount(player_count))
    }

    pub fn info(&self, player_count: u8, court_count: u8) -> Result<TableInfo, TournamentError> {
        Ok(self.table(player_count, court_count)?.info())
    }
}

// 5 players: 5 fixtures, 4 games each, 1 court.
const FIVE_PLAYERS: &[Pairing] = &[
    [[1, 2], [3, 4]], [[1, 3], [4, 5]], [[1, 4], [2, 5]],
    [[1, 5], [2, 3]], [[2, 4], [3, 5]],
];

// 6 players: 12 fixtures, 8 games each, 1 court.
const SIX_PLAYERS: &[Pairing] = &[
    [[1, 2], [3, 4]], [[5, 6], [1, 3]], [[2, 4], [1, 6]],
    [[3, 6], [2, 5]], [[1, 4], [3, 5]], [[2, 6], [4, 5]],
    [[1, 6], [2, 3]], [[4, 6], [3, 5]], [[1, 3], [2, 4]],
    [[1, 5], [3, 4]], [[2, 5], [4, 6]], [[1, 2], [5, 6]],
];

// 7 players: 15 fixtures, 8-9 games each, 1 court.
const SEVEN_PLAYERS: &[Pairing] = &[
    [[1, 2], [3, 4]], [[1, 3], [4, 5]], [[1, 4], [5, 6]],
    [[1, 5], [6, 7]], [[1, 6], [2, 3]], [[1, 7], [2, 4]],
    [[2, 5], [3, 6]], [[2, 6], [4, 7]], [[2, 7], [5, 6]],
    [[3, 5], [4, 6]], [[3, 7], [4, 5]], [[5, 7], [3, 4]],
    [[6, 7], [2, 3]], [[1, 2], [4, 6]], [[1, 3], [5, 7]],
];

// 8 players: 14 fixtures, 7 games each.
const EIGHT_PLAYERS: &[Pairing] = &[
    [[1, 2], [3, 4]], [[1, 3], [5, 6]], [[1, 4], [7, 8]],
    [[1, 5], [2, 6]], [[1, 6], [3, 7]], [[1, 7], [4, 8]],
    [[1, 8], [2, 5]], [[2, 3], [4, 5]], [[2, 4], [6, 7]],
    [[2, 7], [5, 8]], [[2, 8], [3, 6]], [[3, 5], [6, 8]],
    [[3, 8], [4, 7]], [[4, 6], [5, 7]],
];

// 9 players: 18 fixtures, 8 games each. Pairs of fixtures fill 2 courts, 1 rests.
const NINE_PLAYERS: &[Pairing] = &[
    [[2, 3], [4, 5]], [[6, 7], [8, 9]], [[1, 3], [4, 6]],
    [[5, 8], [7, 9]], [[1, 2], [4, 7]], [[5, 9], [6, 8]],
    [[1, 5], [2, 6]], [[3, 9], [7, 8]], [[1, 4], [2, 7]],
    [[3, 8], [6, 9]], [[1, 7], [2, 8]], [[3, 5], [4, 9]],
    [[1, 8], [2, 9]], [[3, 4], [5, 6]], [[1, 9], [2, 4]],
    [[3, 6], [5, 7]], [[1, 6], [2, 5]], [[3, 7], [4, 8]],
];

// 10 players: 30 fixtures, 12 games each. 15 rounds on 2 courts.
const TEN_PLAYERS: &[Pairing] = &[
    [[1, 6], [3, 5]], [[4, 7], [8, 10]], [[1, 7], [6, 9]],
    [[2, 4], [5, 10]], [[1, 10], [7, 9]], [[2, 3], [4, 8]],
    [[2, 5], [9, 10]], [[3, 4], [6, 8]], [[1, 5], [2, 6]],
    [[3, 7], [8, 9]], [[2, 9], [4, 5]], [[3, 6], [7, 10]],
    [[1, 3], [2, 10]], [[4, 6], [7, 8]], [[1, 9], [6, 7]],
    [[2, 3], [5, 8]], [[1, 8], [6, 10]], [[3, 4], [5, 9]],
    [[1, 2], [4, 10]], [[5, 7], [8, 9]], [[1, 4], [2, 7]],
    [[5, 6], [8, 10]], [[2, 8], [4, 9]], [[3, 5], [6, 10]],
    [[1, 4], [6, 7]], [[3, 8], [9, 10]], [[1, 5], [3, 9]],
    [[2, 4], [7, 8]], [[1, 9], [3, 10]], [[2, 5], [6, 7]],
];

// 11 players: 32 fixtures, 11-12 games each. 16 rounds on 2 courts.
const ELEVEN_PLAYERS: &[Pairing] = &[
    [[1, 6], [3, 4]], [[5, 7], [9, 10]], [[2, 10], [3, 7]],
    [[4, 6], [8, 11]], [[1, 7], [2, 6]], [[5, 8], [9, 11]],
    [[1, 9], [2, 8]], [[4, 5], [10, 11]], [[1, 8], [7, 9]],
    [[2, 3], [6, 11]], [[3, 9], [4, 11]], [[5, 6], [7, 10]],
    [[1, 5], [3, 6]], [[2, 4], [8, 10]], [[1, 10], [4, 9]],
    [[3, 5], [7, 11]], [[1, 4], [7, 8]], [[2, 5], [6, 9]],
    [[1, 11], [3, 10]], [[2, 7], [8, 9]], [[2, 11], [5, 10]],
    [[3, 4], [6, 8]], [[2, 9], [3, 8]], [[4, 5], [6, 7]],
    [[1, 3], [5, 11]], [[4, 7], [8, 10]], [[1, 2], [6, 10]],
    [[4, 8], [9, 11]], [[1, 11], [5, 9]], [[2, 3], [4, 10]],
    [[1, 6], [3, 11]], [[2, 5], [7, 8]],
];

// 12 players on 2 courts: 38 fixtures, 12-13 games each, 4 rest per round.
const TWELVE_PLAYERS_TWO_COURTS: &[Pairing] = &[
    [[2, 11], [3, 6]], [[4, 5], [8, 10]], [[1, 10], [7, 9]],
    [[3, 5], [11, 12]], [[1, 9], [2, 4]], [[6, 7], [8, 12]],
    [[1, 3], [5, 6]], [[4, 7], [9, 11]], [[1, 7], [2, 5]],
    [[4, 8], [10, 12]], [[2, 8], [3, 12]], [[6, 9], [10, 11]],
    [[2, 7], [9, 10]], [[3, 4], [6, 12]], [[1, 6], [5, 12]],
    [[2, 3], [8, 11]], [[1, 11], [4, 10]], [[5, 7], [8, 9]],
    [[2, 12], [3, 8]], [[4, 6], [7, 11]], [[1, 4], [2, 10]],
    [[5, 8], [9, 12]], [[1, 5], [3, 11]], [[2, 6], [7, 10]],
    [[3, 7], [5, 9]], [[6, 8], [10, 12]], [[1, 12], [4, 9]],
    [[2, 3], [6, 11]], [[4, 12], [5, 11]], [[7, 8], [9, 10]],
    [[1, 8], [4, 11]], [[2, 3], [6, 10]], [[1, 2], [3, 9]],
    [[5, 6], [7, 12]], [[2, 9], [5, 10]], [[4, 7], [8, 11]],
    [[1, 6], [3, 10]], [[7, 8], [11, 12]],
];

// 12 players on 3 courts: 33 fixtures, 11 games each, nobody rests.
const TWELVE_PLAYERS_THREE_COURTS: &[Pairing] = &[
    [[1, 5], [4, 8]], [[3, 7], [9, 10]], [[2, 6], [11, 12]],
    [[1, 7], [8, 9]], [[3, 5], [2, 12]], [[4, 6], [10, 11]],
    [[1, 8], [7, 9]], [[5, 12], [4, 11]], [[2, 3], [6, 10]],
    [[1, 10], [4, 7]], [[9, 12], [3, 8]], [[2, 5], [6, 11]],
    [[1, 4], [9, 11]], [[2, 10], [5, 8]], [[3, 6], [7, 12]],
    [[1, 6], [3, 10]], [[7, 11], [8, 12]], [[2, 4], [5, 9]],
    [[1, 11], [6, 9]], [[5, 7], [2, 8]], [[3, 4], [10, 12]],
    [[1, 12], [2, 9]], [[3, 11], [4, 10]], [[5, 6], [7, 8]],
    [[1, 3], [4, 9]], [[5, 11], [6, 12]], [[2, 7], [8, 10]],
    [[1, 9], [2, 11]], [[3, 12], [7, 10]], [[4, 5], [6, 8]],
    [[1, 2], [4, 12]], [[3, 9], [5, 10]], [[6, 7], [8, 11]],
];
