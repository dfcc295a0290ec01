//! Score per fixture and the store holding them.

use crate::models::fixture::{FixtureIndex, Team};
use crate::models::settings::Scoring;
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Both team scores for one fixture. `None` means not entered yet.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub team_a: Option<u32>,
    pub team_b: Option<u32>,
}

impl Score {
    pub const UNSET: Score = Score {
        team_a: None,
        team_b: None,
    };

    pub fn new(team_a: u32, team_b: u32) -> Self {
        Self {
            team_a: Some(team_a),
            team_b: Some(team_b),
        }
    }

    pub fn get(&self, team: Team) -> Option<u32> {
        match team {
            Team::A => self.team_a,
            Team::B => self.team_b,
        }
    }

    fn set(&mut self, team: Team, value: Option<u32>) {
        match team {
            Team::A => self.team_a = value,
            Team::B => self.team_b = value,
        }
    }

    /// Both sides entered: the fixture counts towards standings.
    pub fn is_complete(&self) -> bool {
        self.team_a.is_some() && self.team_b.is_some()
    }

    /// (team A, team B) when complete.
    pub fn both(&self) -> Option<(u32, u32)> {
        Some((self.team_a?, self.team_b?))
    }
}

/// Scores keyed by fixture index, so they survive court-count changes and re-scheduling.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreStore {
    scores: BTreeMap<FixtureIndex, Score>,
    /// Imported keys that are not fixture keys. Kept verbatim so an export loses nothing.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    unrecognized: BTreeMap<String, Score>,
}

impl ScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score for a fixture; unset/unset if never written.
    pub fn get(&self, index: FixtureIndex) -> Score {
        self.scores.get(&index).copied().unwrap_or(Score::UNSET)
    }

    /// Set one side's score. With fixed points on, entering team A's score also sets team B
    /// to `total_points - value`. Entering team B leaves team A untouched.
    pub fn set(
        &mut self,
        index: FixtureIndex,
        team: Team,
        value: Option<u32>,
        scoring: Scoring,
    ) -> Result<Score, TournamentError> {
        let complement = match (scoring.fixed_points, team, value) {
            (true, Team::A, Some(v)) => Some(scoring.total_points.checked_sub(v).ok_or(
                TournamentError::ScoreExceedsTotal {
                    value: v,
                    total: scoring.total_points,
                },
            )?),
            _ => None,
        };

        let score = self.scores.entry(index).or_default();
        score.set(team, value);
        if let Some(b) = complement {
            score.team_b = Some(b);
        }
        Ok(*score)
    }

    /// Write both sides at once (used by imports).
    pub fn insert(&mut self, index: FixtureIndex, score: Score) {
        self.scores.insert(index, score);
    }

    /// Reset both sides to unset. The key itself stays.
    pub fn clear(&mut self, index: FixtureIndex) {
        self.scores.insert(index, Score::UNSET);
    }

    /// Drop every score.
    pub fn reset(&mut self) {
        self.scores.clear();
        self.unrecognized.clear();
    }

    /// Entries in fixture order, including cleared ones.
    pub fn iter(&self) -> impl Iterator<Item = (FixtureIndex, Score)> + '_ {
        self.scores.iter().map(|(&i, &s)| (i, s))
    }

    pub(crate) fn insert_unrecognized(&mut self, key: String, score: Score) {
        self.unrecognized.insert(key, score);
    }

    pub fn unrecognized(&self) -> impl Iterator<Item = (&str, Score)> + '_ {
        self.unrecognized.iter().map(|(k, &s)| (k.as_str(), s))
    }

    /// Any side of any fixture entered.
    pub fn has_entries(&self) -> bool {
        self.scores
            .values()
            .any(|s| s.team_a.is_some() || s.team_b.is_some())
    }

    /// Fixtures among `0..fixture_count` with both sides entered.
    pub fn completed_count(&self, fixture_count: usize) -> usize {
        self.scores
            .range(..fixture_count)
            .filter(|(_, s)| s.is_complete())
            .count()
    }
}

/// Persisted form of one score: `-1` stands for unset.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WireScore {
    pub team1: i64,
    pub team2: i64,
}

/// Persisted score map: `f_<index>` keys, or legacy `<timeslot>_<match>` keys.
pub type ScoreRecord = BTreeMap<String, WireScore>;
