//! PlayerStanding: one row of the standings table.

use crate::models::fixture::PlayerNumber;
use serde::{Deserialize, Serialize};

/// Aggregates for one player over all completed fixtures. Derived on every query.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStanding {
    pub player: PlayerNumber,
    pub name: String,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub points_for: u64,
    pub points_against: u64,
    /// Sum of the player's own team scores.
    pub total_score: u64,
    pub points_diff: i64,
    /// `total_score / games_played`, 0 when no games.
    pub avg_score: f64,
    /// `points_diff / games_played`, 0 when no games.
    pub avg_points_diff: f64,
}

impl PlayerStanding {
    pub fn new(player: PlayerNumber, name: impl Into<String>) -> Self {
        Self {
            player,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Record one completed fixture from this player's side.
    pub fn record_game(&mut self, own: u32, opponent: u32) {
        self.games_played += 1;
        self.points_for = self.points_for.saturating_add(u64::from(own));
        self.points_against = self.points_against.saturating_add(u64::from(opponent));
        self.total_score = self.total_score.saturating_add(u64::from(own));
        match own.cmp(&opponent) {
            std::cmp::Ordering::Greater => self.wins += 1,
            std::cmp::Ordering::Less => self.losses += 1,
            std::cmp::Ordering::Equal => self.draws += 1,
        }
    }

    /// Fill in the derived fields once all games are recorded.
    pub fn finish(&mut self) {
        let points_for = i64::try_from(self.points_for).unwrap_or(i64::MAX);
        let points_against = i64::try_from(self.points_against).unwrap_or(i64::MAX);
        self.points_diff = points_for.saturating_sub(points_against);
        if self.games_played > 0 {
            let games = f64::from(self.games_played);
            self.avg_score = self.total_score as f64 / games;
            self.avg_points_diff = self.points_diff as f64 / games;
        } else {
            self.avg_score = 0.0;
            self.avg_points_diff = 0.0;
        }
    }
}
