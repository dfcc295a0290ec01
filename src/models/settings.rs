//! Tournament settings (player count, courts, scoring) and partial updates.

use crate::config;
use crate::logic::FixtureCatalog;
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};

/// Scoring mode for a tournament.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Scoring {
    /// Both scores of a match must add up to `total_points`.
    pub fixed_points: bool,
    pub total_points: u32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            fixed_points: config::DEFAULT_FIXED_POINTS,
            total_points: config::DEFAULT_TOTAL_POINTS,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_player_count")]
    pub player_count: u8,
    #[serde(default = "default_court_count")]
    pub court_count: u8,
    #[serde(default = "default_fixed_points")]
    pub fixed_points: bool,
    #[serde(default = "default_total_points")]
    pub total_points: u32,
}

fn default_player_count() -> u8 {
    config::DEFAULT_PLAYERS
}

fn default_court_count() -> u8 {
    config::DEFAULT_COURTS
}

fn default_fixed_points() -> bool {
    config::DEFAULT_FIXED_POINTS
}

fn default_total_points() -> u32 {
    config::DEFAULT_TOTAL_POINTS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_count: default_player_count(),
            court_count: default_court_count(),
            fixed_points: default_fixed_points(),
            total_points: default_total_points(),
        }
    }
}

impl Settings {
    pub fn scoring(&self) -> Scoring {
        Scoring {
            fixed_points: self.fixed_points,
            total_points: self.total_points,
        }
    }

    /// Player count must have a fixture table, court count must be in that table's range,
    /// total points must be one of the offered options.
    pub fn validate(&self, catalog: &FixtureCatalog) -> Result<(), TournamentError> {
        let courts = catalog.court_range(self.player_count)?;
        if !courts.contains(&self.court_count) {
            return Err(TournamentError::CourtCountOutOfRange {
                court_count: self.court_count,
                min: *courts.start(),
                max: *courts.end(),
            });
        }
        if !config::POINTS_OPTIONS.contains(&self.total_points) {
            return Err(TournamentError::UnsupportedTotalPoints(self.total_points));
        }
        Ok(())
    }

    /// Copy of these settings with the update's fields applied.
    pub fn merged(&self, update: &SettingsUpdate) -> Self {
        Self {
            player_count: update.player_count.unwrap_or(self.player_count),
            court_count: update.court_count.unwrap_or(self.court_count),
            fixed_points: update.fixed_points.unwrap_or(self.fixed_points),
            total_points: update.total_points.unwrap_or(self.total_points),
        }
    }
}

/// Partial settings change; `None` fields keep their current value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    #[serde(default)]
    pub player_count: Option<u8>,
    #[serde(default)]
    pub court_count: Option<u8>,
    #[serde(default)]
    pub fixed_points: Option<bool>,
    #[serde(default)]
    pub total_points: Option<u32>,
}
