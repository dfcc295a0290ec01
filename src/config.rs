//! Tournament-wide constants: player/court bounds, defaults, scoring options, wire encodings.

/// Smallest supported field.
pub const MIN_PLAYERS: u8 = 5;
/// Largest supported field (a fixture table must still exist for the count).
pub const MAX_PLAYERS: u8 = 20;

pub const MIN_COURTS: u8 = 1;
/// 20 players on 5 courts.
pub const MAX_COURTS: u8 = 5;

/// Players on one court (two teams of two).
pub const PLAYERS_PER_COURT: u8 = 4;

pub const DEFAULT_PLAYERS: u8 = 6;
pub const DEFAULT_COURTS: u8 = 1;
pub const DEFAULT_TOTAL_POINTS: u32 = 16;
pub const DEFAULT_FIXED_POINTS: bool = true;

/// Allowed values for the fixed-points total.
pub const POINTS_OPTIONS: [u32; 4] = [16, 21, 24, 32];

/// Prefix of fixture-index score keys (`f_0`, `f_1`, ...).
pub const SCORE_KEY_PREFIX: &str = "f_";

/// Wire value for an unset team score.
pub const UNSET_WIRE_SCORE: i64 = -1;

/// Two averages closer than this rank as equal.
pub const STANDINGS_TOLERANCE: f64 = 0.01;

/// Default display name for player `n` (1-indexed).
pub fn default_player_name(n: usize) -> String {
    format!("Player {}", n)
}

/// Default display name for court `n` (1-indexed).
pub fn default_court_name(n: usize) -> String {
    format!("Court {}", n)
}

pub fn default_player_names(count: usize) -> Vec<String> {
    (1..=count).map(default_player_name).collect()
}

pub fn default_court_names(count: usize) -> Vec<String> {
    (1..=count).map(default_court_name).collect()
}
