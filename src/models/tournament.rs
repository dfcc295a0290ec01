//! Tournament: settings, names, scores, and the cached schedule.

use crate::config;
use crate::logic::{compute_standings, FixtureCatalog, TimeslotCache};
use crate::models::fixture::{FixtureIndex, FixtureTable, PlayerNumber, Team};
use crate::models::score::{Score, ScoreRecord, ScoreStore};
use crate::models::settings::{Settings, SettingsUpdate};
use crate::models::standing::PlayerStanding;
use crate::models::timeslot::Timeslot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// No fixture table for this player count (or outside 5..=20).
    UnsupportedPlayerCount(u8),
    /// Court count outside the valid range for the player count.
    CourtCountOutOfRange { court_count: u8, min: u8, max: u8 },
    /// Fixed-points total is not one of the offered options.
    UnsupportedTotalPoints(u32),
    /// A fixture breaks the table rules (team size, duplicate or unknown player).
    InvalidFixture { index: usize, reason: String },
    /// A supplied fixture table could not be parsed.
    InvalidFixtureTable(String),
    /// Caller may not change this tournament.
    NotEditable,
    /// Fixture index beyond the table.
    FixtureNotFound(FixtureIndex),
    /// Fixed points on and the entered score is above the total.
    ScoreExceedsTotal { value: u32, total: u32 },
    PlayerNotFound(PlayerNumber),
    CourtNotFound(u8),
    /// The change would select a different fixture table while scores are entered against
    /// the current one.
    ScoresTiedToTable,
}

impl TournamentError {
    /// Settings or fixture data that cannot be scheduled. Not recoverable by retrying.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(
            self,
            TournamentError::UnsupportedPlayerCount(_)
                | TournamentError::CourtCountOutOfRange { .. }
                | TournamentError::UnsupportedTotalPoints(_)
                | TournamentError::InvalidFixture { .. }
                | TournamentError::InvalidFixtureTable(_)
        )
    }
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::UnsupportedPlayerCount(n) => {
                write!(f, "No fixtures available for {} players", n)
            }
            TournamentError::CourtCountOutOfRange {
                court_count,
                min,
                max,
            } => write!(
                f,
                "{} courts is not allowed here (must be between {} and {})",
                court_count, min, max
            ),
            TournamentError::UnsupportedTotalPoints(p) => {
                write!(f, "Total points must be one of {:?} (got {})", config::POINTS_OPTIONS, p)
            }
            TournamentError::InvalidFixture { index, reason } => {
                write!(f, "Fixture {} is invalid: {}", index, reason)
            }
            TournamentError::InvalidFixtureTable(e) => write!(f, "Could not read fixture table: {}", e),
            TournamentError::NotEditable => write!(f, "This tournament cannot be edited"),
            TournamentError::FixtureNotFound(i) => write!(f, "Fixture {} not found", i),
            TournamentError::ScoreExceedsTotal { value, total } => {
                write!(f, "Score {} is more than the {} points available", value, total)
            }
            TournamentError::PlayerNotFound(p) => write!(f, "Player {} not found", p),
            TournamentError::CourtNotFound(c) => write!(f, "Court {} not found", c),
            TournamentError::ScoresTiedToTable => write!(
                f,
                "Scores are entered against the current fixtures; reset them before switching tables"
            ),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// What the current caller may do. Granted by whoever verifies the organiser; not checked here.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// May change settings, names and scores.
    #[default]
    Organiser,
    /// Read only.
    Viewer,
}

/// Full tournament state. Mutations only update state; callers re-query what they display.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    id: TournamentId,
    name: String,
    settings: Settings,
    player_names: Vec<String>,
    court_names: Vec<String>,
    scores: ScoreStore,
    access: Access,
    started: bool,
    updated_at: DateTime<Utc>,
    #[serde(skip)]
    catalog: FixtureCatalog,
    #[serde(skip)]
    cache: TimeslotCache,
}

impl Tournament {
    /// Create a tournament on the built-in fixture tables. The creator is the organiser.
    pub fn new(name: impl Into<String>, settings: Settings) -> Result<Self, TournamentError> {
        Self::with_catalog(name, settings, FixtureCatalog::builtin())
    }

    /// Create a tournament on a custom set of fixture tables.
    pub fn with_catalog(
        name: impl Into<String>,
        settings: Settings,
        catalog: FixtureCatalog,
    ) -> Result<Self, TournamentError> {
        settings.validate(&catalog)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            player_names: config::default_player_names(settings.player_count as usize),
            court_names: config::default_court_names(settings.court_count as usize),
            settings,
            scores: ScoreStore::new(),
            access: Access::Organiser,
            started: false,
            updated_at: Utc::now(),
            catalog,
            cache: TimeslotCache::new(),
        })
    }

    pub fn id(&self) -> TournamentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn player_names(&self) -> &[String] {
        &self.player_names
    }

    pub fn court_names(&self) -> &[String] {
        &self.court_names
    }

    pub fn scores(&self) -> &ScoreStore {
        &self.scores
    }

    pub fn catalog(&self) -> &FixtureCatalog {
        &self.catalog
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn can_edit(&self) -> bool {
        self.access == Access::Organiser
    }

    /// Set by the caller after checking (or failing to check) the organiser's credentials.
    pub fn set_access(&mut self, access: Access) {
        self.access = access;
    }

    fn ensure_editable(&self) -> Result<(), TournamentError> {
        if self.can_edit() {
            Ok(())
        } else {
            Err(TournamentError::NotEditable)
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), TournamentError> {
        self.ensure_editable()?;
        self.name = name.into();
        self.touch();
        Ok(())
    }

    /// Mark play as started. Settings can still change afterwards; scores stay keyed by fixture.
    pub fn start(&mut self) -> Result<(), TournamentError> {
        self.ensure_editable()?;
        self.started = true;
        self.touch();
        Ok(())
    }

    /// Apply a partial settings change. The merged settings must be valid as a whole.
    ///
    /// A player or court count change drops the cached timeslots. Player names are resized to
    /// the new field (new players get `Player N`); court names only grow, so a name survives
    /// dropping a court and bringing it back. Scores are left alone, so a change that picks a
    /// different fixture table (another player count, or the other 12-player variant) fails
    /// with `ScoresTiedToTable` while any score is entered.
    pub fn update_settings(&mut self, update: SettingsUpdate) -> Result<(), TournamentError> {
        self.ensure_editable()?;
        let next = self.settings.merged(&update);
        next.validate(&self.catalog)?;
        let switches_table = self.fixtures().ok()
            != Some(self.catalog.table(next.player_count, next.court_count)?);
        if switches_table && self.scores.has_entries() {
            return Err(TournamentError::ScoresTiedToTable);
        }

        if next.player_count != self.settings.player_count
            || next.court_count != self.settings.court_count
        {
            self.cache.invalidate();
        }
        let players = next.player_count as usize;
        if players != self.player_names.len() {
            let start = self.player_names.len();
            self.player_names.truncate(players);
            self.player_names
                .extend((start + 1..=players).map(config::default_player_name));
        }
        let courts = next.court_count as usize;
        if courts > self.court_names.len() {
            let start = self.court_names.len();
            self.court_names
                .extend((start + 1..=courts).map(config::default_court_name));
        }

        log::info!(
            "Tournament {}: {} players, {} courts, fixed points {} ({})",
            self.id,
            next.player_count,
            next.court_count,
            next.fixed_points,
            next.total_points
        );
        self.settings = next;
        self.touch();
        Ok(())
    }

    pub fn rename_player(
        &mut self,
        player: PlayerNumber,
        name: impl Into<String>,
    ) -> Result<(), TournamentError> {
        self.ensure_editable()?;
        let slot = (player as usize)
            .checked_sub(1)
            .and_then(|i| self.player_names.get_mut(i))
            .ok_or(TournamentError::PlayerNotFound(player))?;
        *slot = name.into();
        self.touch();
        Ok(())
    }

    pub fn rename_court(&mut self, court: u8, name: impl Into<String>) -> Result<(), TournamentError> {
        self.ensure_editable()?;
        if court == 0 || court > self.settings.court_count {
            return Err(TournamentError::CourtNotFound(court));
        }
        let slot = self
            .court_names
            .get_mut(court as usize - 1)
            .ok_or(TournamentError::CourtNotFound(court))?;
        *slot = name.into();
        self.touch();
        Ok(())
    }

    /// Add or replace a fixture table (e.g. for a field above 12 players). Replacing the table
    /// in play fails with `ScoresTiedToTable` while any score is entered.
    pub fn install_fixture_table(&mut self, table: FixtureTable) -> Result<(), TournamentError> {
        self.ensure_editable()?;
        let mut catalog = self.catalog.clone();
        catalog.insert(table)?;
        let Settings {
            player_count,
            court_count,
            ..
        } = self.settings;
        if self.scores.has_entries()
            && self.catalog.table(player_count, court_count).ok()
                != catalog.table(player_count, court_count).ok()
        {
            return Err(TournamentError::ScoresTiedToTable);
        }
        self.catalog = catalog;
        self.cache.invalidate();
        self.touch();
        Ok(())
    }

    /// Fixture table for the current player and court count.
    pub fn fixtures(&self) -> Result<&FixtureTable, TournamentError> {
        self.catalog
            .table(self.settings.player_count, self.settings.court_count)
    }

    /// Current schedule, rebuilt only after a player or court count change.
    pub fn timeslots(&mut self) -> Result<&[Timeslot], TournamentError> {
        let Settings {
            player_count,
            court_count,
            ..
        } = self.settings;
        let table = self.catalog.table(player_count, court_count)?;
        self.cache
            .get_or_build(&table.fixtures, player_count, court_count)
    }

    /// Fixture playing on court `position` (0-based) in timeslot `ordinal`, if any.
    pub fn fixture_at(
        &mut self,
        ordinal: usize,
        position: usize,
    ) -> Result<Option<FixtureIndex>, TournamentError> {
        Ok(self
            .timeslots()?
            .get(ordinal)
            .and_then(|t| t.matches.get(position))
            .map(|m| m.fixture_index))
    }

    /// Enter one team's score. See [`ScoreStore::set`] for the fixed-points rule.
    pub fn set_score(
        &mut self,
        index: FixtureIndex,
        team: Team,
        value: Option<u32>,
    ) -> Result<Score, TournamentError> {
        self.ensure_editable()?;
        if index >= self.fixtures()?.len() {
            return Err(TournamentError::FixtureNotFound(index));
        }
        let score = self
            .scores
            .set(index, team, value, self.settings.scoring())?;
        self.touch();
        Ok(score)
    }

    pub fn clear_score(&mut self, index: FixtureIndex) -> Result<(), TournamentError> {
        self.ensure_editable()?;
        if index >= self.fixtures()?.len() {
            return Err(TournamentError::FixtureNotFound(index));
        }
        self.scores.clear(index);
        self.touch();
        Ok(())
    }

    /// Score for a fixture; unset/unset if never entered.
    pub fn score(&self, index: FixtureIndex) -> Score {
        self.scores.get(index)
    }

    pub fn reset_scores(&mut self) -> Result<(), TournamentError> {
        self.ensure_editable()?;
        self.scores.reset();
        self.touch();
        Ok(())
    }

    /// Replace all scores with a persisted record. Legacy keys are migrated using the court
    /// count in effect when they were written.
    pub fn import_scores(
        &mut self,
        record: &ScoreRecord,
        old_court_count: u8,
    ) -> Result<(), TournamentError> {
        self.ensure_editable()?;
        self.scores = ScoreStore::from_record(record, old_court_count);
        self.touch();
        Ok(())
    }

    pub fn score_record(&self) -> ScoreRecord {
        self.scores.to_record()
    }

    pub fn standings(&self) -> Result<Vec<PlayerStanding>, TournamentError> {
        let table = self.fixtures()?;
        Ok(compute_standings(&table.fixtures, &self.scores, &self.player_names))
    }

    /// Fixtures of the current table with both scores entered.
    pub fn completed_matches(&self) -> Result<usize, TournamentError> {
        Ok(self.scores.completed_count(self.fixtures()?.len()))
    }

    pub fn total_matches(&self) -> Result<usize, TournamentError> {
        Ok(self.fixtures()?.len())
    }

    pub fn total_timeslots(&mut self) -> Result<usize, TournamentError> {
        Ok(self.timeslots()?.len())
    }

    /// Fewest and most games any player plays in the current table.
    pub fn games_per_player_range(&self) -> Result<(u32, u32), TournamentError> {
        let info = self.fixtures()?.info();
        Ok((info.games_per_player_min, info.games_per_player_max))
    }
}
