//! Timeslot scheduling: pack fixtures into rounds of concurrent, conflict-free matches.

use crate::config;
use crate::logic::fixtures::{max_courts_for, validate_fixture};
use crate::models::{Fixture, PlayerNumber, ScheduledMatch, Timeslot, TournamentError};
use std::collections::HashSet;

/// Group fixtures into timeslots of at most `court_count` matches with no shared players.
///
/// Greedy first fit in fixture-table order: each new timeslot takes every still unscheduled
/// fixture, scanning from the top, whose players are all free, until the courts are full.
/// Deterministic for the same input. Not guaranteed minimal; the built-in tables are ordered
/// so the greedy pass produces the intended rounds.
pub fn build_timeslots(
    fixtures: &[Fixture],
    player_count: u8,
    court_count: u8,
) -> Result<Vec<Timeslot>, TournamentError> {
    if !(config::MIN_PLAYERS..=config::MAX_PLAYERS).contains(&player_count) {
        return Err(TournamentError::UnsupportedPlayerCount(player_count));
    }
    let max_courts = max_courts_for(player_count);
    if !(config::MIN_COURTS..=max_courts).contains(&court_count) {
        return Err(TournamentError::CourtCountOutOfRange {
            court_count,
            min: config::MIN_COURTS,
            max: max_courts,
        });
    }
    for f in fixtures {
        validate_fixture(f.index, &f.team_a, &f.team_b, player_count)?;
    }

    let courts = court_count as usize;
    let mut scheduled = vec![false; fixtures.len()];
    let mut remaining = fixtures.len();
    let mut timeslots: Vec<Timeslot> = Vec::new();

    // The first unscheduled fixture always fits an empty timeslot, so each pass makes progress.
    while remaining > 0 {
        let mut committed: HashSet<PlayerNumber> = HashSet::new();
        let mut matches = Vec::with_capacity(courts);

        for (i, fixture) in fixtures.iter().enumerate() {
            if matches.len() >= courts {
                break;
            }
            if scheduled[i] {
                continue;
            }
            let players = fixture.players();
            if players.iter().any(|p| committed.contains(p)) {
                continue;
            }
            committed.extend(players);
            matches.push(ScheduledMatch::from(fixture));
            scheduled[i] = true;
            remaining -= 1;
        }

        let resting_players = (1..=player_count)
            .filter(|p| !committed.contains(p))
            .collect();
        timeslots.push(Timeslot {
            ordinal: timeslots.len(),
            matches,
            resting_players,
        });
    }

    log::debug!(
        "Scheduled {} fixtures into {} timeslots ({} players, {} courts)",
        fixtures.len(),
        timeslots.len(),
        player_count,
        court_count
    );
    Ok(timeslots)
}

/// Last built schedule, keyed by (player count, court count) and the fixtures it was
/// built from.
#[derive(Clone, Debug, Default)]
pub struct TimeslotCache {
    key: Option<(u8, u8)>,
    fixtures: Vec<Fixture>,
    timeslots: Vec<Timeslot>,
}

impl TimeslotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cached_for(&self, player_count: u8, court_count: u8) -> bool {
        self.key == Some((player_count, court_count))
    }

    /// Cached timeslots for this key, rebuilding first if the counts or the fixtures
    /// changed, or the cache was invalidated.
    pub fn get_or_build(
        &mut self,
        fixtures: &[Fixture],
        player_count: u8,
        court_count: u8,
    ) -> Result<&[Timeslot], TournamentError> {
        if !self.is_cached_for(player_count, court_count) || self.fixtures != fixtures {
            self.timeslots = build_timeslots(fixtures, player_count, court_count)?;
            self.fixtures = fixtures.to_vec();
            self.key = Some((player_count, court_count));
        }
        Ok(&self.timeslots)
    }

    pub fn invalidate(&mut self) {
        if self.key.take().is_some() {
            log::debug!("Timeslot cache invalidated");
        }
        self.fixtures.clear();
        self.timeslots.clear();
    }
}
