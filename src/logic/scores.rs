//! Score keys, migration of legacy positional keys, and the persisted score record.

use crate::config::{SCORE_KEY_PREFIX, UNSET_WIRE_SCORE};
use crate::models::{FixtureIndex, Score, ScoreRecord, ScoreStore, WireScore};

/// Persisted key for a fixture: `f_<index>`.
pub fn score_key(index: FixtureIndex) -> String {
    format!("{}{}", SCORE_KEY_PREFIX, index)
}

/// Fixture index of an `f_<index>` key.
pub fn parse_score_key(key: &str) -> Option<FixtureIndex> {
    key.strip_prefix(SCORE_KEY_PREFIX)?.parse().ok()
}

/// Convert a legacy `<timeslot>_<match>` key, written when scores were keyed by court
/// position, into `f_<timeslot * old_court_count + match>`.
///
/// Keys already starting with `f_` come back unchanged, so this is idempotent. Keys that
/// match neither shape, or whose index would overflow, are also returned unchanged.
pub fn migrate_legacy_key(key: &str, old_court_count: u8) -> String {
    if key.starts_with(SCORE_KEY_PREFIX) {
        return key.to_string();
    }
    let index = key.split_once('_').and_then(|(slot, pos)| {
        let timeslot: usize = slot.parse().ok()?;
        let position: usize = pos.parse().ok()?;
        timeslot
            .checked_mul(old_court_count as usize)?
            .checked_add(position)
    });
    match index {
        Some(index) => score_key(index),
        None => {
            log::warn!("Leaving unrecognised score key {:?} as is", key);
            key.to_string()
        }
    }
}

/// Negative wire values (normally `-1`) mean unset. Values too large for a score are
/// dropped to unset as well.
fn from_wire(value: i64) -> Option<u32> {
    if value < 0 {
        return None;
    }
    match u32::try_from(value) {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("Dropping out of range score {} on import", value);
            None
        }
    }
}

fn to_wire(value: Option<u32>) -> i64 {
    value.map_or(UNSET_WIRE_SCORE, i64::from)
}

impl From<WireScore> for Score {
    fn from(w: WireScore) -> Self {
        Score {
            team_a: from_wire(w.team1),
            team_b: from_wire(w.team2),
        }
    }
}

impl From<Score> for WireScore {
    fn from(s: Score) -> Self {
        WireScore {
            team1: to_wire(s.team_a),
            team2: to_wire(s.team_b),
        }
    }
}

impl ScoreStore {
    /// Load a persisted record, migrating legacy keys with the court count they were written
    /// under. Keys that still are not fixture keys are kept aside and written back by
    /// [`ScoreStore::to_record`].
    ///
    /// Record keys are visited in sorted order, so an `f_` key wins over a legacy key that
    /// migrates to the same fixture.
    pub fn from_record(record: &ScoreRecord, old_court_count: u8) -> Self {
        let mut store = ScoreStore::new();
        let mut migrated = 0usize;
        for (key, wire) in record {
            let new_key = migrate_legacy_key(key, old_court_count);
            if new_key != *key {
                migrated += 1;
            }
            match parse_score_key(&new_key) {
                Some(index) => store.insert(index, Score::from(*wire)),
                None => store.insert_unrecognized(new_key, Score::from(*wire)),
            }
        }
        log::info!(
            "Loaded {} score entries ({} migrated from legacy keys)",
            record.len(),
            migrated
        );
        store
    }

    /// Persisted form of every entry, cleared ones included.
    pub fn to_record(&self) -> ScoreRecord {
        let mut record: ScoreRecord = self
            .iter()
            .map(|(index, score)| (score_key(index), WireScore::from(score)))
            .collect();
        for (key, score) in self.unrecognized() {
            record.insert(key.to_string(), WireScore::from(score));
        }
        record
    }
}
