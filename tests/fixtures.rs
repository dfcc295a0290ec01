//! Integration tests for the fixture catalogue: built-in data, lookup, and custom tables.

use americano_scheduler::{max_courts_for, FixtureCatalog, FixtureTable, TournamentError};
use std::collections::HashSet;

#[test]
fn builtin_tables_are_valid() {
    let catalog = FixtureCatalog::builtin();
    assert_eq!(catalog.tables().len(), 9);
    for table in catalog.tables() {
        table.validate().unwrap();
    }
}

#[test]
fn builtin_fixture_counts() {
    let catalog = FixtureCatalog::builtin();
    let expected = [
        (5, 1, 5),
        (6, 1, 12),
        (7, 1, 15),
        (8, 2, 14),
        (9, 2, 18),
        (10, 2, 30),
        (11, 2, 32),
        (12, 2, 38),
        (12, 3, 33),
    ];
    for (players, courts, fixtures) in expected {
        assert_eq!(catalog.table(players, courts).unwrap().len(), fixtures, "{players} players");
    }
}

#[test]
fn every_player_partners_every_other_in_small_fields() {
    let catalog = FixtureCatalog::builtin();
    for players in [5u8, 6, 8] {
        let table = catalog.table(players, 1).unwrap();
        let partnerships: HashSet<(u8, u8)> = table
            .fixtures
            .iter()
            .flat_map(|f| [f.team_a, f.team_b])
            .map(|[a, b]| (a.min(b), a.max(b)))
            .collect();
        let pairs = players as usize * (players as usize - 1) / 2;
        assert_eq!(partnerships.len(), pairs, "{players} players");
    }
}

#[test]
fn games_per_player() {
    let catalog = FixtureCatalog::builtin();
    let info = catalog.info(7, 1).unwrap();
    assert_eq!((info.games_per_player_min, info.games_per_player_max), (8, 9));
    let info = catalog.info(12, 3).unwrap();
    assert_eq!((info.games_per_player_min, info.games_per_player_max), (11, 11));
    assert_eq!(info.max_courts, 3);
    let info = catalog.info(12, 2).unwrap();
    assert_eq!((info.games_per_player_min, info.games_per_player_max), (12, 13));
}

#[test]
fn court_ranges() {
    let catalog = FixtureCatalog::builtin();
    assert_eq!(catalog.court_range(5).unwrap(), 1..=1);
    assert_eq!(catalog.court_range(7).unwrap(), 1..=1);
    assert_eq!(catalog.court_range(8).unwrap(), 1..=2);
    assert_eq!(catalog.court_range(11).unwrap(), 1..=2);
    assert_eq!(catalog.court_range(12).unwrap(), 2..=3);
    assert_eq!(max_courts_for(20), 5);
}

#[test]
fn unsupported_player_counts() {
    let catalog = FixtureCatalog::builtin();
    assert!(!catalog.supports(13));
    assert_eq!(catalog.table(13, 3), Err(TournamentError::UnsupportedPlayerCount(13)));
    assert_eq!(catalog.table(4, 1), Err(TournamentError::UnsupportedPlayerCount(4)));
}

#[test]
fn twelve_players_one_court_is_out_of_range() {
    let catalog = FixtureCatalog::builtin();
    assert_eq!(
        catalog.table(12, 1),
        Err(TournamentError::CourtCountOutOfRange {
            court_count: 1,
            min: 2,
            max: 3
        })
    );
}

#[test]
fn twelve_players_table_follows_court_count() {
    let catalog = FixtureCatalog::builtin();
    assert_eq!(catalog.table(12, 2).unwrap().court_variant, Some(2));
    assert_eq!(catalog.table(12, 3).unwrap().court_variant, Some(3));
}

#[test]
fn from_json_parses_record_format() {
    let json = r#"[
        { "teamA": [1, 2], "teamB": [3, 4], "resting": [5] },
        { "teamA": [1, 3], "teamB": [4, 5] }
    ]"#;
    let table = FixtureTable::from_json(5, None, json).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.fixtures[1].index, 1);
    assert_eq!(table.fixtures[1].team_a, [1, 3]);
    assert_eq!(table.fixtures[1].team_b, [4, 5]);
    assert_eq!(table.fixtures[1].resting_players(5), vec![2]);
}

#[test]
fn from_json_rejects_bad_teams() {
    let three = r#"[{ "teamA": [1, 2, 3], "teamB": [4, 5] }]"#;
    assert!(matches!(
        FixtureTable::from_json(6, None, three),
        Err(TournamentError::InvalidFixture { index: 0, .. })
    ));

    let repeated = r#"[{ "teamA": [1, 2], "teamB": [3, 4] }, { "teamA": [1, 2], "teamB": [2, 4] }]"#;
    assert!(matches!(
        FixtureTable::from_json(6, None, repeated),
        Err(TournamentError::InvalidFixture { index: 1, .. })
    ));

    let outside = r#"[{ "teamA": [1, 2], "teamB": [3, 7] }]"#;
    assert!(matches!(
        FixtureTable::from_json(6, None, outside),
        Err(TournamentError::InvalidFixture { index: 0, .. })
    ));

    let err = FixtureTable::from_json(6, None, "not json").unwrap_err();
    assert!(matches!(err, TournamentError::InvalidFixtureTable(_)));
    assert!(err.is_invalid_configuration());
}

#[test]
fn insert_adds_larger_field() {
    let mut catalog = FixtureCatalog::builtin();
    let json = r#"[
        { "teamA": [1, 2], "teamB": [3, 4] },
        { "teamA": [5, 6], "teamB": [7, 8] },
        { "teamA": [9, 10], "teamB": [11, 12] },
        { "teamA": [13, 14], "teamB": [15, 16] }
    ]"#;
    catalog.insert(FixtureTable::from_json(16, None, json).unwrap()).unwrap();
    assert!(catalog.supports(16));
    assert_eq!(catalog.court_range(16).unwrap(), 1..=4);
    assert_eq!(catalog.table(16, 4).unwrap().len(), 4);

    // Replacing keeps a single table per player count and variant.
    let smaller = r#"[{ "teamA": [1, 2], "teamB": [3, 4] }]"#;
    catalog.insert(FixtureTable::from_json(16, None, smaller).unwrap()).unwrap();
    assert_eq!(catalog.table(16, 1).unwrap().len(), 1);
    assert_eq!(catalog.tables().iter().filter(|t| t.player_count == 16).count(), 1);
}

#[test]
fn insert_rejects_invalid_variant() {
    let mut catalog = FixtureCatalog::empty();
    let json = r#"[{ "teamA": [1, 2], "teamB": [3, 4] }]"#;
    let mut table = FixtureTable::from_json(6, None, json).unwrap();
    table.court_variant = Some(2);
    assert!(matches!(
        catalog.insert(table),
        Err(TournamentError::CourtCountOutOfRange { court_count: 2, .. })
    ));
    assert!(catalog.tables().is_empty());
}
