//! Integration tests for standings: aggregation, invariants, and the tie-break cascade.

use americano_scheduler::{
    compute_standings, Fixture, FixtureCatalog, PlayerStanding, Score, ScoreStore, Scoring, Team,
};

fn names(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("P{i}")).collect()
}

fn order(rows: &[PlayerStanding]) -> Vec<u8> {
    rows.iter().map(|r| r.player).collect()
}

#[test]
fn no_scores_everyone_zero_in_player_order() {
    let catalog = FixtureCatalog::builtin();
    let table = catalog.table(8, 2).unwrap();
    let rows = compute_standings(&table.fixtures, &ScoreStore::new(), &names(8));
    assert_eq!(rows.len(), 8);
    assert_eq!(order(&rows), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    for row in &rows {
        assert_eq!(row.games_played, 0);
        assert_eq!(row.avg_score, 0.0);
        assert_eq!(row.avg_points_diff, 0.0);
        assert!(!row.avg_score.is_nan());
    }
}

#[test]
fn single_result_credits_four_players() {
    let fixtures = vec![Fixture::new(0, [1, 2], [3, 4])];
    let mut scores = ScoreStore::new();
    scores.insert(0, Score::new(10, 6));
    let rows = compute_standings(&fixtures, &scores, &names(5));

    assert_eq!(order(&rows), vec![1, 2, 3, 4, 5]);
    let winner = &rows[0];
    assert_eq!(winner.name, "P1");
    assert_eq!((winner.games_played, winner.wins, winner.losses, winner.draws), (1, 1, 0, 0));
    assert_eq!((winner.points_for, winner.points_against), (10, 6));
    assert_eq!(winner.total_score, 10);
    assert_eq!(winner.points_diff, 4);
    assert_eq!(winner.avg_score, 10.0);
    assert_eq!(winner.avg_points_diff, 4.0);

    let loser = rows.iter().find(|r| r.player == 4).unwrap();
    assert_eq!((loser.wins, loser.losses), (0, 1));
    assert_eq!(loser.points_diff, -4);
    assert_eq!(loser.avg_points_diff, -4.0);

    let resting = rows.iter().find(|r| r.player == 5).unwrap();
    assert_eq!(resting.games_played, 0);
}

#[test]
fn draws_are_counted() {
    let fixtures = vec![Fixture::new(0, [1, 2], [3, 4])];
    let mut scores = ScoreStore::new();
    scores.insert(0, Score::new(8, 8));
    let rows = compute_standings(&fixtures, &scores, &names(5));
    for row in rows.iter().filter(|r| r.player <= 4) {
        assert_eq!((row.wins, row.losses, row.draws), (0, 0, 1));
    }
}

#[test]
fn partial_scores_are_ignored() {
    let fixtures = vec![Fixture::new(0, [1, 2], [3, 4])];
    let mut scores = ScoreStore::new();
    scores
        .set(
            0,
            Team::B,
            Some(9),
            Scoring {
                fixed_points: true,
                total_points: 16,
            },
        )
        .unwrap();
    let rows = compute_standings(&fixtures, &scores, &names(5));
    assert!(rows.iter().all(|r| r.games_played == 0));
}

#[test]
fn totals_are_consistent_across_a_full_table() {
    let catalog = FixtureCatalog::builtin();
    let table = catalog.table(10, 2).unwrap();
    let mut scores = ScoreStore::new();
    let mut completed = 0;
    for f in &table.fixtures {
        if f.index % 3 == 2 {
            continue;
        }
        let a = (f.index as u32 * 7) % 17;
        scores.insert(f.index, Score::new(a, 16 - a.min(16)));
        completed += 1;
    }
    let rows = compute_standings(&table.fixtures, &scores, &names(10));

    let games: u32 = rows.iter().map(|r| r.games_played).sum();
    assert_eq!(games, 4 * completed);
    for r in &rows {
        assert_eq!(r.wins + r.losses + r.draws, r.games_played);
        assert_eq!(r.points_diff, r.points_for as i64 - r.points_against as i64);
        assert_eq!(r.total_score, r.points_for);
    }
    let pf: u64 = rows.iter().map(|r| r.points_for).sum();
    let pa: u64 = rows.iter().map(|r| r.points_against).sum();
    assert_eq!(pf, pa);
}

#[test]
fn average_beats_total() {
    // Player 1 plays twice for 20 points (avg 10); player 5 once for 12 (avg 12).
    let fixtures = vec![
        Fixture::new(0, [1, 2], [3, 4]),
        Fixture::new(1, [1, 3], [2, 4]),
        Fixture::new(2, [5, 6], [7, 8]),
    ];
    let mut scores = ScoreStore::new();
    scores.insert(0, Score::new(10, 6));
    scores.insert(1, Score::new(10, 6));
    scores.insert(2, Score::new(12, 4));
    let rows = compute_standings(&fixtures, &scores, &names(8));
    assert_eq!(rows[0].player, 5);
    assert_eq!(rows[1].player, 6);
    assert_eq!(rows[2].player, 1);
    assert_eq!(rows[2].total_score, 20);
}

#[test]
fn equal_average_falls_back_to_points_difference() {
    // Players 1 and 5 both average 10; player 5 beat weaker opponents.
    let fixtures = vec![
        Fixture::new(0, [1, 2], [3, 4]),
        Fixture::new(1, [5, 6], [7, 8]),
    ];
    let mut scores = ScoreStore::new();
    scores.insert(0, Score::new(10, 9));
    scores.insert(1, Score::new(10, 2));
    let rows = compute_standings(&fixtures, &scores, &names(8));
    assert_eq!(&order(&rows)[..4], &[5, 6, 1, 2]);
}

#[test]
fn equal_averages_fall_back_to_total_score() {
    // Player 1: two games of 8-8. Player 5: one game of 8-8. Same averages, 16 vs 8 total.
    let fixtures = vec![
        Fixture::new(0, [5, 6], [7, 8]),
        Fixture::new(1, [1, 2], [3, 4]),
        Fixture::new(2, [1, 3], [2, 4]),
    ];
    let mut scores = ScoreStore::new();
    scores.insert(0, Score::new(8, 8));
    scores.insert(1, Score::new(8, 8));
    scores.insert(2, Score::new(8, 8));
    let rows = compute_standings(&fixtures, &scores, &names(8));
    assert_eq!(&order(&rows)[..4], &[1, 2, 3, 4]);
    assert_eq!(&order(&rows)[4..], &[5, 6, 7, 8]);
}

#[test]
fn averages_within_tolerance_count_as_equal() {
    // Players 1 and 2: 10 games, 91 points (avg 9.1), diff +0.1 per game.
    // Players 5 and 6: 11 games, 100 points (avg 9.0909), diff +9.09 per game.
    // The averages differ by less than 0.01, so points difference decides.
    let mut fixtures = Vec::new();
    let mut scores = ScoreStore::new();
    for i in 0..10 {
        fixtures.push(Fixture::new(i, [1, 2], [3, 4]));
        scores.insert(i, Score::new(if i == 0 { 10 } else { 9 }, 9));
    }
    for i in 10..21 {
        fixtures.push(Fixture::new(i, [5, 6], [7, 8]));
        scores.insert(i, Score::new(if i == 10 { 10 } else { 9 }, 0));
    }
    let rows = compute_standings(&fixtures, &scores, &names(8));
    assert_eq!(order(&rows), vec![5, 6, 1, 2, 3, 4, 7, 8]);
    assert!(rows[2].avg_score > rows[0].avg_score);
}

#[test]
fn blank_names_fall_back_to_player_number() {
    let fixtures = vec![Fixture::new(0, [1, 2], [3, 4])];
    let player_names = vec![
        "Ana".to_string(),
        String::new(),
        "  ".to_string(),
        "Dee".to_string(),
        "Eve".to_string(),
    ];
    let rows = compute_standings(&fixtures, &ScoreStore::new(), &player_names);
    let mut sorted = rows.clone();
    sorted.sort_by_key(|r| r.player);
    let by_number: Vec<&str> = sorted.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(by_number, vec!["Ana", "Player 2", "Player 3", "Dee", "Eve"]);
}

#[test]
fn players_beyond_name_list_are_skipped() {
    let fixtures = vec![Fixture::new(0, [1, 2], [3, 6])];
    let mut scores = ScoreStore::new();
    scores.insert(0, Score::new(10, 6));
    let rows = compute_standings(&fixtures, &scores, &names(5));
    assert_eq!(rows.len(), 5);
    let games: u32 = rows.iter().map(|r| r.games_played).sum();
    assert_eq!(games, 3);
}

#[test]
fn huge_free_scores_do_not_overflow_totals() {
    let fixtures = vec![
        Fixture::new(0, [1, 2], [3, 4]),
        Fixture::new(1, [1, 3], [2, 5]),
    ];
    let mut scores = ScoreStore::new();
    scores.insert(0, Score::new(u32::MAX, 0));
    scores.insert(1, Score::new(u32::MAX, 0));
    let rows = compute_standings(&fixtures, &scores, &names(5));

    let top = &rows[0];
    assert_eq!(top.player, 1);
    assert_eq!(top.games_played, 2);
    assert_eq!(top.total_score, 2 * u64::from(u32::MAX));
    assert_eq!(top.points_diff, 2 * i64::from(u32::MAX));
    assert_eq!(top.avg_score, f64::from(u32::MAX));
}
