//! Standings: per-player aggregates over completed fixtures and the ranking order.

use crate::config::{self, STANDINGS_TOLERANCE};
use crate::models::{Fixture, PlayerStanding, ScoreStore};
use std::cmp::Ordering;

/// Aggregate every fixture with both scores entered, then rank.
///
/// One row per entry of `player_names` (player `n` is `player_names[n - 1]`; a blank name
/// shows as `Player n`). Ranking, best first:
/// 1. average score, averages within 0.01 count as equal;
/// 2. average points difference, same tolerance;
/// 3. total score.
///
/// Players equal on all three keep their player-number order.
pub fn compute_standings(
    fixtures: &[Fixture],
    scores: &ScoreStore,
    player_names: &[String],
) -> Vec<PlayerStanding> {
    let mut rows: Vec<PlayerStanding> = player_names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let n = i + 1;
            let name = if name.trim().is_empty() {
                config::default_player_name(n)
            } else {
                name.clone()
            };
            PlayerStanding::new(n as u8, name)
        })
        .collect();

    for fixture in fixtures {
        let Some((a, b)) = scores.get(fixture.index).both() else {
            continue;
        };
        for (team, own, opponent) in [(fixture.team_a, a, b), (fixture.team_b, b, a)] {
            for player in team {
                // Players outside the named field are skipped rather than indexed.
                let Some(row) = (player as usize)
                    .checked_sub(1)
                    .and_then(|i| rows.get_mut(i))
                else {
                    continue;
                };
                row.record_game(own, opponent);
            }
        }
    }

    for row in &mut rows {
        row.finish();
    }
    rank(&mut rows);
    rows
}

/// `Less` when `a` ranks above `b`.
fn compare(a: &PlayerStanding, b: &PlayerStanding) -> Ordering {
    fn descending(a: f64, b: f64) -> Ordering {
        if (a - b).abs() <= STANDINGS_TOLERANCE {
            Ordering::Equal
        } else {
            b.partial_cmp(&a).unwrap_or(Ordering::Equal)
        }
    }
    descending(a.avg_score, b.avg_score)
        .then_with(|| descending(a.avg_points_diff, b.avg_points_diff))
        .then_with(|| b.total_score.cmp(&a.total_score))
}

/// Stable insertion sort. The tolerance makes `compare` non-transitive, which the std sorts
/// may reject; at most 20 rows, so quadratic is fine.
fn rank(rows: &mut [PlayerStanding]) {
    for i in 1..rows.len() {
        let mut j = i;
        while j > 0 && compare(&rows[j - 1], &rows[j]) == Ordering::Greater {
            rows.swap(j - 1, j);
            j -= 1;
        }
    }
}
