//! Standings calculator: derive per-player pool records from completed matches.

use crate::models::{Match, MatchStatus, PoolStandings};

/// Recompute the standings rows for one pool from its full match list.
///
/// Input must share a single (tournament_id, pool_id); the caller scopes it.
/// The player universe is every login appearing in the pool's matches, in
/// first-appearance order, so players without a completed match still get a
/// zero row. Only COMPLETED matches contribute statistics.
///
/// Deterministic: the output is a pure function of the input list, which is
/// what lets the storage layer replace a pool's rows wholesale on every
/// recomputation without drift.
pub fn recompute_standings(pool_matches: &[Match]) -> Vec<PoolStandings> {
    let mut players: Vec<&str> = Vec::new();
    for m in pool_matches {
        for login in [m.player_a_login.as_str(), m.player_b_login.as_str()] {
            if !players.contains(&login) {
                players.push(login);
            }
        }
    }

    players
        .into_iter()
        .map(|login| player_row(login, pool_matches))
        .collect()
}

/// Accumulate one player's row over the pool's completed matches.
fn player_row(login: &str, pool_matches: &[Match]) -> PoolStandings {
    // pool_matches is non-empty whenever there is a player to build a row for
    let first = &pool_matches[0];
    let pool_id = first.pool_id.clone().unwrap_or_default();
    let mut row = PoolStandings::zero(first.tournament_id, pool_id, login);

    for m in pool_matches {
        if m.status != MatchStatus::Completed {
            continue;
        }
        let is_a = m.player_a_login == login;
        let is_b = m.player_b_login == login;
        if !is_a && !is_b {
            continue;
        }

        row.matches_played += 1;
        if m.winner_login.as_deref() == Some(login) {
            row.matches_won += 1;
        } else {
            row.matches_lost += 1;
        }

        if let Some(completed_at) = m.completed_at {
            if row.last_played_at.map_or(true, |t| completed_at > t) {
                row.last_played_at = Some(completed_at);
            }
        }

        for game in &m.scores {
            let (own, opponent) = if is_a {
                (game.player_a_score, game.player_b_score)
            } else {
                (game.player_b_score, game.player_a_score)
            };
            row.points_won += own;
            row.points_lost += opponent;
            // A tied game counts for neither side. Ties are not a valid game
            // state in this domain, but bad data must not double-count.
            if own > opponent {
                row.games_won += 1;
            } else if own < opponent {
                row.games_lost += 1;
            }
        }
    }

    row.points_diff = row.points_won - row.points_lost;
    row
}

/// Display order: most match wins first, points difference as the tiebreak.
pub fn sort_for_display(rows: &mut [PoolStandings]) {
    rows.sort_by(|a, b| {
        b.matches_won
            .cmp(&a.matches_won)
            .then(b.points_diff.cmp(&a.points_diff))
    });
}
