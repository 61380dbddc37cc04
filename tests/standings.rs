//! Integration tests for the standings calculator.

use chrono::{TimeZone, Utc};
use squash_tournament_web::{
    recompute_standings, sort_for_display, GameScore, Match, MatchStatus, PoolStandings,
    TournamentId,
};
use uuid::Uuid;

fn tid() -> TournamentId {
    Uuid::new_v4()
}

fn pool_match(tournament_id: TournamentId, a: &str, b: &str) -> Match {
    Match::new_pool(tournament_id, "Pool A", a, b)
}

fn completed(mut m: Match, scores: &[(i32, i32)], winner: &str, hour: u32) -> Match {
    m.scores = scores
        .iter()
        .map(|&(a, b)| GameScore::new(a, b))
        .collect();
    m.status = MatchStatus::Completed;
    m.winner_login = Some(winner.to_string());
    m.completed_at = Some(Utc.with_ymd_and_hms(2026, 8, 1, hour, 0, 0).unwrap());
    m
}

fn row<'a>(rows: &'a [PoolStandings], login: &str) -> &'a PoolStandings {
    rows.iter().find(|r| r.login == login).unwrap()
}

#[test]
fn scheduled_matches_materialize_zero_rows() {
    let t = tid();
    let matches = vec![
        pool_match(t, "ann", "ben"),
        pool_match(t, "ann", "cam"),
        pool_match(t, "ben", "cam"),
    ];
    let rows = recompute_standings(&matches);
    assert_eq!(rows.len(), 3);
    // first-appearance order across the match list
    let logins: Vec<&str> = rows.iter().map(|r| r.login.as_str()).collect();
    assert_eq!(logins, ["ann", "ben", "cam"]);
    for r in &rows {
        assert_eq!(r.matches_played, 0);
        assert_eq!(r.points_diff, 0);
        assert!(r.last_played_at.is_none());
    }
}

#[test]
fn completed_match_accumulates_full_record() {
    let t = tid();
    let m = completed(pool_match(t, "ann", "ben"), &[(11, 3), (11, 7)], "ann", 10);
    let rows = recompute_standings(&[m]);

    let ann = row(&rows, "ann");
    assert_eq!(ann.matches_played, 1);
    assert_eq!(ann.matches_won, 1);
    assert_eq!(ann.matches_lost, 0);
    assert_eq!(ann.games_won, 2);
    assert_eq!(ann.games_lost, 0);
    assert_eq!(ann.points_won, 22);
    assert_eq!(ann.points_lost, 10);
    assert_eq!(ann.points_diff, 12);

    let ben = row(&rows, "ben");
    assert_eq!(ben.matches_lost, 1);
    assert_eq!(ben.games_lost, 2);
    assert_eq!(ben.points_diff, -12);
}

#[test]
fn recomputation_is_deterministic() {
    let t = tid();
    let matches = vec![
        completed(pool_match(t, "ann", "ben"), &[(11, 3), (11, 7)], "ann", 10),
        completed(pool_match(t, "ann", "cam"), &[(4, 11), (11, 9), (9, 11)], "cam", 11),
        pool_match(t, "ben", "cam"),
    ];
    assert_eq!(recompute_standings(&matches), recompute_standings(&matches));
}

#[test]
fn totals_are_conserved() {
    let t = tid();
    let matches = vec![
        completed(pool_match(t, "ann", "ben"), &[(11, 3), (11, 7)], "ann", 10),
        completed(pool_match(t, "ann", "cam"), &[(4, 11), (11, 9), (9, 11)], "cam", 11),
        completed(pool_match(t, "ben", "cam"), &[(11, 9), (11, 8)], "ben", 12),
    ];
    for r in recompute_standings(&matches) {
        assert_eq!(r.matches_won + r.matches_lost, r.matches_played);
        assert_eq!(r.points_diff, r.points_won - r.points_lost);
    }
}

#[test]
fn in_progress_matches_are_skipped() {
    let t = tid();
    let mut m = pool_match(t, "ann", "ben");
    m.scores = vec![GameScore::new(11, 2), GameScore::new(5, 3)];
    m.status = MatchStatus::InProgress;
    let rows = recompute_standings(&[m]);
    let ann = row(&rows, "ann");
    assert_eq!(ann.matches_played, 0);
    assert_eq!(ann.points_won, 0);
}

#[test]
fn tied_game_scores_count_for_neither_side() {
    // 7-7 is not a valid squash game; it must not double-count as a loss.
    let t = tid();
    let m = completed(
        pool_match(t, "ann", "ben"),
        &[(11, 5), (7, 7), (11, 3)],
        "ann",
        10,
    );
    let rows = recompute_standings(&[m]);
    let ann = row(&rows, "ann");
    let ben = row(&rows, "ben");
    assert_eq!(ann.games_won, 2);
    assert_eq!(ann.games_lost, 0);
    assert_eq!(ben.games_won, 0);
    assert_eq!(ben.games_lost, 2);
    // the tied game's points still count
    assert_eq!(ann.points_won, 29);
    assert_eq!(ann.points_lost, 15);
}

#[test]
fn last_played_at_takes_the_latest_completion() {
    let t = tid();
    let matches = vec![
        completed(pool_match(t, "ann", "ben"), &[(11, 1), (11, 2)], "ann", 9),
        completed(pool_match(t, "ann", "cam"), &[(11, 1), (11, 2)], "ann", 15),
    ];
    let rows = recompute_standings(&matches);
    assert_eq!(
        row(&rows, "ann").last_played_at,
        Some(Utc.with_ymd_and_hms(2026, 8, 1, 15, 0, 0).unwrap())
    );
    assert_eq!(
        row(&rows, "ben").last_played_at,
        Some(Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap())
    );
}

#[test]
fn display_sort_uses_wins_then_points_diff() {
    let t = tid();
    let matches = vec![
        completed(pool_match(t, "ann", "ben"), &[(11, 1), (11, 2)], "ann", 9),
        completed(pool_match(t, "cam", "dee"), &[(11, 9), (11, 9)], "cam", 10),
    ];
    let mut rows = recompute_standings(&matches);
    sort_for_display(&mut rows);
    // ann and cam both have one win; ann's +19 beats cam's +4
    let logins: Vec<&str> = rows.iter().map(|r| r.login.as_str()).collect();
    assert_eq!(logins[0], "ann");
    assert_eq!(logins[1], "cam");
}
