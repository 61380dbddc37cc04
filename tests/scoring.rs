//! Integration tests for the scoring rules evaluator.

use squash_tournament_web::{evaluate_match, games_needed_to_win, GameScore, ScoringRules, Side};

fn rules(points_per_game: i32, best_of: u8, must_win_by_two: bool) -> ScoringRules {
    ScoringRules {
        points_per_game,
        best_of,
        must_win_by_two,
    }
}

fn scores(pairs: &[(i32, i32)]) -> Vec<GameScore> {
    pairs.iter().map(|&(a, b)| GameScore::new(a, b)).collect()
}

#[test]
fn games_needed_is_majority_of_best_of() {
    assert_eq!(games_needed_to_win(&rules(11, 3, true)), 2);
    assert_eq!(games_needed_to_win(&rules(11, 5, true)), 3);
}

#[test]
fn straight_games_win_best_of_3() {
    let eval = evaluate_match(&scores(&[(11, 5), (11, 7)]), &rules(11, 3, true));
    assert_eq!(eval.games_won_by_a, 2);
    assert_eq!(eval.games_won_by_b, 0);
    assert_eq!(eval.winner, Some(Side::A));
}

#[test]
fn three_game_match_with_dropped_game() {
    // 11-5, 9-11, 11-7: A takes the match two games to one.
    let eval = evaluate_match(&scores(&[(11, 5), (9, 11), (11, 7)]), &rules(11, 3, true));
    assert_eq!(eval.games_won_by_a, 2);
    assert_eq!(eval.games_won_by_b, 1);
    assert_eq!(eval.winner, Some(Side::A));
}

#[test]
fn win_by_two_resolves_12_10() {
    // 12 >= 11 and the margin is exactly 2: the game is A's.
    let eval = evaluate_match(&scores(&[(12, 10)]), &rules(11, 3, true));
    assert_eq!(eval.games_won_by_a, 1);
    assert_eq!(eval.games_won_by_b, 0);
    assert_eq!(eval.winner, None);
}

#[test]
fn win_by_two_leaves_11_10_unresolved() {
    let eval = evaluate_match(&scores(&[(11, 10)]), &rules(11, 3, true));
    assert_eq!(eval.games_won_by_a, 0);
    assert_eq!(eval.games_won_by_b, 0);
    assert_eq!(eval.winner, None);
}

#[test]
fn single_point_margin_suffices_without_win_by_two() {
    let eval = evaluate_match(&scores(&[(11, 10)]), &rules(11, 3, false));
    assert_eq!(eval.games_won_by_a, 1);
}

#[test]
fn in_progress_game_counts_for_nobody() {
    let eval = evaluate_match(&scores(&[(11, 2), (5, 3)]), &rules(11, 3, true));
    assert_eq!(eval.games_won_by_a, 1);
    assert_eq!(eval.games_won_by_b, 0);
    assert_eq!(eval.winner, None);
}

#[test]
fn negative_scores_fall_through_as_unresolved() {
    let eval = evaluate_match(&scores(&[(-5, -7), (-1, 3)]), &rules(11, 3, true));
    assert_eq!(eval.games_won_by_a, 0);
    assert_eq!(eval.games_won_by_b, 0);
    assert_eq!(eval.winner, None);
}

#[test]
fn best_of_5_needs_three_games() {
    let r = rules(11, 5, true);
    let two_games = evaluate_match(&scores(&[(11, 1), (11, 2)]), &r);
    assert_eq!(two_games.winner, None);

    let three_games = evaluate_match(&scores(&[(11, 1), (11, 2), (1, 11), (11, 3)]), &r);
    assert_eq!(three_games.games_won_by_a, 3);
    assert_eq!(three_games.games_won_by_b, 1);
    assert_eq!(three_games.winner, Some(Side::A));
}

#[test]
fn side_b_wins_symmetrically() {
    let eval = evaluate_match(&scores(&[(5, 11), (7, 11)]), &rules(11, 3, true));
    assert_eq!(eval.games_won_by_b, 2);
    assert_eq!(eval.winner, Some(Side::B));
}

#[test]
fn pathological_double_winner_prefers_side_a() {
    // Four games entered in a best-of-3: both sides tally two wins. The
    // evaluator stays total and sides with A; persistence rejects this input.
    let eval = evaluate_match(
        &scores(&[(11, 0), (11, 0), (0, 11), (0, 11)]),
        &rules(11, 3, true),
    );
    assert_eq!(eval.games_won_by_a, 2);
    assert_eq!(eval.games_won_by_b, 2);
    assert_eq!(eval.winner, Some(Side::A));
}
