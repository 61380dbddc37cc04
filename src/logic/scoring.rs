//! Scoring rules evaluator: per-game winners and match completion.

use crate::models::{GameScore, ScoringRules, Side};

/// Result of evaluating a score list against a tournament's rules.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MatchEvaluation {
    pub games_won_by_a: u32,
    pub games_won_by_b: u32,
    /// Set once a side has the games needed to take the match.
    pub winner: Option<Side>,
}

/// Games a side needs to take the match: 2 for best of 3, 3 for best of 5.
pub fn games_needed_to_win(rules: &ScoringRules) -> u32 {
    u32::from(rules.best_of).div_ceil(2)
}

/// Tally game wins over a (possibly partial) score list and decide the match.
///
/// A game is won by the side that has reached `points_per_game` and leads by
/// the required margin (2 with `must_win_by_two`, otherwise 1). A game where
/// neither side qualifies is unresolved and counts for nobody, so in-progress
/// games can sit in the list without corrupting the tally. Negative or
/// otherwise nonsensical scores simply fail the threshold and land in the
/// same unresolved bucket.
///
/// Pure; safe to call repeatedly for live win-progress display. If a score
/// list pathologically gives both sides enough games, side A's claim wins
/// here; callers that persist results are expected to reject such input
/// instead (see `apply_score`).
pub fn evaluate_match(scores: &[GameScore], rules: &ScoringRules) -> MatchEvaluation {
    let margin: i32 = if rules.must_win_by_two { 2 } else { 1 };
    let mut games_won_by_a = 0;
    let mut games_won_by_b = 0;

    for game in scores {
        let a = game.player_a_score;
        let b = game.player_b_score;
        if a >= rules.points_per_game && a >= b.saturating_add(margin) {
            games_won_by_a += 1;
        } else if b >= rules.points_per_game && b >= a.saturating_add(margin) {
            games_won_by_b += 1;
        }
    }

    let needed = games_needed_to_win(rules);
    let winner = if games_won_by_a >= needed {
        Some(Side::A)
    } else if games_won_by_b >= needed {
        Some(Side::B)
    } else {
        None
    };

    MatchEvaluation {
        games_won_by_a,
        games_won_by_b,
        winner,
    }
}
