//! Match score updates: winner detection plus standings recomputation.

use crate::logic::scoring::{evaluate_match, games_needed_to_win};
use crate::logic::standings::recompute_standings;
use crate::models::{
    GameScore, Match, MatchStatus, PoolStandings, ScoringRules, TournamentError,
};
use chrono::{DateTime, Utc};

/// Result of applying a score update: the rewritten match and, when it belongs
/// to a pool, that pool's full replacement standings. The two must be
/// persisted together (one commit) so no reader sees a completed match whose
/// standings don't reflect it.
#[derive(Clone, Debug)]
pub struct ScoreUpdate {
    pub updated: Match,
    pub standings: Option<Vec<PoolStandings>>,
}

/// Apply a new score list to a match under the tournament's rules.
///
/// If the evaluator finds a winner the match completes: status, winner login,
/// and `completed_at` (the caller-supplied `now`) are set as one unit.
/// Otherwise the match is IN_PROGRESS with winner and timestamp unset. The
/// `pool_matches` slice is the pool's current full match set; the stale copy
/// of this match inside it is replaced before recomputation.
///
/// A score list that gives *both* players enough games to win is a data-entry
/// error and is rejected before anything is written.
pub fn apply_score(
    m: &Match,
    new_scores: Vec<GameScore>,
    rules: &ScoringRules,
    pool_matches: &[Match],
    now: DateTime<Utc>,
) -> Result<ScoreUpdate, TournamentError> {
    let evaluation = evaluate_match(&new_scores, rules);
    let needed = games_needed_to_win(rules);
    if evaluation.games_won_by_a >= needed && evaluation.games_won_by_b >= needed {
        return Err(TournamentError::AmbiguousScores);
    }

    let mut updated = m.clone();
    updated.scores = new_scores;
    match evaluation.winner {
        Some(side) => {
            updated.status = MatchStatus::Completed;
            updated.winner_login = Some(updated.login_for(side).to_string());
            updated.completed_at = Some(now);
        }
        None => {
            updated.status = MatchStatus::InProgress;
            updated.winner_login = None;
            updated.completed_at = None;
        }
    }

    let standings = updated.pool_id.as_ref().map(|_| {
        let mut refreshed: Vec<Match> = pool_matches
            .iter()
            .map(|pm| {
                if pm.id == updated.id {
                    updated.clone()
                } else {
                    pm.clone()
                }
            })
            .collect();
        if !refreshed.iter().any(|pm| pm.id == updated.id) {
            refreshed.push(updated.clone());
        }
        recompute_standings(&refreshed)
    });

    Ok(ScoreUpdate { updated, standings })
}
