//! Derived per-player pool standings.

use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One standings row per (tournament, pool, player). Entirely derived from the
/// pool's completed matches; never edited in place, always replaced wholesale
/// for the pool when recomputed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PoolStandings {
    pub login: String,
    pub tournament_id: TournamentId,
    pub pool_id: String,
    pub matches_played: u32,
    pub matches_won: u32,
    pub matches_lost: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub points_won: i32,
    pub points_lost: i32,
    /// Always `points_won - points_lost`, never tracked independently.
    pub points_diff: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_played_at: Option<DateTime<Utc>>,
}

impl PoolStandings {
    /// All-zero row for a player with no completed matches yet.
    pub fn zero(
        tournament_id: TournamentId,
        pool_id: impl Into<String>,
        login: impl Into<String>,
    ) -> Self {
        Self {
            login: login.into(),
            tournament_id,
            pool_id: pool_id.into(),
            matches_played: 0,
            matches_won: 0,
            matches_lost: 0,
            games_won: 0,
            games_lost: 0,
            points_won: 0,
            points_lost: 0,
            points_diff: 0,
            last_played_at: None,
        }
    }
}
