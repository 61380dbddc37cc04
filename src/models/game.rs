//! Match, GameScore, and MatchStatus for 1v1 squash matches.

use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Which side of a match a player occupies.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

/// Points scored by each side within a single game of a match.
///
/// Scores are signed: user-entered data may be nonsensical (negative, absurd)
/// and must flow through as an unresolved game rather than be rejected at the
/// deserialization boundary.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameScore {
    pub player_a_score: i32,
    pub player_b_score: i32,
}

impl GameScore {
    pub fn new(player_a_score: i32, player_b_score: i32) -> Self {
        Self {
            player_a_score,
            player_b_score,
        }
    }
}

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
}

/// A single match between two players.
///
/// Round-robin matches carry a `pool_id`; elimination matches carry a `round`.
/// Invariant: `winner_login` is set exactly when `status` is `Completed`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    /// Pool label ("Pool A", ...) when part of a round robin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_id: Option<String>,
    /// Bracket round number when part of an elimination draw.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
    pub player_a_login: String,
    pub player_b_login: String,
    /// Per-game scores in the order the games were played.
    pub scores: Vec<GameScore>,
    pub status: MatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner_login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Match {
    /// New scheduled round-robin match within a pool.
    pub fn new_pool(
        tournament_id: TournamentId,
        pool_id: impl Into<String>,
        player_a_login: impl Into<String>,
        player_b_login: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            pool_id: Some(pool_id.into()),
            round: None,
            player_a_login: player_a_login.into(),
            player_b_login: player_b_login.into(),
            scores: Vec::new(),
            status: MatchStatus::Scheduled,
            winner_login: None,
            completed_at: None,
        }
    }

    /// New scheduled elimination match in the given round.
    pub fn new_elimination(
        tournament_id: TournamentId,
        round: u32,
        player_a_login: impl Into<String>,
        player_b_login: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            pool_id: None,
            round: Some(round),
            player_a_login: player_a_login.into(),
            player_b_login: player_b_login.into(),
            scores: Vec::new(),
            status: MatchStatus::Scheduled,
            winner_login: None,
            completed_at: None,
        }
    }

    /// The login on the given side.
    pub fn login_for(&self, side: Side) -> &str {
        match side {
            Side::A => &self.player_a_login,
            Side::B => &self.player_b_login,
        }
    }

    /// Whether the given login plays in this match.
    pub fn involves(&self, login: &str) -> bool {
        self.player_a_login == login || self.player_b_login == login
    }
}
