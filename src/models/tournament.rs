//! Tournament, ScoringRules, and TournamentError.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Scoring rules need at least 1 point per game.
    PointsPerGameTooLow,
    /// Matches are best of 3 or best of 5, nothing else.
    UnsupportedBestOf(u8),
    /// Round-robin pools need at least 3 players.
    PoolSizeTooSmall(u32),
    /// Operation requires the tournament to still be in Draft.
    NotDraft,
    /// Score entry where both players reach the winning-games threshold.
    AmbiguousScores,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::PointsPerGameTooLow => {
                write!(f, "Points per game must be at least 1")
            }
            TournamentError::UnsupportedBestOf(n) => {
                write!(f, "Matches must be best of 3 or 5 (got {})", n)
            }
            TournamentError::PoolSizeTooSmall(n) => {
                write!(f, "Pool size must be at least 3 (got {})", n)
            }
            TournamentError::NotDraft => write!(f, "Tournament schedule is already generated"),
            TournamentError::AmbiguousScores => {
                write!(f, "Scores give both players a winning game count")
            }
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Competition format.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentType {
    /// Participants split into pools, complete round robin within each.
    #[default]
    RoundRobin,
    /// Naive sequential pairing, first round only.
    SingleElimination,
}

/// Lifecycle of a tournament. The core never auto-completes a tournament;
/// Completed is an external decision.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum TournamentStatus {
    #[default]
    Draft,
    Active,
    Completed,
}

/// How games and matches are won. Immutable once attached to a tournament.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub points_per_game: i32,
    pub best_of: u8,
    pub must_win_by_two: bool,
}

impl ScoringRules {
    /// Validate at the tournament-creation boundary; the evaluator assumes
    /// rules it receives are valid.
    pub fn validate(&self) -> Result<(), TournamentError> {
        if self.points_per_game < 1 {
            return Err(TournamentError::PointsPerGameTooLow);
        }
        if self.best_of != 3 && self.best_of != 5 {
            return Err(TournamentError::UnsupportedBestOf(self.best_of));
        }
        Ok(())
    }
}

impl Default for ScoringRules {
    /// Standard squash scoring: point-a-rally to 11, best of 3, win by two.
    fn default() -> Self {
        Self {
            points_per_game: 11,
            best_of: 3,
            must_win_by_two: true,
        }
    }
}

/// A tournament: format, rules, and participant roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TournamentType,
    pub status: TournamentStatus,
    /// Players per pool; only meaningful for round robin.
    pub pool_size: u32,
    pub rules: ScoringRules,
    /// Participant logins, deduplicated, in join order.
    pub participants: Vec<String>,
    pub admin_login: String,
}

impl Tournament {
    /// Create a tournament in Draft. Rules and pool size are validated here,
    /// once; the creator is the admin and the first participant.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        start_date: NaiveDate,
        kind: TournamentType,
        pool_size: u32,
        rules: ScoringRules,
        admin_login: impl Into<String>,
    ) -> Result<Self, TournamentError> {
        rules.validate()?;
        if kind == TournamentType::RoundRobin && pool_size < 3 {
            return Err(TournamentError::PoolSizeTooSmall(pool_size));
        }
        let admin_login = admin_login.into();
        Ok(Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            start_date,
            kind,
            status: TournamentStatus::Draft,
            pool_size,
            rules,
            participants: vec![admin_login.clone()],
            admin_login,
        })
    }

    /// Add a participant (Draft only). Adding an existing participant is a no-op.
    pub fn add_participant(&mut self, login: impl Into<String>) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Draft {
            return Err(TournamentError::NotDraft);
        }
        let login = login.into();
        if !self.participants.iter().any(|p| *p == login) {
            self.participants.push(login);
        }
        Ok(())
    }

    pub fn is_participant(&self, login: &str) -> bool {
        self.participants.iter().any(|p| p == login)
    }
}
