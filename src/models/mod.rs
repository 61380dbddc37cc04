//! Data structures for the squash tracker: users, tournaments, matches, standings.

mod audit;
mod game;
mod standings;
mod tournament;
mod user;

pub use audit::{AuditAction, AuditEntry, AuditTarget};
pub use game::{GameScore, Match, MatchId, MatchStatus, Side};
pub use standings::PoolStandings;
pub use tournament::{
    ScoringRules, Tournament, TournamentError, TournamentId, TournamentStatus, TournamentType,
};
pub use user::{User, UserRole};
