//! Squash tournament tracker: library with models, engine, storage, and service.

pub mod logic;
pub mod models;
pub mod service;
pub mod storage;

pub use logic::{
    apply_score, evaluate_match, games_needed_to_win, generate_schedule, partition_pools,
    pool_label, recompute_standings, sort_for_display, GeneratedSchedule, MatchEvaluation,
    ScoreUpdate,
};
pub use models::{
    AuditAction, AuditEntry, AuditTarget, GameScore, Match, MatchId, MatchStatus, PoolStandings,
    ScoringRules, Side, Tournament, TournamentError, TournamentId, TournamentStatus,
    TournamentType, User, UserRole,
};
pub use service::{NewTournament, ServiceError, TournamentService};
pub use storage::{store_from_env, JsonFileStore, MemoryStore, StorageError, Store};
