//! Persistence: one repository interface, two interchangeable backends.
//!
//! The engine never does I/O itself; it hands the service layer values to
//! commit. The two write units below that pair a match (or schedule) with its
//! standings MUST land together — a reader may never observe a completed
//! match whose pool standings don't reflect it. Both backends here satisfy
//! that trivially: `MemoryStore` mutates everything under one `&mut self`,
//! and `JsonFileStore` writes a whole snapshot per commit.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::models::{AuditEntry, Match, MatchId, PoolStandings, Tournament, TournamentId, User};
use serde::{Deserialize, Serialize};

/// Errors from a storage backend.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Serde(serde_json::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage i/o error: {}", e),
            StorageError::Serde(e) => write!(f, "storage encoding error: {}", e),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serde(e)
    }
}

/// Everything the tracker persists, as one serializable snapshot.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StoreData {
    pub users: Vec<User>,
    pub tournaments: Vec<Tournament>,
    pub matches: Vec<Match>,
    pub standings: Vec<PoolStandings>,
    pub audit: Vec<AuditEntry>,
}

/// Repository interface the service layer talks to. Backends are selected
/// once at process startup and are interchangeable.
pub trait Store: Send + Sync {
    fn users(&self) -> Vec<User>;
    fn find_user(&self, login: &str) -> Option<User>;
    fn save_user(&mut self, user: User) -> Result<(), StorageError>;

    fn tournaments(&self) -> Vec<Tournament>;
    fn find_tournament(&self, id: TournamentId) -> Option<Tournament>;
    fn save_tournament(&mut self, tournament: Tournament) -> Result<(), StorageError>;

    fn matches_for_tournament(&self, tournament_id: TournamentId) -> Vec<Match>;
    fn find_match(&self, id: MatchId) -> Option<Match>;
    /// Full match list for one pool (the standings calculator's input).
    fn pool_matches(&self, tournament_id: TournamentId, pool_id: &str) -> Vec<Match>;

    fn standings_for_tournament(&self, tournament_id: TournamentId) -> Vec<PoolStandings>;

    /// Atomic pair: replace the match and, when present, fully replace its
    /// pool's standings rows in the same commit.
    fn commit_score_update(
        &mut self,
        updated: Match,
        standings: Option<Vec<PoolStandings>>,
    ) -> Result<(), StorageError>;

    /// Atomic triple: the activated tournament, its full replacement match
    /// set, and the freshly materialized standings, in one commit.
    fn commit_schedule(
        &mut self,
        tournament: Tournament,
        matches: Vec<Match>,
        standings: Vec<PoolStandings>,
    ) -> Result<(), StorageError>;

    fn append_audit(&mut self, entry: AuditEntry) -> Result<(), StorageError>;
    fn audit_log(&self) -> Vec<AuditEntry>;
}

/// Pick the backend once at startup: `STORAGE_PATH` set -> JSON file store at
/// that path, otherwise everything stays in memory.
pub fn store_from_env() -> Result<Box<dyn Store>, StorageError> {
    match std::env::var("STORAGE_PATH") {
        Ok(path) if !path.is_empty() => Ok(Box::new(JsonFileStore::open(path)?)),
        _ => Ok(Box::new(MemoryStore::new())),
    }
}
