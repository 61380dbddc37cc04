//! JSON file store: a memory store that snapshots to disk on every commit.

use crate::models::{AuditEntry, Match, MatchId, PoolStandings, Tournament, TournamentId, User};
use crate::storage::{MemoryStore, StorageError, Store, StoreData};
use std::fs;
use std::path::{Path, PathBuf};

/// Persists the whole store as one JSON document. Each commit serializes to a
/// sibling temp file and renames it over the target, so a crash mid-write
/// leaves the previous snapshot intact and the match/standings pair can never
/// be observed half-written.
#[derive(Debug)]
pub struct JsonFileStore {
    inner: MemoryStore,
    path: PathBuf,
}

impl JsonFileStore {
    /// Open (or create) the store at `path`. A missing file starts empty;
    /// a present one is loaded in full.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let inner = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            MemoryStore::from_data(serde_json::from_str(&raw)?)
        } else {
            MemoryStore::new()
        };
        Ok(Self { inner, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StorageError> {
        let encoded = serde_json::to_string_pretty(self.inner.snapshot())?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, encoded)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl Store for JsonFileStore {
    fn users(&self) -> Vec<User> {
        self.inner.users()
    }

    fn find_user(&self, login: &str) -> Option<User> {
        self.inner.find_user(login)
    }

    fn save_user(&mut self, user: User) -> Result<(), StorageError> {
        self.inner.save_user(user)?;
        self.persist()
    }

    fn tournaments(&self) -> Vec<Tournament> {
        self.inner.tournaments()
    }

    fn find_tournament(&self, id: TournamentId) -> Option<Tournament> {
        self.inner.find_tournament(id)
    }

    fn save_tournament(&mut self, tournament: Tournament) -> Result<(), StorageError> {
        self.inner.save_tournament(tournament)?;
        self.persist()
    }

    fn matches_for_tournament(&self, tournament_id: TournamentId) -> Vec<Match> {
        self.inner.matches_for_tournament(tournament_id)
    }

    fn find_match(&self, id: MatchId) -> Option<Match> {
        self.inner.find_match(id)
    }

    fn pool_matches(&self, tournament_id: TournamentId, pool_id: &str) -> Vec<Match> {
        self.inner.pool_matches(tournament_id, pool_id)
    }

    fn standings_for_tournament(&self, tournament_id: TournamentId) -> Vec<PoolStandings> {
        self.inner.standings_for_tournament(tournament_id)
    }

    fn commit_score_update(
        &mut self,
        updated: Match,
        standings: Option<Vec<PoolStandings>>,
    ) -> Result<(), StorageError> {
        self.inner.commit_score_update(updated, standings)?;
        self.persist()
    }

    fn commit_schedule(
        &mut self,
        tournament: Tournament,
        matches: Vec<Match>,
        standings: Vec<PoolStandings>,
    ) -> Result<(), StorageError> {
        self.inner.commit_schedule(tournament, matches, standings)?;
        self.persist()
    }

    fn append_audit(&mut self, entry: AuditEntry) -> Result<(), StorageError> {
        self.inner.append_audit(entry)?;
        self.persist()
    }

    fn audit_log(&self) -> Vec<AuditEntry> {
        self.inner.audit_log()
    }
}
