//! In-memory store: plain collections, no persistence.

use crate::models::{AuditEntry, Match, MatchId, PoolStandings, Tournament, TournamentId, User};
use crate::storage::{StorageError, Store, StoreData};

/// The default backend. Also serves as the data core of [`JsonFileStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: StoreData,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate from a previously serialized snapshot.
    pub fn from_data(data: StoreData) -> Self {
        Self { data }
    }

    /// Current snapshot, for backends that serialize the whole store.
    pub(crate) fn snapshot(&self) -> &StoreData {
        &self.data
    }
}

impl Store for MemoryStore {
    fn users(&self) -> Vec<User> {
        self.data.users.clone()
    }

    fn find_user(&self, login: &str) -> Option<User> {
        self.data.users.iter().find(|u| u.login == login).cloned()
    }

    fn save_user(&mut self, user: User) -> Result<(), StorageError> {
        match self.data.users.iter_mut().find(|u| u.login == user.login) {
            Some(slot) => *slot = user,
            None => self.data.users.push(user),
        }
        Ok(())
    }

    fn tournaments(&self) -> Vec<Tournament> {
        self.data.tournaments.clone()
    }

    fn find_tournament(&self, id: TournamentId) -> Option<Tournament> {
        self.data.tournaments.iter().find(|t| t.id == id).cloned()
    }

    fn save_tournament(&mut self, tournament: Tournament) -> Result<(), StorageError> {
        match self
            .data
            .tournaments
            .iter_mut()
            .find(|t| t.id == tournament.id)
        {
            Some(slot) => *slot = tournament,
            None => self.data.tournaments.push(tournament),
        }
        Ok(())
    }

    fn matches_for_tournament(&self, tournament_id: TournamentId) -> Vec<Match> {
        self.data
            .matches
            .iter()
            .filter(|m| m.tournament_id == tournament_id)
            .cloned()
            .collect()
    }

    fn find_match(&self, id: MatchId) -> Option<Match> {
        self.data.matches.iter().find(|m| m.id == id).cloned()
    }

    fn pool_matches(&self, tournament_id: TournamentId, pool_id: &str) -> Vec<Match> {
        self.data
            .matches
            .iter()
            .filter(|m| m.tournament_id == tournament_id && m.pool_id.as_deref() == Some(pool_id))
            .cloned()
            .collect()
    }

    fn standings_for_tournament(&self, tournament_id: TournamentId) -> Vec<PoolStandings> {
        self.data
            .standings
            .iter()
            .filter(|s| s.tournament_id == tournament_id)
            .cloned()
            .collect()
    }

    fn commit_score_update(
        &mut self,
        updated: Match,
        standings: Option<Vec<PoolStandings>>,
    ) -> Result<(), StorageError> {
        if let (Some(pool_id), Some(rows)) = (updated.pool_id.clone(), standings) {
            self.data.standings.retain(|s| {
                !(s.tournament_id == updated.tournament_id && s.pool_id == pool_id)
            });
            self.data.standings.extend(rows);
        }
        match self.data.matches.iter_mut().find(|m| m.id == updated.id) {
            Some(slot) => *slot = updated,
            None => self.data.matches.push(updated),
        }
        Ok(())
    }

    fn commit_schedule(
        &mut self,
        tournament: Tournament,
        matches: Vec<Match>,
        standings: Vec<PoolStandings>,
    ) -> Result<(), StorageError> {
        let id = tournament.id;
        self.data.matches.retain(|m| m.tournament_id != id);
        self.data.matches.extend(matches);
        self.data.standings.retain(|s| s.tournament_id != id);
        self.data.standings.extend(standings);
        self.save_tournament(tournament)
    }

    fn append_audit(&mut self, entry: AuditEntry) -> Result<(), StorageError> {
        self.data.audit.push(entry);
        Ok(())
    }

    fn audit_log(&self) -> Vec<AuditEntry> {
        self.data.audit.clone()
    }
}
