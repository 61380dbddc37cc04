//! Service layer: validation, authorization, audit, and atomic commits.
//!
//! Every mutating operation takes the acting user as an explicit parameter;
//! there is no ambient current-user state. The engine functions in
//! [`crate::logic`] stay pure; this layer loads their inputs from the store
//! and commits their outputs.

use crate::logic::{apply_score, generate_schedule, sort_for_display};
use crate::models::{
    AuditAction, AuditEntry, AuditTarget, GameScore, Match, MatchId, PoolStandings, ScoringRules,
    Tournament, TournamentError, TournamentId, TournamentType, User, UserRole,
};
use crate::storage::{StorageError, Store};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

/// Errors surfaced to the API layer.
#[derive(Debug)]
pub enum ServiceError {
    /// Login is empty or already taken.
    InvalidLogin,
    UserExists,
    UserNotFound,
    TournamentNotFound,
    MatchNotFound,
    /// Acting user may not perform this operation.
    NotAuthorized,
    /// Domain rule violation (invalid rules, non-Draft schedule, bad scores).
    Domain(TournamentError),
    Storage(StorageError),
    Csv(csv::Error),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::InvalidLogin => write!(f, "Login must be non-empty and unique"),
            ServiceError::UserExists => write!(f, "User already exists"),
            ServiceError::UserNotFound => write!(f, "User not found"),
            ServiceError::TournamentNotFound => write!(f, "Tournament not found"),
            ServiceError::MatchNotFound => write!(f, "Match not found"),
            ServiceError::NotAuthorized => write!(f, "Not authorized"),
            ServiceError::Domain(e) => write!(f, "{}", e),
            ServiceError::Storage(e) => write!(f, "{}", e),
            ServiceError::Csv(e) => write!(f, "CSV export failed: {}", e),
        }
    }
}

impl From<TournamentError> for ServiceError {
    fn from(e: TournamentError) -> Self {
        ServiceError::Domain(e)
    }
}

impl From<StorageError> for ServiceError {
    fn from(e: StorageError) -> Self {
        ServiceError::Storage(e)
    }
}

impl From<csv::Error> for ServiceError {
    fn from(e: csv::Error) -> Self {
        ServiceError::Csv(e)
    }
}

/// Request body for creating a tournament.
#[derive(Clone, Debug, Deserialize)]
pub struct NewTournament {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TournamentType,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    pub rules: ScoringRules,
}

fn default_pool_size() -> u32 {
    4
}

/// The tracker behind the HTTP layer: one store, all operations.
pub struct TournamentService {
    store: Box<dyn Store>,
}

impl TournamentService {
    pub fn new(store: Box<dyn Store>) -> Self {
        Self { store }
    }

    // --- Users ---

    /// Register a new user (role Player). Logins are unique and non-empty.
    pub fn register_user(
        &mut self,
        login: &str,
        display_name: &str,
    ) -> Result<User, ServiceError> {
        let login = login.trim();
        if login.is_empty() {
            return Err(ServiceError::InvalidLogin);
        }
        if self.store.find_user(login).is_some() {
            return Err(ServiceError::UserExists);
        }
        let display_name = display_name.trim();
        let display_name = if display_name.is_empty() {
            login
        } else {
            display_name
        };
        let user = User::new(login, display_name, UserRole::Player);
        self.store.save_user(user.clone())?;
        log::info!("Registered user {}", user.login);
        Ok(user)
    }

    pub fn find_user(&self, login: &str) -> Option<User> {
        self.store.find_user(login)
    }

    pub fn users(&self) -> Vec<User> {
        self.store.users()
    }

    /// Update a profile. Users edit themselves; Admin-role users edit anyone.
    /// Role and creation time always come from the stored record.
    pub fn update_profile(&mut self, updated: User, actor: &User) -> Result<User, ServiceError> {
        if actor.login != updated.login && !actor.is_admin() {
            return Err(ServiceError::NotAuthorized);
        }
        let existing = self
            .store
            .find_user(&updated.login)
            .ok_or(ServiceError::UserNotFound)?;
        let user = User {
            role: existing.role,
            created_at: existing.created_at,
            ..updated
        };
        self.store.save_user(user.clone())?;
        self.audit(
            &actor.login,
            AuditAction::Update,
            AuditTarget::User,
            &user.login,
            format!("Updated profile for {}", user.display_name),
        )?;
        Ok(user)
    }

    /// Seed the demo roster when the store is empty (first run).
    pub fn seed_demo_users(&mut self) -> Result<(), ServiceError> {
        if !self.store.users().is_empty() {
            return Ok(());
        }
        let seed = [
            ("admin", "AdminUser", UserRole::Admin, "City Club", 1200),
            ("jdoe", "John Doe", UserRole::Player, "City Club", 1150),
            ("asmith", "Alice Smith", UserRole::Player, "Westside", 1300),
            ("bwayne", "Bruce Wayne", UserRole::Player, "Gotham", 1500),
            ("ckent", "Clark Kent", UserRole::Player, "Metropolis", 1450),
            ("dprince", "Diana Prince", UserRole::Player, "Themyscira", 1600),
        ];
        for (login, name, role, club, ranking) in seed {
            let mut user = User::new(login, name, role);
            user.club = Some(club.to_string());
            user.ranking = Some(ranking);
            self.store.save_user(user)?;
        }
        log::info!("Seeded demo users");
        Ok(())
    }

    // --- Tournaments ---

    /// Create a tournament in Draft. Rules are validated here, once; the
    /// creator becomes admin and first participant.
    pub fn create_tournament(
        &mut self,
        req: NewTournament,
        actor: &User,
    ) -> Result<Tournament, ServiceError> {
        let tournament = Tournament::new(
            req.title,
            req.description,
            req.start_date,
            req.kind,
            req.pool_size,
            req.rules,
            actor.login.clone(),
        )?;
        self.store.save_tournament(tournament.clone())?;
        self.audit(
            &actor.login,
            AuditAction::Create,
            AuditTarget::Tournament,
            tournament.id.to_string(),
            format!("Created tournament {}", tournament.title),
        )?;
        Ok(tournament)
    }

    /// All tournaments, most recent start date first.
    pub fn tournaments(&self) -> Vec<Tournament> {
        let mut all = self.store.tournaments();
        all.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        all
    }

    pub fn tournament(&self, id: TournamentId) -> Option<Tournament> {
        self.store.find_tournament(id)
    }

    /// Join a Draft tournament. Joining twice is a no-op.
    pub fn join_tournament(
        &mut self,
        id: TournamentId,
        actor: &User,
    ) -> Result<Tournament, ServiceError> {
        let mut tournament = self
            .store
            .find_tournament(id)
            .ok_or(ServiceError::TournamentNotFound)?;
        tournament.add_participant(actor.login.clone())?;
        self.store.save_tournament(tournament.clone())?;
        self.audit(
            &actor.login,
            AuditAction::Update,
            AuditTarget::Tournament,
            id.to_string(),
            "Joined tournament",
        )?;
        Ok(tournament)
    }

    // --- Scheduling ---

    /// Generate the schedule and activate the tournament. Tournament admin
    /// (or an Admin-role user) only; refuses non-Draft tournaments.
    pub fn generate_schedule(
        &mut self,
        id: TournamentId,
        actor: &User,
    ) -> Result<Vec<Match>, ServiceError> {
        let mut tournament = self
            .store
            .find_tournament(id)
            .ok_or(ServiceError::TournamentNotFound)?;
        if actor.login != tournament.admin_login && !actor.is_admin() {
            return Err(ServiceError::NotAuthorized);
        }
        let existing = self.store.matches_for_tournament(id);
        let generated = generate_schedule(&mut tournament, &existing)?;
        self.store.commit_schedule(
            tournament,
            generated.matches.clone(),
            generated.standings,
        )?;
        self.audit(
            &actor.login,
            AuditAction::Update,
            AuditTarget::Tournament,
            id.to_string(),
            "Generated schedule",
        )?;
        Ok(generated.matches)
    }

    pub fn matches(&self, tournament_id: TournamentId) -> Vec<Match> {
        self.store.matches_for_tournament(tournament_id)
    }

    // --- Scoring ---

    /// Apply a score update to a match. Permitted for either player, the
    /// tournament admin, or an Admin-role user. The match write and the
    /// pool's standings replacement commit together.
    pub fn update_match(
        &mut self,
        match_id: MatchId,
        scores: Vec<GameScore>,
        actor: &User,
    ) -> Result<Match, ServiceError> {
        let m = self
            .store
            .find_match(match_id)
            .ok_or(ServiceError::MatchNotFound)?;
        let tournament = self
            .store
            .find_tournament(m.tournament_id)
            .ok_or(ServiceError::TournamentNotFound)?;
        if !actor.is_admin()
            && !m.involves(&actor.login)
            && actor.login != tournament.admin_login
        {
            return Err(ServiceError::NotAuthorized);
        }

        let pool_matches = match m.pool_id.as_deref() {
            Some(pool_id) => self.store.pool_matches(m.tournament_id, pool_id),
            None => Vec::new(),
        };
        let update = apply_score(&m, scores, &tournament.rules, &pool_matches, Utc::now())?;
        let updated = update.updated.clone();
        self.store.commit_score_update(update.updated, update.standings)?;
        self.audit(
            &actor.login,
            AuditAction::Update,
            AuditTarget::Match,
            match_id.to_string(),
            format!(
                "Score update: {} vs {}",
                updated.player_a_login, updated.player_b_login
            ),
        )?;
        Ok(updated)
    }

    // --- Standings ---

    /// Standings for a tournament, grouped by pool label and display-sorted
    /// within each pool (match wins desc, points diff desc).
    pub fn standings(&self, tournament_id: TournamentId) -> Vec<PoolStandings> {
        let mut rows = self.store.standings_for_tournament(tournament_id);
        rows.sort_by(|a, b| a.pool_id.cmp(&b.pool_id));
        let mut out: Vec<PoolStandings> = Vec::with_capacity(rows.len());
        let mut i = 0;
        while i < rows.len() {
            let pool_id = rows[i].pool_id.clone();
            let mut j = i;
            while j < rows.len() && rows[j].pool_id == pool_id {
                j += 1;
            }
            let mut pool = rows[i..j].to_vec();
            sort_for_display(&mut pool);
            out.extend(pool);
            i = j;
        }
        out
    }

    /// Standings as CSV, one row per player, pools in label order.
    pub fn standings_csv(&self, tournament_id: TournamentId) -> Result<String, ServiceError> {
        let rows = self.standings(tournament_id);
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([
            "pool", "player", "played", "won", "lost", "games_won", "games_lost", "points_won",
            "points_lost", "points_diff",
        ])?;
        for row in rows {
            writer.write_record([
                row.pool_id.clone(),
                row.login.clone(),
                row.matches_played.to_string(),
                row.matches_won.to_string(),
                row.matches_lost.to_string(),
                row.games_won.to_string(),
                row.games_lost.to_string(),
                row.points_won.to_string(),
                row.points_lost.to_string(),
                row.points_diff.to_string(),
            ])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| ServiceError::Csv(e.into_error().into()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    // --- Audit ---

    pub fn audit_log(&self) -> Vec<AuditEntry> {
        self.store.audit_log()
    }

    fn audit(
        &mut self,
        actor: &str,
        action: AuditAction,
        target: AuditTarget,
        target_id: impl Into<String>,
        details: impl Into<String>,
    ) -> Result<(), ServiceError> {
        self.store
            .append_audit(AuditEntry::new(actor, action, target, target_id, details))?;
        Ok(())
    }
}
