//! User accounts: players and admins, keyed by login.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a user may do. Admins can edit any match score.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    Player,
    Admin,
}

/// A registered user. The login doubles as the identifier everywhere
/// (participants, match sides, standings rows).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking: Option<i32>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the given login and display name.
    pub fn new(login: impl Into<String>, display_name: impl Into<String>, role: UserRole) -> Self {
        Self {
            login: login.into(),
            display_name: display_name.into(),
            full_name: None,
            club: None,
            ranking: None,
            role,
            created_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
