//! Audit log entries recorded on every mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditTarget {
    Match,
    Tournament,
    User,
}

/// Who did what to which record.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub actor_login: String,
    pub action: AuditAction,
    pub target: AuditTarget,
    pub target_id: String,
    pub details: String,
}

impl AuditEntry {
    pub fn new(
        actor_login: impl Into<String>,
        action: AuditAction,
        target: AuditTarget,
        target_id: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_login: actor_login.into(),
            action,
            target,
            target_id: target_id.into(),
            details: details.into(),
        }
    }
}
