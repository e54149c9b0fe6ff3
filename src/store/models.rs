//! Records persisted in the gamification database

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::badges::{BadgeCode, BadgeDefinition, Difficulty};

/// A badge a user has earned. Never mutated or deleted once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EarnedBadge {
    pub user_id: String,
    pub code: BadgeCode,
    pub name: String,
    pub icon: String,
    pub difficulty: Difficulty,
    pub description: String,
    pub earned_at: DateTime<Utc>,
}

impl EarnedBadge {
    pub fn new(user_id: &str, badge: &BadgeDefinition, earned_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            code: badge.code.clone(),
            name: badge.name.to_string(),
            icon: badge.icon.to_string(),
            difficulty: badge.difficulty,
            description: badge.description.to_string(),
            earned_at,
        }
    }
}

/// A daily title held by a user for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleRecord {
    pub user_id: String,
    /// Calendar day the title was earned on ("YYYY-MM-DD")
    pub day: String,
    pub code: String,
    pub name: String,
    pub icon: String,
    pub category: String,
    pub description: String,
    pub earned_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl TitleRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Timestamps are stored as Unix milliseconds
pub(crate) fn to_millis(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

pub(crate) fn from_millis(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}
