//! Gamification events and the in-process notification bus

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

use super::definitions::{BadgeCode, Difficulty};
use crate::levels::LevelUp;
use crate::store::{EarnedBadge, TitleRecord};

/// Payload shown when a badge is earned
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeNotification {
    pub code: BadgeCode,
    pub name: String,
    pub icon: String,
    pub difficulty: Difficulty,
    pub description: String,
    pub earned_at: DateTime<Utc>,
}

impl From<&EarnedBadge> for BadgeNotification {
    fn from(badge: &EarnedBadge) -> Self {
        Self {
            code: badge.code.clone(),
            name: badge.name.clone(),
            icon: badge.icon.clone(),
            difficulty: badge.difficulty,
            description: badge.description.clone(),
            earned_at: badge.earned_at,
        }
    }
}

/// Events that can happen during gamification checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GamificationEvent {
    BadgeEarned(BadgeNotification),
    XpAwarded { amount: u32, reason: String },
    LevelUp(LevelUp),
    DailyTitleEarned(TitleRecord),
}

pub type EventReceiver = broadcast::Receiver<GamificationEvent>;

/// Broadcast bus for gamification events.
///
/// Publishing never blocks and never fails the caller: with no subscribers
/// the event is dropped, and slow subscribers observe `Lagged`.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<GamificationEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: GamificationEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("No event subscribers");
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
