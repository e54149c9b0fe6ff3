//! Badge system: permanent achievements earned from post history
//!
//! - Static badges for post counts, likes, regions, categories and streaks
//! - Region badges generated per observed region in three tiers
//! - Config-defined badges from `[[badges.custom]]`
//! - XP rewards and notifications through [`EventBus`]

mod catalog;
mod checker;
mod condition;
mod definitions;
mod events;
mod manager;
mod region;

pub use catalog::BadgeCatalog;
pub use checker::{badge_progress, check_new_badges, BadgeProgress};
pub use condition::{ConditionError, ConditionKind, Dimension};
pub use definitions::{BadgeCode, BadgeDefinition, Difficulty, STATIC_BADGES};
pub use events::{BadgeNotification, EventBus, EventReceiver, GamificationEvent};
pub use manager::{AwardOutcome, BadgeError, BadgeManager, BadgeOverview};
pub use region::{region_badge_code, RegionBadgeGenerator, RegionTier};
