//! LiveJourney - travel post gamification
//!
//! LiveJourney turns a user's travel post history into permanent badges,
//! 24-hour daily titles and an XP level. Posts are read from the JSON list
//! kept by the upload screen; everything earned is stored in a local
//! SQLite database.
//!
//! ## Pipeline
//!
//! 1. [`stats::StatsAggregator`] derives [`stats::UserStats`] from the posts.
//! 2. [`badges::BadgeCatalog`] merges static, config-defined and per-region badges.
//! 3. [`badges::BadgeManager`] awards newly met badges exactly once and
//!    publishes [`badges::GamificationEvent`]s.

pub mod badges;
pub mod config;
pub mod domain;
pub mod levels;
pub mod stats;
pub mod store;
pub mod titles;

pub use domain::*;
