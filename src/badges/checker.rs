//! Badge checking logic
//!
//! Compares a user's stats against the catalog. A badge whose condition
//! cannot be evaluated is logged and treated as not met; the rest of the
//! catalog is still checked.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::catalog::BadgeCatalog;
use super::definitions::{BadgeCode, BadgeDefinition};
use crate::stats::UserStats;

/// Badges whose condition now holds and that are not yet earned, in catalog order
pub fn check_new_badges<'a>(
    catalog: &'a BadgeCatalog,
    stats: &UserStats,
    earned: &HashSet<BadgeCode>,
) -> Vec<&'a BadgeDefinition> {
    catalog
        .iter()
        .filter(|badge| !earned.contains(&badge.code))
        .filter(|badge| match badge.condition.evaluate(stats) {
            Ok(met) => {
                tracing::debug!(code = %badge.code, met, "Evaluated badge");
                met
            }
            Err(e) => {
                tracing::warn!(code = %badge.code, error = %e, "Badge condition failed, treating as not met");
                false
            }
        })
        .collect()
}

/// One catalog badge with the user's standing
#[derive(Debug, Clone, Serialize)]
pub struct BadgeProgress<'a> {
    pub badge: &'a BadgeDefinition,
    pub earned: bool,
    /// Percent toward the target, 0 to 100. Earned badges report 100.
    pub progress: u8,
    pub earned_at: Option<DateTime<Utc>>,
}

/// Standing for every badge in the catalog
pub fn badge_progress<'a>(
    catalog: &'a BadgeCatalog,
    stats: &UserStats,
    earned: &HashMap<BadgeCode, DateTime<Utc>>,
) -> Vec<BadgeProgress<'a>> {
    catalog
        .iter()
        .map(|badge| {
            let earned_at = earned.get(&badge.code).copied();
            let progress = if earned_at.is_some() {
                100
            } else {
                badge.condition.progress(stats).unwrap_or_else(|e| {
                    tracing::warn!(code = %badge.code, error = %e, "Badge progress unavailable");
                    0
                })
            };
            BadgeProgress {
                badge,
                earned: earned_at.is_some(),
                progress,
                earned_at,
            }
        })
        .collect()
}
