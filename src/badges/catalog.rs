//! The merged badge catalog: static, config-defined and per-region badges

use std::collections::HashSet;

use super::definitions::{BadgeCode, BadgeDefinition, STATIC_BADGES};
use super::region::RegionBadgeGenerator;
use crate::config::BadgeSettings;
use crate::stats::UserStats;

/// Badges in evaluation order, with unique codes
#[derive(Debug, Clone, Default)]
pub struct BadgeCatalog {
    badges: Vec<BadgeDefinition>,
}

impl BadgeCatalog {
    /// Build the catalog for one user's stats.
    ///
    /// Order: static badges, then custom badges, then region badges in
    /// region discovery order. A code that is already present is skipped.
    pub fn build(stats: &UserStats, settings: &BadgeSettings) -> Self {
        let mut catalog = Self::default();
        let mut seen: HashSet<BadgeCode> = HashSet::new();

        let custom = settings.custom.iter().map(|c| c.to_definition());
        let regional = RegionBadgeGenerator::new(settings).generate(stats);

        for badge in STATIC_BADGES.iter().cloned().chain(custom).chain(regional) {
            if !seen.insert(badge.code.clone()) {
                tracing::warn!(code = %badge.code, name = %badge.name, "Skipping duplicate badge code");
                continue;
            }
            catalog.badges.push(badge);
        }

        catalog
    }

    pub fn iter(&self) -> impl Iterator<Item = &BadgeDefinition> {
        self.badges.iter()
    }

    pub fn get(&self, code: &str) -> Option<&BadgeDefinition> {
        self.badges.iter().find(|b| b.code.as_str() == code)
    }

    pub fn len(&self) -> usize {
        self.badges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }
}
