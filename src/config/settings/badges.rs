//! Badge catalog settings

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::badges::{BadgeCode, BadgeDefinition, ConditionKind, Difficulty};
use crate::domain::{RegionResolver, SuffixRegionResolver};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeSettings {
    /// Regions that never get generated regional badges
    #[serde(default)]
    pub excluded_regions: Vec<String>,

    #[serde(default)]
    pub region_tiers: RegionTiers,

    /// Days after joining during which uploads count toward the early adopter badge
    #[serde(default = "default_early_adopter_window_days")]
    pub early_adopter_window_days: u32,

    /// Additional rule-table badges
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom: Vec<CustomBadge>,
}

fn default_early_adopter_window_days() -> u32 {
    7
}

impl Default for BadgeSettings {
    fn default() -> Self {
        Self {
            excluded_regions: Vec::new(),
            region_tiers: RegionTiers::default(),
            early_adopter_window_days: default_early_adopter_window_days(),
            custom: Vec::new(),
        }
    }
}

impl BadgeSettings {
    /// Entries and `region` are both compared as canonical keys, so
    /// "서울특별시" in the list excludes the 서울 region.
    pub fn is_region_excluded(&self, region: &str) -> bool {
        let Some(region) = SuffixRegionResolver.resolve(region) else {
            return false;
        };
        self.excluded_regions
            .iter()
            .any(|r| SuffixRegionResolver.resolve(r).as_ref() == Some(&region))
    }
}

/// Post thresholds for the three generated badges of every region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionTiers {
    #[serde(default = "default_scout")]
    pub scout: u64,
    #[serde(default = "default_ambassador")]
    pub ambassador: u64,
    #[serde(default = "default_honorary_citizen")]
    pub honorary_citizen: u64,
}

fn default_scout() -> u64 {
    5
}

fn default_ambassador() -> u64 {
    10
}

fn default_honorary_citizen() -> u64 {
    20
}

impl Default for RegionTiers {
    fn default() -> Self {
        Self {
            scout: default_scout(),
            ambassador: default_ambassador(),
            honorary_citizen: default_honorary_citizen(),
        }
    }
}

/// A badge defined in config.toml:
///
/// ```toml
/// [[badges.custom]]
/// code = "food_master"
/// name = "미식 마스터"
/// icon = "🍱"
/// difficulty = "high"
/// description = "30개 이상의 맛집을 소개했습니다!"
/// condition = { kind = "category_posts_at_least", category = "food", target = 30 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomBadge {
    pub code: String,
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: Difficulty,
    pub condition: ConditionKind,
}

fn default_icon() -> String {
    "🏅".to_string()
}

impl CustomBadge {
    pub fn to_definition(&self) -> BadgeDefinition {
        BadgeDefinition {
            code: BadgeCode::new(format!("custom:{}", self.code.trim())),
            name: Cow::Owned(self.name.clone()),
            icon: Cow::Owned(self.icon.clone()),
            description: Cow::Owned(self.description.clone()),
            difficulty: self.difficulty,
            condition: self.condition.clone(),
        }
    }
}
