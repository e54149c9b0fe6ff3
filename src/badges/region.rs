//! Per-region badge generation
//!
//! Every region the user has posted in gets three tiered badges. Rules are
//! keyed by [`RegionKey`], so "서울특별시" and "서울" share one set.

use std::borrow::Cow;

use super::condition::ConditionKind;
use super::definitions::{BadgeCode, BadgeDefinition, Difficulty};
use crate::config::{BadgeSettings, RegionTiers};
use crate::domain::RegionKey;
use crate::stats::UserStats;

/// Tier of a generated region badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionTier {
    Scout,
    Ambassador,
    HonoraryCitizen,
}

impl RegionTier {
    pub fn all() -> &'static [RegionTier] {
        &[Self::Scout, Self::Ambassador, Self::HonoraryCitizen]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scout => "scout",
            Self::Ambassador => "ambassador",
            Self::HonoraryCitizen => "honorary_citizen",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::Scout => "스카우터",
            Self::Ambassador => "홍보대사",
            Self::HonoraryCitizen => "명예시민",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Self::Scout => "🔍",
            Self::Ambassador => "📢",
            Self::HonoraryCitizen => "👑",
        }
    }

    fn difficulty(&self) -> Difficulty {
        match self {
            Self::Scout => Difficulty::Low,
            Self::Ambassador => Difficulty::Medium,
            Self::HonoraryCitizen => Difficulty::High,
        }
    }

    fn threshold(&self, tiers: &RegionTiers) -> u64 {
        match self {
            Self::Scout => tiers.scout,
            Self::Ambassador => tiers.ambassador,
            Self::HonoraryCitizen => tiers.honorary_citizen,
        }
    }

    fn describe(&self, region: &RegionKey, target: u64) -> String {
        match self {
            Self::Scout => format!(
                "{region} 지역에 {target}개 이상의 게시물을 올린 {region} 명소 발굴가입니다!"
            ),
            Self::Ambassador => {
                format!("{region} 지역에 {target}개 이상의 게시물을 올린 {region} 홍보대사입니다!")
            }
            Self::HonoraryCitizen => {
                format!("{region} 지역에 {target}개 이상의 게시물을 올린 {region} 명예시민입니다!")
            }
        }
    }
}

/// Stable code of a generated region badge: `region:<region>:<tier>`
pub fn region_badge_code(region: &RegionKey, tier: RegionTier) -> BadgeCode {
    BadgeCode::new(format!("region:{}:{}", region.as_str(), tier.as_str()))
}

pub struct RegionBadgeGenerator<'a> {
    settings: &'a BadgeSettings,
}

impl<'a> RegionBadgeGenerator<'a> {
    pub fn new(settings: &'a BadgeSettings) -> Self {
        Self { settings }
    }

    /// Three badges for one region, lowest tier first
    pub fn badges_for(&self, region: &RegionKey) -> Vec<BadgeDefinition> {
        RegionTier::all()
            .iter()
            .map(|tier| {
                let target = tier.threshold(&self.settings.region_tiers);
                BadgeDefinition {
                    code: region_badge_code(region, *tier),
                    name: Cow::Owned(format!("{} {}", region, tier.title())),
                    icon: Cow::Borrowed(tier.icon()),
                    description: Cow::Owned(tier.describe(region, target)),
                    difficulty: tier.difficulty(),
                    condition: ConditionKind::RegionPostsAtLeast {
                        region: region.clone(),
                        target,
                    },
                }
            })
            .collect()
    }

    /// Badges for every region with at least one post, in discovery order.
    /// Excluded regions are skipped.
    pub fn generate(&self, stats: &UserStats) -> Vec<BadgeDefinition> {
        stats
            .region_order
            .iter()
            .filter(|region| stats.region_count(region) > 0)
            .filter(|region| {
                let excluded = self.settings.is_region_excluded(region.as_str());
                if excluded {
                    tracing::debug!(region = %region, "Skipping excluded region");
                }
                !excluded
            })
            .flat_map(|region| self.badges_for(region))
            .collect()
    }
}
