//! Badge unlock conditions
//!
//! Every condition compares one measured value against a target.
//! `evaluate` and `progress` are both derived from that measurement, so a
//! condition holds exactly when its progress reaches 100.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Category, RegionKey};
use crate::stats::UserStats;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
    #[error("condition target must be greater than zero")]
    ZeroTarget,

    #[error("join date is required for this condition")]
    MissingJoinDate,
}

/// What a badge checks, as data rather than a closure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConditionKind {
    TotalPostsAtLeast { target: u64 },
    TotalLikesAtLeast { target: u64 },
    VisitedRegionsAtLeast { target: u64 },
    CategoryPostsAtLeast { category: Category, target: u64 },
    ConsecutiveDaysAtLeast { target: u64 },
    /// Posts in one specific region
    RegionPostsAtLeast { region: RegionKey, target: u64 },
    /// Posts in the user's busiest region
    AnyRegionPostsAtLeast { target: u64 },
    /// At least `regions` regions with `posts` posts each
    RegionsWithPostsAtLeast { regions: u64, posts: u64 },
    /// Posts uploaded within the window after joining
    EarlyAdopter { min_posts: u64 },
}

/// Stat a condition is measured on, for grouping in listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Posts,
    Likes,
    Regions,
    Category,
    Streak,
    RegionActivity,
    EarlyAdopter,
}

impl Dimension {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Posts => "게시물",
            Self::Likes => "좋아요",
            Self::Regions => "방문 지역",
            Self::Category => "카테고리",
            Self::Streak => "연속 업로드",
            Self::RegionActivity => "지역 활동",
            Self::EarlyAdopter => "얼리어답터",
        }
    }
}

impl ConditionKind {
    pub fn target(&self) -> u64 {
        match self {
            Self::TotalPostsAtLeast { target }
            | Self::TotalLikesAtLeast { target }
            | Self::VisitedRegionsAtLeast { target }
            | Self::CategoryPostsAtLeast { target, .. }
            | Self::ConsecutiveDaysAtLeast { target }
            | Self::RegionPostsAtLeast { target, .. }
            | Self::AnyRegionPostsAtLeast { target } => *target,
            Self::RegionsWithPostsAtLeast { regions, .. } => *regions,
            Self::EarlyAdopter { min_posts } => *min_posts,
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Self::TotalPostsAtLeast { .. } => Dimension::Posts,
            Self::TotalLikesAtLeast { .. } => Dimension::Likes,
            Self::VisitedRegionsAtLeast { .. } => Dimension::Regions,
            Self::CategoryPostsAtLeast { .. } => Dimension::Category,
            Self::ConsecutiveDaysAtLeast { .. } => Dimension::Streak,
            Self::RegionPostsAtLeast { .. }
            | Self::AnyRegionPostsAtLeast { .. }
            | Self::RegionsWithPostsAtLeast { .. } => Dimension::RegionActivity,
            Self::EarlyAdopter { .. } => Dimension::EarlyAdopter,
        }
    }

    /// Region this condition is keyed on, if any
    pub fn region(&self) -> Option<&RegionKey> {
        match self {
            Self::RegionPostsAtLeast { region, .. } => Some(region),
            _ => None,
        }
    }

    /// Current value and target for these stats
    pub fn measure(&self, stats: &UserStats) -> Result<(u64, u64), ConditionError> {
        let target = self.target();
        if target == 0 {
            return Err(ConditionError::ZeroTarget);
        }
        let current = match self {
            Self::TotalPostsAtLeast { .. } => stats.total_posts,
            Self::TotalLikesAtLeast { .. } => stats.total_likes,
            Self::VisitedRegionsAtLeast { .. } => stats.visited_regions,
            Self::CategoryPostsAtLeast { category, .. } => stats.category_count(*category),
            Self::ConsecutiveDaysAtLeast { .. } => stats.consecutive_days,
            Self::RegionPostsAtLeast { region, .. } => stats.region_count(region),
            Self::AnyRegionPostsAtLeast { .. } => stats.max_region_posts(),
            Self::RegionsWithPostsAtLeast { posts, .. } => {
                if *posts == 0 {
                    return Err(ConditionError::ZeroTarget);
                }
                stats.regions_with_at_least(*posts)
            }
            Self::EarlyAdopter { .. } => {
                if stats.join_date.is_none() {
                    return Err(ConditionError::MissingJoinDate);
                }
                stats.posts_in_join_window
            }
        };
        Ok((current, target))
    }

    pub fn evaluate(&self, stats: &UserStats) -> Result<bool, ConditionError> {
        let (current, target) = self.measure(stats)?;
        Ok(current >= target)
    }

    /// Progress toward the target in percent, rounded down and capped at 100
    pub fn progress(&self, stats: &UserStats) -> Result<u8, ConditionError> {
        let (current, target) = self.measure(stats)?;
        let percent = current.saturating_mul(100) / target;
        Ok(percent.min(100) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn region(name: &str) -> RegionKey {
        RegionKey::new(name).unwrap()
    }

    fn all_kinds() -> Vec<ConditionKind> {
        vec![
            ConditionKind::TotalPostsAtLeast { target: 3 },
            ConditionKind::TotalLikesAtLeast { target: 7 },
            ConditionKind::VisitedRegionsAtLeast { target: 2 },
            ConditionKind::CategoryPostsAtLeast { category: Category::Food, target: 3 },
            ConditionKind::ConsecutiveDaysAtLeast { target: 3 },
            ConditionKind::RegionPostsAtLeast { region: region("제주"), target: 5 },
            ConditionKind::AnyRegionPostsAtLeast { target: 3 },
            ConditionKind::RegionsWithPostsAtLeast { regions: 2, posts: 2 },
            ConditionKind::EarlyAdopter { min_posts: 3 },
        ]
    }

    #[test]
    fn test_evaluate_matches_full_progress() {
        for n in 0..12u64 {
            let mut stats = UserStats {
                total_posts: n,
                total_likes: n,
                visited_regions: n / 2,
                consecutive_days: n / 3,
                posts_in_join_window: n,
                join_date: Some(Utc::now()),
                ..UserStats::default()
            };
            stats.category_posts.insert(Category::Food, n / 2);
            stats.region_posts.insert(region("제주"), n);
            stats.region_posts.insert(region("서울"), n / 4);

            for kind in all_kinds() {
                let met = kind.evaluate(&stats).unwrap();
                let progress = kind.progress(&stats).unwrap();
                assert!(progress <= 100);
                assert_eq!(met, progress >= 100, "{kind:?} at n={n}");
            }
        }
    }

    #[test]
    fn test_progress_rounds_down() {
        let stats = UserStats {
            total_posts: 2,
            ..UserStats::default()
        };
        assert_eq!(ConditionKind::TotalPostsAtLeast { target: 3 }.progress(&stats), Ok(66));
        assert_eq!(ConditionKind::TotalPostsAtLeast { target: 1 }.progress(&stats), Ok(100));
    }

    #[test]
    fn test_zero_target_is_an_error() {
        let stats = UserStats::default();
        assert_eq!(
            ConditionKind::TotalPostsAtLeast { target: 0 }.evaluate(&stats),
            Err(ConditionError::ZeroTarget)
        );
        assert_eq!(
            ConditionKind::RegionsWithPostsAtLeast { regions: 3, posts: 0 }.evaluate(&stats),
            Err(ConditionError::ZeroTarget)
        );
    }

    #[test]
    fn test_early_adopter_needs_join_date() {
        let stats = UserStats {
            posts_in_join_window: 20,
            ..UserStats::default()
        };
        assert_eq!(
            ConditionKind::EarlyAdopter { min_posts: 10 }.evaluate(&stats),
            Err(ConditionError::MissingJoinDate)
        );
    }

    #[test]
    fn test_monotonic_in_post_count() {
        let kind = ConditionKind::TotalPostsAtLeast { target: 10 };
        let mut was_met = false;
        for n in 0..40 {
            let stats = UserStats {
                total_posts: n,
                ..UserStats::default()
            };
            let met = kind.evaluate(&stats).unwrap();
            assert!(!was_met || met);
            was_met = met;
        }
        assert!(was_met);
    }

    #[test]
    fn test_tagged_serde() {
        let kind: ConditionKind =
            serde_json::from_str(r#"{"kind":"region_posts_at_least","region":"제주","target":5}"#)
                .unwrap();
        assert_eq!(kind.region(), Some(&region("제주")));
        assert_eq!(kind.dimension(), Dimension::RegionActivity);
    }
}
