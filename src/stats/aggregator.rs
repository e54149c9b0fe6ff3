//! Per-user statistics derived from the post history
//!
//! Aggregation is a pure projection: the same posts, user and join date
//! always produce the same [`UserStats`]. Nothing is cached across calls.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Days, Utc};
use serde::Serialize;

use super::day::DayResolver;
use super::streaks::consecutive_days;
use crate::config::{Config, OwnerlessPolicy};
use crate::domain::{Category, Post, RegionKey, RegionResolver, SuffixRegionResolver};

/// Aggregated counters for one user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub total_posts: u64,
    pub total_likes: u64,
    /// Posts per region. Posts without a resolvable region are not counted here.
    pub region_posts: BTreeMap<RegionKey, u64>,
    /// Regions in order of first appearance in the post list
    pub region_order: Vec<RegionKey>,
    /// Posts per category. Uncategorized posts are not counted here.
    pub category_posts: BTreeMap<Category, u64>,
    pub visited_regions: u64,
    pub join_date: Option<DateTime<Utc>>,
    pub consecutive_days: u64,
    /// Dated posts created no later than the end of the early-adopter window
    pub posts_in_join_window: u64,
}

impl UserStats {
    pub fn region_count(&self, region: &RegionKey) -> u64 {
        self.region_posts.get(region).copied().unwrap_or(0)
    }

    pub fn category_count(&self, category: Category) -> u64 {
        self.category_posts.get(&category).copied().unwrap_or(0)
    }

    /// Post count of the user's busiest region
    pub fn max_region_posts(&self) -> u64 {
        self.region_posts.values().copied().max().unwrap_or(0)
    }

    /// Number of regions with at least `posts` posts
    pub fn regions_with_at_least(&self, posts: u64) -> u64 {
        self.region_posts.values().filter(|&&count| count >= posts).count() as u64
    }
}

/// Result of one aggregation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateReport {
    pub stats: UserStats,
    /// Ownerless posts left out under [`OwnerlessPolicy::Quarantine`]
    pub quarantined: usize,
    /// Demo records skipped by id prefix
    pub skipped_mock: usize,
}

pub struct StatsAggregator {
    policy: OwnerlessPolicy,
    days: DayResolver,
    resolver: Arc<dyn RegionResolver>,
    mock_prefixes: Vec<String>,
    join_window_days: u32,
}

impl StatsAggregator {
    pub fn new(policy: OwnerlessPolicy, days: DayResolver) -> Self {
        Self {
            policy,
            days,
            resolver: Arc::new(SuffixRegionResolver),
            mock_prefixes: vec!["mock-".to_string()],
            join_window_days: 7,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.settings.ownerless_posts,
            DayResolver::from_offset_minutes(config.settings.utc_offset_minutes),
        )
        .with_mock_prefixes(config.settings.mock_id_prefixes.clone())
        .with_join_window_days(config.badges.early_adopter_window_days)
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn RegionResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_mock_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.mock_prefixes = prefixes;
        self
    }

    pub fn with_join_window_days(mut self, days: u32) -> Self {
        self.join_window_days = days;
        self
    }

    pub fn resolver(&self) -> &dyn RegionResolver {
        self.resolver.as_ref()
    }

    pub fn day_resolver(&self) -> DayResolver {
        self.days
    }

    /// Whether a post counts toward `current_user` under the configured ownership policy
    pub fn belongs_to(&self, post: &Post, current_user: &str) -> bool {
        if post.is_mock(&self.mock_prefixes) {
            return false;
        }
        match post.owner() {
            Some(owner) => owner == current_user,
            None => self.policy == OwnerlessPolicy::Attribute,
        }
    }

    pub fn is_mock(&self, post: &Post) -> bool {
        post.is_mock(&self.mock_prefixes)
    }

    /// Compute statistics for `current_user` from the full post list.
    pub fn aggregate(
        &self,
        posts: &[Post],
        current_user: &str,
        join_date: Option<DateTime<Utc>>,
    ) -> AggregateReport {
        let mut report = AggregateReport::default();
        let mut stats = UserStats {
            join_date,
            ..UserStats::default()
        };

        let window_end = join_date.and_then(|joined| {
            joined.checked_add_days(Days::new(u64::from(self.join_window_days)))
        });
        let mut days = Vec::new();

        for post in posts {
            if post.is_mock(&self.mock_prefixes) {
                report.skipped_mock += 1;
                continue;
            }
            match post.owner() {
                Some(owner) if owner != current_user => continue,
                Some(_) => {}
                None if self.policy == OwnerlessPolicy::Quarantine => {
                    report.quarantined += 1;
                    continue;
                }
                None => {}
            }

            stats.total_posts += 1;
            stats.total_likes = stats.total_likes.saturating_add(post.likes);

            if let Some(region) = post.region_key(self.resolver.as_ref()) {
                let count = stats.region_posts.entry(region.clone()).or_insert(0);
                if *count == 0 {
                    stats.region_order.push(region);
                }
                *count += 1;
            }

            if let Some(category) = post.category() {
                *stats.category_posts.entry(category).or_insert(0) += 1;
            }

            if let Some(created) = post.created_at() {
                days.push(self.days.day_of(&created));
                if window_end.is_some_and(|end| created.with_timezone(&Utc) <= end) {
                    stats.posts_in_join_window += 1;
                }
            }
        }

        stats.visited_regions = stats.region_posts.len() as u64;
        stats.consecutive_days = consecutive_days(days);

        tracing::debug!(
            user = current_user,
            total_posts = stats.total_posts,
            total_likes = stats.total_likes,
            regions = stats.visited_regions,
            streak = stats.consecutive_days,
            quarantined = report.quarantined,
            "Aggregated user stats"
        );

        report.stats = stats;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn posts(value: serde_json::Value) -> Vec<Post> {
        serde_json::from_value(value).unwrap()
    }

    fn aggregator() -> StatsAggregator {
        StatsAggregator::new(
            OwnerlessPolicy::Attribute,
            DayResolver::from_offset_minutes(Some(0)),
        )
    }

    #[test]
    fn test_counts_only_current_user() {
        let list = posts(json!([
            {"userId": "U1", "location": "서울 강남구", "likes": 3, "category": "food"},
            {"userId": "U2", "location": "부산 해운대구", "likes": 9},
            {"user": {"id": "U1"}, "location": "서울특별시 종로구", "likes": 2},
        ]));
        let stats = aggregator().aggregate(&list, "U1", None).stats;
        assert_eq!(stats.total_posts, 2);
        assert_eq!(stats.total_likes, 5);
        assert_eq!(stats.visited_regions, 1);
        assert_eq!(stats.region_count(&RegionKey::new("서울").unwrap()), 2);
        assert_eq!(stats.category_count(Category::Food), 1);
    }

    #[test]
    fn test_ownerless_attributed_by_default() {
        let list = posts(json!([
            {"location": "제주 애월읍"},
            {"location": "제주 서귀포시"},
        ]));
        let report = aggregator().aggregate(&list, "U1", None);
        assert_eq!(report.stats.total_posts, 2);
        assert_eq!(report.quarantined, 0);
    }

    #[test]
    fn test_ownerless_quarantined_when_configured() {
        let list = posts(json!([
            {"location": "제주 애월읍"},
            {"userId": "U1", "location": "제주 서귀포시"},
        ]));
        let report = StatsAggregator::new(OwnerlessPolicy::Quarantine, DayResolver::Local)
            .aggregate(&list, "U1", None);
        assert_eq!(report.stats.total_posts, 1);
        assert_eq!(report.quarantined, 1);
    }

    #[test]
    fn test_unresolvable_region_still_counts_as_post() {
        let list = posts(json!([
            {"userId": "U1"},
            {"userId": "U1", "location": "강릉 주문진"},
        ]));
        let stats = aggregator().aggregate(&list, "U1", None).stats;
        assert_eq!(stats.total_posts, 2);
        assert_eq!(stats.region_posts.values().sum::<u64>(), 1);
    }

    #[test]
    fn test_region_order_follows_first_appearance() {
        let list = posts(json!([
            {"userId": "U1", "location": "제주 애월읍"},
            {"userId": "U1", "location": "강릉 주문진"},
            {"userId": "U1", "location": "제주 성산읍"},
            {"userId": "U1", "location": "부산광역시 해운대구"},
        ]));
        let stats = aggregator().aggregate(&list, "U1", None).stats;
        let order: Vec<&str> = stats.region_order.iter().map(RegionKey::as_str).collect();
        assert_eq!(order, vec!["제주", "강릉", "부산"]);
    }

    #[test]
    fn test_mock_posts_are_skipped() {
        let list = posts(json!([
            {"id": "mock-1", "userId": "U1"},
            {"id": "local-1", "userId": "U1"},
        ]));
        let report = aggregator().aggregate(&list, "U1", None);
        assert_eq!(report.stats.total_posts, 1);
        assert_eq!(report.skipped_mock, 1);
    }

    #[test]
    fn test_join_window() {
        let joined = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let list = posts(json!([
            {"userId": "U1", "timestamp": "2025-03-02T10:00:00Z"},
            {"userId": "U1", "timestamp": "2025-03-07T10:00:00Z"},
            {"userId": "U1", "timestamp": "2025-03-20T10:00:00Z"},
            {"userId": "U1"},
        ]));
        let stats = aggregator().aggregate(&list, "U1", Some(joined)).stats;
        assert_eq!(stats.posts_in_join_window, 2);
        assert_eq!(stats.join_date, Some(joined));

        let stats = aggregator().aggregate(&list, "U1", None).stats;
        assert_eq!(stats.posts_in_join_window, 0);
    }

    #[test]
    fn test_streak_from_timestamps() {
        let list = posts(json!([
            {"userId": "U1", "timestamp": "2025-03-01T10:00:00Z"},
            {"userId": "U1", "timestamp": "2025-03-02T23:00:00Z"},
            {"userId": "U1", "time": "2025-03-03T08:00:00Z"},
            {"userId": "U1", "timestamp": "2025-03-05T08:00:00Z"},
        ]));
        let stats = aggregator().aggregate(&list, "U1", None).stats;
        assert_eq!(stats.consecutive_days, 3);
    }

    #[test]
    fn test_aggregate_is_repeatable() {
        let list = posts(json!([
            {"userId": "U1", "location": "서울 강남구", "likes": 1, "category": "bloom"},
            {"location": "서울특별시 마포구", "likes": 4, "timestamp": "2025-03-05T08:00:00Z"},
        ]));
        let agg = aggregator();
        let first = agg.aggregate(&list, "U1", None);
        let second = agg.aggregate(&list, "U1", None);
        assert_eq!(first, second);
    }

    struct AliasResolver;

    impl RegionResolver for AliasResolver {
        fn resolve(&self, token: &str) -> Option<RegionKey> {
            match token {
                "제주도" | "제주" => RegionKey::new("제주"),
                other => SuffixRegionResolver.resolve(other),
            }
        }
    }

    #[test]
    fn test_custom_resolver() {
        let list = posts(json!([
            {"userId": "U1", "location": "제주도 애월읍"},
            {"userId": "U1", "location": "제주 성산읍"},
        ]));
        let stats = aggregator()
            .with_resolver(Arc::new(AliasResolver))
            .aggregate(&list, "U1", None)
            .stats;
        assert_eq!(stats.visited_regions, 1);
        assert_eq!(stats.region_count(&RegionKey::new("제주").unwrap()), 2);
    }

    #[test]
    fn test_stat_helpers() {
        let mut stats = UserStats::default();
        assert_eq!(stats.max_region_posts(), 0);
        stats.region_posts.insert(RegionKey::new("서울").unwrap(), 6);
        stats.region_posts.insert(RegionKey::new("부산").unwrap(), 2);
        assert_eq!(stats.max_region_posts(), 6);
        assert_eq!(stats.regions_with_at_least(5), 1);
    }
}
