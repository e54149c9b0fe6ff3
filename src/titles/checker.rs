//! Daily title condition checks
//!
//! Conditions are checked in priority order; the first one that holds is
//! the title a user receives for the day.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};

use super::definitions::TitleDefinition;
use crate::domain::{Post, RegionKey};
use crate::stats::StatsAggregator;

const EMERGENCY_KEYWORDS: &[&str] = &["교통 통제", "휴무", "폐업", "공사", "긴급", "통제", "운휴"];
const WEATHER_KEYWORDS: &[&str] = &["비", "눈", "폭우", "강풍", "날씨", "우천"];

/// Dawn posts are made between 01:00 and 05:59 local time
const DAWN_HOURS: std::ops::RangeInclusive<u32> = 1..=5;
const LOCAL_EXPERT_POSTS: u64 = 7;
const LIKE_KING_LIKES: u64 = 10;
const DISCUSSION_COMMENTS: u64 = 15;
const PHOTO_MAKER_LIKES: u64 = 20;

/// One user's activity on one calendar day
#[derive(Debug, Clone)]
pub struct DailyStats<'a> {
    pub day: NaiveDate,
    pub posts: Vec<&'a Post>,
    pub total_likes: u64,
    /// Total Q&A entries across the day's posts
    pub total_comments: u64,
    pub first_post_at: Option<DateTime<FixedOffset>>,
    /// Likes on the day's most-liked post
    pub most_likes: u64,
}

impl<'a> DailyStats<'a> {
    pub fn collect(
        posts: &'a [Post],
        user: &str,
        day: NaiveDate,
        aggregator: &StatsAggregator,
    ) -> Self {
        let days = aggregator.day_resolver();
        let todays: Vec<&Post> = posts
            .iter()
            .filter(|post| aggregator.belongs_to(post, user))
            .filter(|post| post.created_at().is_some_and(|at| days.day_of(&at) == day))
            .collect();

        Self {
            day,
            total_likes: todays.iter().map(|p| p.likes).sum(),
            total_comments: todays.iter().map(|p| p.comment_count() as u64).sum(),
            first_post_at: todays.iter().filter_map(|p| p.created_at()).min(),
            most_likes: todays.iter().map(|p| p.likes).max().unwrap_or(0),
            posts: todays,
        }
    }

    pub fn post_count(&self) -> u64 {
        self.posts.len() as u64
    }
}

fn mentions_any(post: &Post, keywords: &[&str]) -> bool {
    post.text_fragments()
        .any(|text| keywords.iter().any(|keyword| text.contains(keyword)))
}

/// True when the earliest post of the day, across all users, is this user's
fn posted_first_today(posts: &[Post], user: &str, day: NaiveDate, aggregator: &StatsAggregator) -> bool {
    let days = aggregator.day_resolver();
    posts
        .iter()
        .filter(|post| !aggregator.is_mock(post))
        .filter_map(|post| post.created_at().map(|at| (at, post)))
        .filter(|(at, _)| days.day_of(at) == day)
        .min_by_key(|(at, _)| *at)
        .is_some_and(|(_, post)| aggregator.belongs_to(post, user))
}

/// Every title whose condition holds for `user` on `day`, highest priority first
pub fn check_title_conditions(
    posts: &[Post],
    user: &str,
    day: NaiveDate,
    aggregator: &StatsAggregator,
) -> Vec<&'static TitleDefinition> {
    let stats = DailyStats::collect(posts, user, day, aggregator);
    if stats.posts.is_empty() {
        return Vec::new();
    }

    let days = aggregator.day_resolver();
    let mut region_counts: HashMap<RegionKey, u64> = HashMap::new();
    for post in &stats.posts {
        if let Some(region) = post.region_key(aggregator.resolver()) {
            *region_counts.entry(region).or_insert(0) += 1;
        }
    }

    let checks = [
        ("speed_hunter", posted_first_today(posts, user, day, aggregator)),
        (
            "breaking_reporter",
            stats.posts.iter().any(|p| mentions_any(p, EMERGENCY_KEYWORDS)),
        ),
        (
            "weather_forecaster",
            stats.posts.iter().any(|p| mentions_any(p, WEATHER_KEYWORDS)),
        ),
        (
            "dawn_pioneer",
            stats.posts.iter().filter_map(|p| p.created_at()).any(|at| {
                DAWN_HOURS.contains(&days.local_datetime(&at).hour())
            }),
        ),
        (
            "local_expert",
            region_counts.values().any(|&count| count >= LOCAL_EXPERT_POSTS),
        ),
        ("like_king", stats.most_likes >= LIKE_KING_LIKES),
        ("discussion_starter", stats.total_comments >= DISCUSSION_COMMENTS),
        ("first_shutter", stats.post_count() >= 1),
        ("photo_maker", stats.total_likes >= PHOTO_MAKER_LIKES),
    ];

    checks
        .into_iter()
        .filter(|(_, met)| *met)
        .filter_map(|(code, _)| TitleDefinition::get(code))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OwnerlessPolicy;
    use crate::stats::DayResolver;
    use serde_json::json;

    fn aggregator() -> StatsAggregator {
        StatsAggregator::new(
            OwnerlessPolicy::Attribute,
            DayResolver::from_offset_minutes(Some(9 * 60)),
        )
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 5).unwrap()
    }

    fn codes(titles: &[&TitleDefinition]) -> Vec<&'static str> {
        titles.iter().map(|t| t.code).collect()
    }

    #[test]
    fn test_no_posts_today_no_titles() {
        let posts: Vec<Post> = serde_json::from_value(json!([
            {"userId": "U1", "timestamp": "2025-04-03T03:00:00Z"}
        ]))
        .unwrap();
        assert!(check_title_conditions(&posts, "U1", day(), &aggregator()).is_empty());
    }

    #[test]
    fn test_first_poster_of_the_day() {
        // 00:30 UTC = 09:30 KST on April 5th
        let posts: Vec<Post> = serde_json::from_value(json!([
            {"userId": "U2", "timestamp": "2025-04-05T02:00:00Z"},
            {"userId": "U1", "timestamp": "2025-04-05T00:30:00Z"},
        ]))
        .unwrap();
        let u1 = check_title_conditions(&posts, "U1", day(), &aggregator());
        assert_eq!(codes(&u1), vec!["speed_hunter", "first_shutter"]);

        let u2 = check_title_conditions(&posts, "U2", day(), &aggregator());
        assert_eq!(codes(&u2), vec!["first_shutter"]);
    }

    #[test]
    fn test_keyword_and_dawn_titles() {
        // 18:30 UTC on April 4th = 03:30 KST on April 5th
        let posts: Vec<Post> = serde_json::from_value(json!([
            {"userId": "U0", "timestamp": "2025-04-04T16:00:00Z"},
            {"userId": "U1", "timestamp": "2025-04-04T18:30:00Z", "note": "도로 공사 중", "aiLabels": ["강풍"]},
        ]))
        .unwrap();
        let titles = check_title_conditions(&posts, "U1", day(), &aggregator());
        assert_eq!(
            codes(&titles),
            vec!["breaking_reporter", "weather_forecaster", "dawn_pioneer", "first_shutter"]
        );
    }

    #[test]
    fn test_engagement_titles() {
        let qna: Vec<serde_json::Value> = (0..15).map(|i| json!({"q": i})).collect();
        let posts: Vec<Post> = serde_json::from_value(json!([
            {"userId": "U0", "timestamp": "2025-04-05T00:00:00Z"},
            {"userId": "U1", "timestamp": "2025-04-05T03:00:00Z", "likes": 12, "qnaList": qna},
            {"userId": "U1", "timestamp": "2025-04-05T04:00:00Z", "likes": 9},
        ]))
        .unwrap();
        let stats = DailyStats::collect(&posts, "U1", day(), &aggregator());
        assert_eq!(stats.post_count(), 2);
        assert_eq!(stats.total_likes, 21);
        assert_eq!(stats.total_comments, 15);
        assert_eq!(stats.most_likes, 12);

        let titles = check_title_conditions(&posts, "U1", day(), &aggregator());
        assert_eq!(
            codes(&titles),
            vec!["like_king", "discussion_starter", "first_shutter", "photo_maker"]
        );
    }

    #[test]
    fn test_local_expert() {
        let list: Vec<serde_json::Value> = (0..7)
            .map(|i| {
                json!({
                    "userId": "U1",
                    "location": if i % 2 == 0 { "서울 강남구" } else { "서울특별시 마포구" },
                    "timestamp": format!("2025-04-05T0{i}:10:00Z"),
                })
            })
            .collect();
        let posts: Vec<Post> = serde_json::from_value(json!(list)).unwrap();
        let titles = check_title_conditions(&posts, "U1", day(), &aggregator());
        assert!(codes(&titles).contains(&"local_expert"));
    }
}
