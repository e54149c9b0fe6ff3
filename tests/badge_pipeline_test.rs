//! End-to-end tests for the badge pipeline: post list on disk, stats,
//! catalog, awarding and events.

mod common;

use std::collections::HashSet;

use serde_json::{json, Value};

use common::{posts_in, TestEnv};
use livejourney::badges::{ConditionKind, Difficulty, GamificationEvent};
use livejourney::config::{CustomBadge, OwnerlessPolicy};
use livejourney::domain::{Category, RegionKey};
use rusqlite::Connection;

fn earned_codes(env: &TestEnv, user: &str) -> HashSet<String> {
    env.manager()
        .earned_badges(user)
        .unwrap()
        .into_iter()
        .map(|b| b.code.to_string())
        .collect()
}

fn badge_codes(events: &[GamificationEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            GamificationEvent::BadgeEarned(n) => Some(n.code.to_string()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_first_post_awards_only_first_post() {
    let env = TestEnv::new();
    env.write_posts(json!(posts_in("U1", "강릉 주문진", 1)));

    let events = env.manager().check_and_award("U1").unwrap();
    assert_eq!(badge_codes(&events), vec!["first_post"]);
    assert!(events
        .iter()
        .any(|e| matches!(e, GamificationEvent::XpAwarded { amount: 20, .. })));
}

#[test]
fn test_awarding_is_idempotent() {
    let env = TestEnv::new();
    env.write_posts(json!(posts_in("U1", "강릉 주문진", 3)));
    let manager = env.manager();

    let first = manager.check_and_award("U1").unwrap();
    assert_eq!(badge_codes(&first), vec!["first_post", "posts_3", "region_fan"]);

    let second = manager.check_and_award("U1").unwrap();
    assert!(second.is_empty());
    assert_eq!(manager.earned_badges("U1").unwrap().len(), 3);
}

#[test]
fn test_earned_set_only_grows() {
    let env = TestEnv::new();
    let mut previous: HashSet<String> = HashSet::new();

    for n in 1..=12 {
        env.write_posts(json!(posts_in("U1", "강릉 주문진", n)));
        env.manager().check_and_award("U1").unwrap();
        let current = earned_codes(&env, "U1");
        assert!(previous.is_subset(&current), "badge lost at {} posts", n);
        previous = current;
    }

    assert!(previous.contains("posts_10"));
    assert!(previous.contains("region:강릉:ambassador"));
    assert!(!previous.contains("region:강릉:honorary_citizen"));
}

#[test]
fn test_stats_are_stable_across_recomputation() {
    let env = TestEnv::new();
    env.write_posts(json!([
        {"userId": "U1", "location": "서울 강남구", "likes": 4, "category": "food"},
        {"location": "부산광역시 해운대구", "likes": 1, "timestamp": "2025-03-05T08:00:00Z"},
        {"userId": "U2", "location": "제주 애월읍", "likes": 9},
    ]));
    let manager = env.manager();

    let first = manager.user_stats("U1").unwrap();
    let second = manager.user_stats("U1").unwrap();
    assert_eq!(first, second);
    assert_eq!(first.stats.total_posts, 2);
    assert_eq!(first.stats.total_likes, 5);
    assert_eq!(first.stats.category_count(Category::Food), 1);
}

#[test]
fn test_region_variants_merge() {
    let env = TestEnv::new();
    let mut posts = posts_in("U1", "서울특별시 강남구", 3);
    posts.extend(posts_in("U1", "서울 강남구", 2));
    env.write_posts(Value::Array(posts));
    let manager = env.manager();

    let stats = manager.user_stats("U1").unwrap().stats;
    let seoul = RegionKey::new("서울").unwrap();
    assert_eq!(stats.region_posts.len(), 1);
    assert_eq!(stats.region_count(&seoul), 5);

    let events = manager.check_and_award("U1").unwrap();
    assert!(badge_codes(&events).contains(&"region:서울:scout".to_string()));
}

#[test]
fn test_five_posts_in_one_region_reaches_first_tier_only() {
    let env = TestEnv::new();
    env.write_posts(json!(posts_in("U1", "제주 애월읍", 5)));
    env.manager().check_and_award("U1").unwrap();

    let earned = earned_codes(&env, "U1");
    assert!(earned.contains("region:제주:scout"));
    assert!(!earned.contains("region:제주:ambassador"));
    assert!(!earned.contains("region:제주:honorary_citizen"));
}

#[test]
fn test_ownerless_posts_attributed_to_current_user() {
    let env = TestEnv::new();
    env.write_posts(json!([
        {"location": "제주 애월읍"},
        {"location": "제주 서귀포시"},
        {"location": "제주 성산읍"},
    ]));

    let events = env.manager().check_and_award("U1").unwrap();
    assert!(badge_codes(&events).contains(&"posts_3".to_string()));
}

#[test]
fn test_ownerless_posts_quarantined_when_configured() {
    let mut env = TestEnv::new();
    env.config.settings.ownerless_posts = OwnerlessPolicy::Quarantine;
    env.write_posts(json!([
        {"location": "제주 애월읍"},
        {"location": "제주 서귀포시"},
    ]));
    let manager = env.manager();

    let report = manager.user_stats("U1").unwrap();
    assert_eq!(report.stats.total_posts, 0);
    assert_eq!(report.quarantined, 2);
    assert!(manager.check_and_award("U1").unwrap().is_empty());
}

#[test]
fn test_mock_posts_are_ignored() {
    let env = TestEnv::new();
    env.write_posts(json!([
        {"id": "mock-1", "userId": "U1", "location": "서울 강남구"},
        {"id": "mock-2", "userId": "U1", "location": "서울 강남구"},
    ]));
    assert!(env.manager().check_and_award("U1").unwrap().is_empty());
}

#[test]
fn test_streak_uses_longest_run() {
    let env = TestEnv::new();
    env.write_posts(json!([
        {"userId": "U1", "timestamp": "2025-03-01T03:00:00Z"},
        {"userId": "U1", "timestamp": "2025-03-02T03:00:00Z"},
        {"userId": "U1", "timestamp": "2025-03-03T03:00:00Z"},
        {"userId": "U1", "timestamp": "2025-03-05T03:00:00Z"},
    ]));
    let stats = env.manager().user_stats("U1").unwrap().stats;
    assert_eq!(stats.consecutive_days, 3);
}

#[test]
fn test_custom_badge_from_config() {
    let mut env = TestEnv::new();
    env.config.badges.custom.push(CustomBadge {
        code: "bloom_fan".to_string(),
        name: "꽃 구경꾼".to_string(),
        icon: "🌷".to_string(),
        description: String::new(),
        difficulty: Difficulty::Low,
        condition: ConditionKind::CategoryPostsAtLeast {
            category: Category::Bloom,
            target: 2,
        },
    });
    env.write_posts(json!([
        {"userId": "U1", "category": "bloom"},
        {"userId": "U1", "categoryName": "개화 상황"},
    ]));

    let events = env.manager().check_and_award("U1").unwrap();
    assert!(badge_codes(&events).contains(&"custom:bloom_fan".to_string()));
}

#[test]
fn test_excluded_region_gets_no_region_badges() {
    let mut env = TestEnv::new();
    env.config.badges.excluded_regions = vec!["제주".to_string()];
    env.write_posts(json!(posts_in("U1", "제주 애월읍", 6)));

    env.manager().check_and_award("U1").unwrap();
    let earned = earned_codes(&env, "U1");
    assert!(earned.iter().all(|code| !code.starts_with("region:")));
    assert!(earned.contains("region_scout"));
}

#[test]
fn test_record_post_writes_then_awards() {
    let env = TestEnv::new();
    let manager = env.manager();
    let mut rx = manager.subscribe();

    let post = livejourney::domain::Post::new_local("U1", "부산광역시 해운대구");
    let events = manager.record_post(&post).unwrap();

    let saved = manager.post_store().load().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, post.id);
    assert!(badge_codes(&events).contains(&"first_post".to_string()));

    let mut published = Vec::new();
    while let Ok(event) = rx.try_recv() {
        published.push(event);
    }
    assert_eq!(published, events);
}

#[test]
fn test_failed_write_skips_only_that_badge() {
    let env = TestEnv::new();
    env.write_posts(json!(posts_in("U1", "강릉 주문진", 3)));
    let manager = env.manager();

    let raw = Connection::open(env.config.db_path()).unwrap();
    raw.execute_batch(
        "CREATE TRIGGER reject_posts_3 BEFORE INSERT ON earned_badges
         WHEN NEW.code = 'posts_3'
         BEGIN SELECT RAISE(ABORT, 'write rejected'); END;",
    )
    .unwrap();

    let events = manager.check_and_award("U1").unwrap();
    assert_eq!(badge_codes(&events), vec!["first_post", "region_fan"]);
    assert_eq!(manager.player_stats("U1").unwrap().total_xp, 40);

    // The skipped badge is awarded once writes succeed again
    raw.execute_batch("DROP TRIGGER reject_posts_3;").unwrap();
    let events = manager.check_and_award("U1").unwrap();
    assert_eq!(badge_codes(&events), vec!["posts_3"]);
    assert_eq!(manager.player_stats("U1").unwrap().total_xp, 60);
}

#[test]
fn test_suffixed_excluded_region_matches_canonical_key() {
    let mut env = TestEnv::new();
    env.config.badges.excluded_regions = vec!["서울특별시".to_string()];
    env.write_posts(json!(posts_in("U1", "서울특별시 강남구", 5)));

    env.manager().check_and_award("U1").unwrap();
    let earned = earned_codes(&env, "U1");
    assert!(earned.contains("first_post"));
    assert!(earned.iter().all(|code| !code.starts_with("region:")));
}
