//! Badge definitions and metadata
//!
//! Static badges are defined here. Region badges are generated per region
//! by [`super::region::RegionBadgeGenerator`]; config-defined badges come
//! from `[[badges.custom]]`.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::condition::ConditionKind;
use crate::domain::Category;

/// Stable badge identifier, stored in the database.
/// Display names may change; codes never do.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BadgeCode(Cow<'static, str>);

impl BadgeCode {
    pub const fn from_static(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    pub fn new(code: impl Into<String>) -> Self {
        Self(Cow::Owned(code.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BadgeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Badge difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[serde(alias = "하")]
    Low,
    #[serde(alias = "중")]
    Medium,
    #[serde(alias = "상")]
    High,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "low" | "하" => Some(Self::Low),
            "medium" | "중" => Some(Self::Medium),
            "high" | "상" => Some(Self::High),
            _ => None,
        }
    }

    /// Korean tier label shown next to badges
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Low => "하",
            Self::Medium => "중",
            Self::High => "상",
        }
    }
}

/// Badge definition with all metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeDefinition {
    pub code: BadgeCode,
    pub name: Cow<'static, str>,
    pub icon: Cow<'static, str>,
    pub description: Cow<'static, str>,
    pub difficulty: Difficulty,
    pub condition: ConditionKind,
}

impl BadgeDefinition {
    pub fn target(&self) -> u64 {
        self.condition.target()
    }

    /// Look up a static badge by code
    pub fn get_static(code: &str) -> Option<&'static BadgeDefinition> {
        STATIC_BADGES.iter().find(|b| b.code.as_str() == code)
    }
}

const fn badge(
    code: &'static str,
    name: &'static str,
    icon: &'static str,
    description: &'static str,
    difficulty: Difficulty,
    condition: ConditionKind,
) -> BadgeDefinition {
    BadgeDefinition {
        code: BadgeCode::from_static(code),
        name: Cow::Borrowed(name),
        icon: Cow::Borrowed(icon),
        description: Cow::Borrowed(description),
        difficulty,
        condition,
    }
}

/// All static badge definitions, in evaluation order
pub static STATIC_BADGES: &[BadgeDefinition] = &[
    // === 시작 (하) ===
    badge(
        "first_post",
        "첫 여행 기록",
        "🎯",
        "첫 번째 여행 사진을 업로드했습니다!",
        Difficulty::Low,
        ConditionKind::TotalPostsAtLeast { target: 1 },
    ),
    badge(
        "posts_3",
        "여행 입문자",
        "🌱",
        "3개의 여행 기록을 남겼습니다.",
        Difficulty::Low,
        ConditionKind::TotalPostsAtLeast { target: 3 },
    ),
    badge(
        "first_like",
        "첫 좋아요",
        "💝",
        "첫 번째 좋아요를 받았습니다!",
        Difficulty::Low,
        ConditionKind::TotalLikesAtLeast { target: 1 },
    ),
    // === 활동 (중) ===
    badge(
        "posts_10",
        "여행 탐험가",
        "🧳",
        "10개의 여행 기록을 남긴 진정한 탐험가!",
        Difficulty::Medium,
        ConditionKind::TotalPostsAtLeast { target: 10 },
    ),
    badge(
        "posts_25",
        "사진 수집가",
        "📷",
        "25개의 여행 사진을 업로드했습니다.",
        Difficulty::Medium,
        ConditionKind::TotalPostsAtLeast { target: 25 },
    ),
    badge(
        "likes_50",
        "인기 여행자",
        "✨",
        "50개의 좋아요를 받았습니다!",
        Difficulty::Medium,
        ConditionKind::TotalLikesAtLeast { target: 50 },
    ),
    badge(
        "regions_5",
        "지역 전문가",
        "🗺️",
        "5개 이상의 지역을 방문했습니다.",
        Difficulty::Medium,
        ConditionKind::VisitedRegionsAtLeast { target: 5 },
    ),
    badge(
        "food_10",
        "맛집 헌터",
        "🍜",
        "10개 이상의 맛집을 소개했습니다!",
        Difficulty::Medium,
        ConditionKind::CategoryPostsAtLeast {
            category: Category::Food,
            target: 10,
        },
    ),
    badge(
        "bloom_10",
        "꽃 사냥꾼",
        "🌸",
        "10개 이상의 개화 상황을 공유했습니다!",
        Difficulty::Medium,
        ConditionKind::CategoryPostsAtLeast {
            category: Category::Bloom,
            target: 10,
        },
    ),
    badge(
        "scenic_15",
        "명소 추천왕",
        "🏞️",
        "15개 이상의 추천 장소를 공유했습니다!",
        Difficulty::Medium,
        ConditionKind::CategoryPostsAtLeast {
            category: Category::Scenic,
            target: 15,
        },
    ),
    // === 전문가 (상) ===
    badge(
        "posts_50",
        "여행 마스터",
        "🏆",
        "50개의 여행 기록을 남긴 마스터!",
        Difficulty::High,
        ConditionKind::TotalPostsAtLeast { target: 50 },
    ),
    badge(
        "regions_10",
        "전국 정복자",
        "🌍",
        "10개 이상의 지역을 모두 방문했습니다!",
        Difficulty::High,
        ConditionKind::VisitedRegionsAtLeast { target: 10 },
    ),
    badge(
        "likes_100",
        "슈퍼스타",
        "🌟",
        "100개 이상의 좋아요를 받은 슈퍼스타!",
        Difficulty::High,
        ConditionKind::TotalLikesAtLeast { target: 100 },
    ),
    badge(
        "posts_100",
        "여행 레전드",
        "👑",
        "100개의 여행 기록을 남긴 전설!",
        Difficulty::High,
        ConditionKind::TotalPostsAtLeast { target: 100 },
    ),
    badge(
        "early_adopter",
        "얼리어답터",
        "🚀",
        "가입 후 7일 이내에 10개 이상의 사진을 업로드한 활발한 멤버입니다!",
        Difficulty::High,
        ConditionKind::EarlyAdopter { min_posts: 10 },
    ),
    badge(
        "streak_7",
        "연속 업로더",
        "🔥",
        "7일 연속으로 사진을 업로드했습니다!",
        Difficulty::High,
        ConditionKind::ConsecutiveDaysAtLeast { target: 7 },
    ),
    // === 지역 활동 ===
    badge(
        "region_fan",
        "지역 팬",
        "💚",
        "한 지역에서 3개 이상의 게시물을 올린 진정한 지역 팬입니다!",
        Difficulty::Low,
        ConditionKind::AnyRegionPostsAtLeast { target: 3 },
    ),
    badge(
        "region_scout",
        "지역 스카우터",
        "🔍",
        "한 지역에서 5개 이상의 게시물을 올린 지역 명소 발굴가입니다!",
        Difficulty::Low,
        ConditionKind::AnyRegionPostsAtLeast { target: 5 },
    ),
    badge(
        "region_ambassador",
        "지역 홍보대사",
        "📢",
        "한 지역에서 10개 이상의 게시물을 올린 지역 홍보대사입니다!",
        Difficulty::Medium,
        ConditionKind::AnyRegionPostsAtLeast { target: 10 },
    ),
    badge(
        "region_influencer",
        "지역 인플루언서",
        "📸",
        "한 지역에서 15개 이상의 사진을 올린 지역 인플루언서입니다!",
        Difficulty::Medium,
        ConditionKind::AnyRegionPostsAtLeast { target: 15 },
    ),
    badge(
        "nationwide_traveler",
        "전국 여행가",
        "🧭",
        "3개 이상의 지역에서 각각 5개 이상의 게시물을 올린 전국 여행가입니다!",
        Difficulty::Medium,
        ConditionKind::RegionsWithPostsAtLeast { regions: 3, posts: 5 },
    ),
    badge(
        "region_honorary_citizen",
        "지역 명예시민",
        "👑",
        "한 지역에서 20개 이상의 게시물을 올린 지역 명예시민입니다!",
        Difficulty::High,
        ConditionKind::AnyRegionPostsAtLeast { target: 20 },
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_static_codes_and_names_unique() {
        let codes: HashSet<&str> = STATIC_BADGES.iter().map(|b| b.code.as_str()).collect();
        let names: HashSet<&str> = STATIC_BADGES.iter().map(|b| b.name.as_ref()).collect();
        assert_eq!(codes.len(), STATIC_BADGES.len());
        assert_eq!(names.len(), STATIC_BADGES.len());
        assert_eq!(STATIC_BADGES.len(), 22);
    }

    #[test]
    fn test_static_codes_are_not_namespaced() {
        for badge in STATIC_BADGES {
            assert!(!badge.code.as_str().contains(':'), "{}", badge.code);
            assert!(badge.target() > 0);
        }
    }

    #[test]
    fn test_get_static() {
        let badge = BadgeDefinition::get_static("first_post").unwrap();
        assert_eq!(badge.name, "첫 여행 기록");
        assert!(BadgeDefinition::get_static("unknown").is_none());
    }

    #[test]
    fn test_difficulty_parsing() {
        assert_eq!(Difficulty::from_str("상"), Some(Difficulty::High));
        assert_eq!(Difficulty::from_str("medium"), Some(Difficulty::Medium));
        let parsed: Difficulty = serde_json::from_str("\"하\"").unwrap();
        assert_eq!(parsed, Difficulty::Low);
        assert_eq!(Difficulty::Low.symbol(), "하");
    }
}
