//! Daily title definitions
//!
//! Titles are 24-hour honors. Only some are awarded automatically (see
//! [`super::checker`]); the rest are listed for display.

use serde::Serialize;

/// Title category for grouping in listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleCategory {
    Breaking,
    Location,
    Social,
    Participation,
}

impl TitleCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Breaking => "실시간 속보",
            Self::Location => "위치 기반",
            Self::Social => "소통",
            Self::Participation => "참여",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleDefinition {
    pub code: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub category: TitleCategory,
    pub description: &'static str,
}

impl TitleDefinition {
    pub fn get(code: &str) -> Option<&'static TitleDefinition> {
        DAILY_TITLES.iter().find(|t| t.code == code)
    }
}

pub static DAILY_TITLES: &[TitleDefinition] = &[
    // === 실시간 속보 ===
    TitleDefinition {
        code: "speed_hunter",
        name: "실시간 0분 스피드 헌터",
        icon: "⚡️",
        category: TitleCategory::Breaking,
        description: "당일 첫 번째 실시간 여행 정보를 포스팅한 사용자",
    },
    TitleDefinition {
        code: "breaking_reporter",
        name: "긴급 속보 특파원",
        icon: "📢",
        category: TitleCategory::Breaking,
        description: "'교통 통제', '휴무' 등 긴급 키워드 정보를 가장 먼저 포스팅",
    },
    TitleDefinition {
        code: "weather_forecaster",
        name: "번개 날씨 예보관",
        icon: "🌧️",
        category: TitleCategory::Breaking,
        description: "갑작스러운 날씨 변화를 가장 먼저 실시간으로 올린 사용자",
    },
    TitleDefinition {
        code: "safety_guardian",
        name: "위험 경보의 수호자",
        icon: "🚨",
        category: TitleCategory::Breaking,
        description: "여행지 안전 정보를 공유하여 피해를 막은 사용자",
    },
    TitleDefinition {
        code: "hotspot_misser",
        name: "의지의 핫플 실패러",
        icon: "🚧",
        category: TitleCategory::Breaking,
        description: "폐업/휴무 등 변동된 현장 상황을 공유한 사용자",
    },
    TitleDefinition {
        code: "dawn_pioneer",
        name: "새벽 개척자",
        icon: "🌙",
        category: TitleCategory::Breaking,
        description: "새벽 1시~5시 사이에 실시간 정보를 포스팅한 사용자",
    },
    TitleDefinition {
        code: "first_arrival",
        name: "지금 간다 묻지 마세요",
        icon: "🏃",
        category: TitleCategory::Breaking,
        description: "'지금 바로 가세요' 알림 후, 해당 장소에 가장 먼저 도착 인증",
    },
    TitleDefinition {
        code: "queue_master",
        name: "현장 줄 서기 명인",
        icon: "⏳",
        category: TitleCategory::Breaking,
        description: "인기 장소의 가장 정확한 실시간 대기 시간 정보를 제공",
    },
    TitleDefinition {
        code: "raw_recorder",
        name: "날 것의 기록자",
        icon: "📸",
        category: TitleCategory::Breaking,
        description: "포토샵 없이 가장 현실적인 현장 상황 사진을 공유",
    },
    // === 위치 기반 ===
    TitleDefinition {
        code: "daily_guide",
        name: "오늘 길잡이",
        icon: "🗺️",
        category: TitleCategory::Location,
        description: "'저장하기'를 가장 많이 받은 유용한 정보성 포스팅 작성자",
    },
    TitleDefinition {
        code: "local_expert",
        name: "오늘 지역 전문가",
        icon: "🎯",
        category: TitleCategory::Location,
        description: "특정 여행 지역 내에서만 7개 이상의 포스팅을 올린 사용자",
    },
    TitleDefinition {
        code: "fact_checker",
        name: "500m 현장 검증단",
        icon: "✅",
        category: TitleCategory::Location,
        description: "500m 내 다른 정보에 대해 '사실 확인' 댓글을 3회 이상",
    },
    TitleDefinition {
        code: "treasure_explorer",
        name: "숨겨진 보물 탐험가",
        icon: "💎",
        category: TitleCategory::Location,
        description: "숨겨진 '핫스팟 미션' 성공 후 가장 상세한 후기",
    },
    TitleDefinition {
        code: "workaholic_traveler",
        name: "워커홀릭 여행자",
        icon: "👟",
        category: TitleCategory::Location,
        description: "가장 긴 거리를 이동하고 현장 인증을 한 사용자",
    },
    TitleDefinition {
        code: "value_hunter",
        name: "가성비 신",
        icon: "💰",
        category: TitleCategory::Location,
        description: "가장 유용한 현지 상황(할인, 이벤트 등) 팁을 공유",
    },
    // === 소통 ===
    TitleDefinition {
        code: "like_king",
        name: "좋아요 폭격의 왕",
        icon: "⭐",
        category: TitleCategory::Social,
        description: "24시간 동안 가장 많은 좋아요를 받은 포스팅의 작성자",
    },
    TitleDefinition {
        code: "discussion_starter",
        name: "토론 유발자",
        icon: "💬",
        category: TitleCategory::Social,
        description: "24시간 동안 가장 많은 댓글이 달린 포스팅의 작성자",
    },
    TitleDefinition {
        code: "question_solver",
        name: "질문 해결사",
        icon: "❓",
        category: TitleCategory::Social,
        description: "여행 상황 질문에 가장 정확하고 상세한 답변을 제공",
    },
    TitleDefinition {
        code: "comment_relay",
        name: "댓글 릴레이 주역",
        icon: "🔄",
        category: TitleCategory::Social,
        description: "자신의 포스팅 댓글에 가장 성실하게 응답(10회 이상)",
    },
    TitleDefinition {
        code: "photo_maker",
        name: "인생샷 제조기",
        icon: "🖼️",
        category: TitleCategory::Social,
        description: "가이드북급 품질의 사진을 업로드하여 시각적 즐거움을 제공",
    },
    TitleDefinition {
        code: "golden_hour_master",
        name: "일출/일몰 마스터",
        icon: "☀️",
        category: TitleCategory::Social,
        description: "시간대에 맞춰 가장 아름다운 사진을 업로드",
    },
    TitleDefinition {
        code: "reply_magnet",
        name: "댓글 인싸력 만렙",
        icon: "🔥",
        category: TitleCategory::Social,
        description: "다른 사람의 댓글에 달린 답글을 가장 많이 받은 사용자",
    },
    // === 참여 ===
    TitleDefinition {
        code: "first_shutter",
        name: "오늘의 첫 셔터",
        icon: "📷",
        category: TitleCategory::Participation,
        description: "당일 가장 먼저 사진 포스팅을 올린 사용자",
    },
    TitleDefinition {
        code: "perfect_attendance",
        name: "일일 접속 완벽주의자",
        icon: "🔁",
        category: TitleCategory::Participation,
        description: "3시간 간격으로 최소 5회 이상 앱에 접속한 사용자",
    },
    TitleDefinition {
        code: "last_minute_romantic",
        name: "시한부 낭만주의자",
        icon: "⏱️",
        category: TitleCategory::Participation,
        description: "24시간 혜택 종료 10분 전에 아슬아슬하게 미션을 완료",
    },
];
