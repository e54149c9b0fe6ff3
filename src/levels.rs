//! XP and Level system
//!
//! Defines level thresholds, titles, and XP rewards for uploads, badges
//! and daily titles.

use serde::Serialize;

use crate::badges::Difficulty;

/// Level definition
#[derive(Debug, Clone)]
pub struct Level {
    pub level: u32,
    pub xp_required: u32,
    pub title: &'static str,
}

/// All level definitions (must be sorted by level)
pub static LEVELS: &[Level] = &[
    Level {
        level: 1,
        xp_required: 0,
        title: "여행 새싹",
    },
    Level {
        level: 2,
        xp_required: 50,
        title: "초보 여행자",
    },
    Level {
        level: 3,
        xp_required: 150,
        title: "초보 여행자",
    },
    Level {
        level: 4,
        xp_required: 300,
        title: "여행 탐험가",
    },
    Level {
        level: 5,
        xp_required: 500,
        title: "여행 탐험가",
    },
    Level {
        level: 6,
        xp_required: 800,
        title: "베테랑 여행자",
    },
    Level {
        level: 7,
        xp_required: 1200,
        title: "베테랑 여행자",
    },
    Level {
        level: 8,
        xp_required: 1700,
        title: "여행 전문가",
    },
    Level {
        level: 9,
        xp_required: 2300,
        title: "여행 마스터",
    },
    Level {
        level: 10,
        xp_required: 3000,
        title: "여행 레전드",
    },
];

impl Level {
    /// Calculate level and title for given XP
    pub fn for_xp(xp: u32) -> &'static Level {
        LEVELS
            .iter()
            .rev()
            .find(|l| xp >= l.xp_required)
            .unwrap_or(&LEVELS[0])
    }

    /// Get XP needed for next level (None if max level)
    pub fn xp_for_next(current_level: u32) -> Option<u32> {
        LEVELS
            .iter()
            .find(|l| l.level == current_level + 1)
            .map(|l| l.xp_required)
    }
}

/// A user's XP standing
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerStats {
    pub total_xp: u32,
    pub level: u32,
    pub title: String,
    /// XP needed for current level
    pub current_level_xp: u32,
    /// XP needed for next level (None if max)
    pub next_level_xp: Option<u32>,
}

impl PlayerStats {
    pub fn new(total_xp: u32) -> Self {
        let level_info = Level::for_xp(total_xp);

        Self {
            total_xp,
            level: level_info.level,
            title: level_info.title.to_string(),
            current_level_xp: level_info.xp_required,
            next_level_xp: Level::xp_for_next(level_info.level),
        }
    }

    /// Progress to the next level (0.0 - 1.0)
    pub fn progress_to_next(&self) -> f32 {
        match self.next_level_xp {
            Some(next) => {
                let xp_in_level = self.total_xp - self.current_level_xp;
                let xp_for_level = next - self.current_level_xp;
                if xp_for_level == 0 {
                    1.0
                } else {
                    (xp_in_level as f32) / (xp_for_level as f32)
                }
            }
            None => 1.0,
        }
    }

    pub fn is_max_level(&self) -> bool {
        self.next_level_xp.is_none()
    }
}

/// A level up event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
    pub new_title: String,
}

impl LevelUp {
    /// Level change between two XP totals, if any
    pub fn between(old_xp: u32, new_xp: u32) -> Option<Self> {
        let old = Level::for_xp(old_xp);
        let new = Level::for_xp(new_xp);
        (new.level > old.level).then(|| Self {
            old_level: old.level,
            new_level: new.level,
            new_title: new.title.to_string(),
        })
    }
}

/// XP rewards for various actions
pub struct XpRewards;

impl XpRewards {
    /// XP for uploading a post
    pub const POST_UPLOAD: u32 = 10;

    /// XP for earning a daily title
    pub const DAILY_TITLE: u32 = 30;

    pub fn for_badge(difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Low => 20,
            Difficulty::Medium => 50,
            Difficulty::High => 100,
        }
    }
}
