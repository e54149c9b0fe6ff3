//! Settings configuration types

mod badges;
mod titles;

pub use badges::{BadgeSettings, CustomBadge, RegionTiers};
pub use titles::TitleSettings;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How posts without any ownership field are attributed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerlessPolicy {
    /// Treat ownerless posts as belonging to the active user
    #[default]
    Attribute,
    /// Exclude ownerless posts from statistics and report them
    Quarantine,
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Active session user. Used when no `--user` is given on the command line.
    #[serde(default = "default_current_user")]
    pub current_user: String,

    /// Directory holding `posts.json` and `gamification.db`.
    /// Defaults to the global config directory (~/.livejourney/).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub ownerless_posts: OwnerlessPolicy,

    /// Post id prefixes marking client-generated demo records
    #[serde(default = "default_mock_id_prefixes")]
    pub mock_id_prefixes: Vec<String>,

    /// Fixed UTC offset used to decide which calendar day a post falls on.
    /// When unset, the machine's local timezone is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

fn default_current_user() -> String {
    "test_user_001".to_string()
}

fn default_mock_id_prefixes() -> Vec<String> {
    vec!["mock-".to_string()]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            current_user: default_current_user(),
            data_dir: None,
            ownerless_posts: OwnerlessPolicy::default(),
            mock_id_prefixes: default_mock_id_prefixes(),
            utc_offset_minutes: None,
        }
    }
}
