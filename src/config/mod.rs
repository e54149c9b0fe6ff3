//! Configuration loading and management

mod io;
mod settings;

pub(crate) use io::{acquire_lock, write_atomic};
pub use settings::{
    BadgeSettings, CustomBadge, OwnerlessPolicy, RegionTiers, Settings, TitleSettings,
};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,

    /// Badge catalog settings
    #[serde(default)]
    pub badges: BadgeSettings,

    /// Daily title settings
    #[serde(default)]
    pub titles: TitleSettings,
}

impl Config {
    /// Directory holding the post list and the gamification database
    pub fn data_dir(&self) -> PathBuf {
        self.settings
            .data_dir
            .clone()
            .unwrap_or_else(Self::global_config_dir)
    }

    /// Path of the uploaded-posts JSON file
    pub fn posts_path(&self) -> PathBuf {
        self.data_dir().join("posts.json")
    }

    /// Path of the gamification SQLite database
    pub fn db_path(&self) -> PathBuf {
        self.data_dir().join("gamification.db")
    }
}
