//! Shared test utilities for badge pipeline tests

#![allow(dead_code)]

use std::fs;

use serde_json::Value;
use tempfile::TempDir;

use livejourney::badges::BadgeManager;
use livejourney::config::Config;

/// A data directory with its own config, post list and database
pub struct TestEnv {
    pub dir: TempDir,
    pub config: Config,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut config = Config::default();
        config.settings.data_dir = Some(dir.path().to_path_buf());
        config.settings.utc_offset_minutes = Some(9 * 60);
        Self { dir, config }
    }

    /// Replace the post list with the given JSON array
    pub fn write_posts(&self, posts: Value) {
        fs::write(self.config.posts_path(), posts.to_string()).expect("Failed to write posts");
    }

    pub fn manager(&self) -> BadgeManager {
        BadgeManager::open(&self.config).expect("Failed to open manager")
    }
}

/// `count` posts by `user` in `location`, one per day starting 2025-03-01
pub fn posts_in(user: &str, location: &str, count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            serde_json::json!({
                "id": format!("local-{user}-{location}-{i}"),
                "userId": user,
                "location": location,
                "timestamp": format!("2025-03-{:02}T03:00:00Z", (i % 28) + 1),
            })
        })
        .collect()
}
