//! Init command implementation

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use livejourney::config::Config;

/// Default configuration content for livejourney init
pub const DEFAULT_CONFIG: &str = r#"# LiveJourney Configuration
# =========================

# ============================================================================
# SETTINGS
# ============================================================================
#
#   current_user        - User to act as when --user is not given
#   data_dir            - Directory holding posts.json and gamification.db
#                         (default: ~/.livejourney)
#   ownerless_posts     - "attribute" counts posts without an owner for the
#                         current user; "quarantine" leaves them out
#   mock_id_prefixes    - Post ids starting with these are demo records
#   utc_offset_minutes  - Fixed calendar offset for day boundaries
#                         (default: the machine's local timezone)

[settings]
current_user = "test_user_001"
ownerless_posts = "attribute"
mock_id_prefixes = ["mock-"]
# utc_offset_minutes = 540

# ============================================================================
# BADGES
# ============================================================================
#
# Every region you post in gets three generated badges. Thresholds are
# post counts within that region.

[badges]
excluded_regions = []
early_adopter_window_days = 7

[badges.region_tiers]
scout = 5
ambassador = 10
honorary_citizen = 20

# Extra badges. Codes are stored as "custom:<code>".
#
# [[badges.custom]]
# code = "food_master"
# name = "미식 마스터"
# icon = "🍱"
# difficulty = "high"
# description = "30개 이상의 맛집을 소개했습니다!"
# condition = { kind = "category_posts_at_least", category = "food", target = 30 }

# ============================================================================
# DAILY TITLES
# ============================================================================

[titles]
enabled = true
retention_days = 7
"#;

/// Write the default config file
pub async fn init_command(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("Created: {}", config_path.display());

    Ok(())
}
