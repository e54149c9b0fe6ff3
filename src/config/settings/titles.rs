//! Daily title settings

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleSettings {
    /// Award 24-hour titles after each upload
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Days of title history kept before the daily reset prunes it
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

fn default_enabled() -> bool {
    true
}

fn default_retention_days() -> u32 {
    7
}

impl Default for TitleSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            retention_days: default_retention_days(),
        }
    }
}
