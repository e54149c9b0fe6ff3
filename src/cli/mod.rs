//! CLI command implementations

pub mod badges;
pub mod check;
pub mod init;
pub mod post;
pub mod seen;
pub mod stats;
pub mod titles;

use anyhow::{Context as _, Result};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use livejourney::badges::{BadgeManager, EventReceiver, GamificationEvent};
use livejourney::config::Config;

/// Loaded config plus the user the command acts for
pub struct Context {
    pub config: Config,
    pub user: String,
}

impl Context {
    pub fn new(config: Config, user: Option<String>) -> Self {
        let user = user.unwrap_or_else(|| config.settings.current_user.clone());
        Self { config, user }
    }

    pub fn open_manager(&self) -> Result<BadgeManager> {
        BadgeManager::open(&self.config).with_context(|| {
            format!("Failed to open data directory: {}", self.config.data_dir().display())
        })
    }
}

/// Print events as they are published until the bus closes.
/// Resolves to the number of events printed.
pub fn spawn_notifier(mut rx: EventReceiver) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut printed = 0;
        loop {
            match rx.recv().await {
                Ok(event) => {
                    println!("{}", describe_event(&event));
                    printed += 1;
                }
                Err(RecvError::Lagged(n)) => {
                    tracing::warn!("Notifier lagged, {} events dropped", n);
                }
                Err(RecvError::Closed) => break,
            }
        }
        printed
    })
}

pub fn describe_event(event: &GamificationEvent) -> String {
    match event {
        GamificationEvent::BadgeEarned(badge) => format!(
            "🎉 배지 획득: {} {} [{}] - {}",
            badge.icon,
            badge.name,
            badge.difficulty.symbol(),
            badge.description
        ),
        GamificationEvent::XpAwarded { amount, reason } => format!("✨ +{} XP ({})", amount, reason),
        GamificationEvent::LevelUp(level_up) => format!(
            "⬆️  레벨 업! Lv.{} → Lv.{} {}",
            level_up.old_level, level_up.new_level, level_up.new_title
        ),
        GamificationEvent::DailyTitleEarned(title) => {
            format!("👑 오늘의 타이틀: {} {} - {}", title.icon, title.name, title.description)
        }
    }
}

/// Run a pipeline step with a live notifier attached, then wait for it to drain
pub async fn with_notifier<T>(
    manager: BadgeManager,
    run: impl FnOnce(&BadgeManager) -> Result<T>,
) -> Result<T> {
    let notifier = spawn_notifier(manager.subscribe());
    let result = run(&manager);
    // Dropping the manager closes the bus so the notifier finishes
    drop(manager);
    let printed = notifier.await.context("Notifier task failed")?;
    tracing::debug!(printed, "Notifications delivered");
    result
}
