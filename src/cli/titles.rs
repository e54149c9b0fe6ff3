//! Titles command implementation

use anyhow::Result;
use chrono::Utc;

use livejourney::badges::GamificationEvent;

use super::{with_notifier, Context};

/// Show today's daily titles
pub async fn titles_command(ctx: &Context, refresh: bool, all: bool) -> Result<()> {
    let now = Utc::now();

    if refresh {
        let events = with_notifier(ctx.open_manager()?, |m| Ok(m.refresh_titles(now)?)).await?;
        let awarded = events
            .iter()
            .filter(|e| matches!(e, GamificationEvent::DailyTitleEarned(_)))
            .count();
        println!("Awarded {awarded} new titles.\n");
    }

    let manager = ctx.open_manager()?;
    let titles = manager.titles();

    if all {
        let today = titles.todays_titles(now)?;
        if today.is_empty() {
            println!("No titles today.");
            return Ok(());
        }
        for title in &today {
            println!("  {} {:<20} {}", title.icon, title.name, title.user_id);
        }
        return Ok(());
    }

    match titles.current_title(&ctx.user, now)? {
        Some(title) => {
            println!("{} {} ({})", title.icon, title.name, title.category);
            println!("  {}", title.description);
            println!("  Expires {}", title.expires_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"));
        }
        None => println!("No title today."),
    }

    Ok(())
}
