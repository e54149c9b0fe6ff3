//! Badges command implementation

use anyhow::Result;

use super::Context;

/// List earned badges, or the whole catalog with progress
pub async fn badges_command(ctx: &Context, all: bool, json: bool) -> Result<()> {
    let manager = ctx.open_manager()?;

    if !all {
        let earned = manager.earned_badges(&ctx.user)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&earned)?);
            return Ok(());
        }
        if earned.is_empty() {
            println!("No badges yet.");
            return Ok(());
        }
        println!("Badges ({}):\n", earned.len());
        for badge in &earned {
            println!(
                "  {} {} [{}]  {}",
                badge.icon,
                badge.name,
                badge.difficulty.symbol(),
                badge.earned_at.format("%Y-%m-%d")
            );
        }
        return Ok(());
    }

    let overview = manager.available_badges(&ctx.user)?;
    let listing = overview.progress();
    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    let earned = listing.iter().filter(|p| p.earned).count();
    println!("Badges {}/{}:\n", earned, listing.len());
    for entry in &listing {
        let mark = if entry.earned { "✔" } else { " " };
        println!(
            "  {} {} {:<20} [{}] {:>3}%  {}",
            mark,
            entry.badge.icon,
            entry.badge.name,
            entry.badge.difficulty.symbol(),
            entry.progress,
            entry.badge.condition.dimension().label()
        );
    }

    Ok(())
}
