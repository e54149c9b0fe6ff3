//! Stats command implementation

use anyhow::Result;
use serde_json::json;

use super::Context;

/// Show aggregated statistics and XP level for the current user
pub async fn stats_command(ctx: &Context, json: bool) -> Result<()> {
    let manager = ctx.open_manager()?;
    let report = manager.user_stats(&ctx.user)?;
    let player = manager.player_stats(&ctx.user)?;
    let stats = &report.stats;

    if json {
        let out = json!({
            "user": ctx.user,
            "stats": stats,
            "player": player,
            "quarantined": report.quarantined,
            "skippedMock": report.skipped_mock,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{} - Lv.{} {} ({} XP)", ctx.user, player.level, player.title, player.total_xp);
    if !player.is_max_level() {
        println!("  {:.0}% to next level", player.progress_to_next() * 100.0);
    }
    println!();
    println!("  Posts:            {}", stats.total_posts);
    println!("  Likes:            {}", stats.total_likes);
    println!("  Regions visited:  {}", stats.visited_regions);
    println!("  Longest streak:   {} days", stats.consecutive_days);
    if let Some(joined) = stats.join_date {
        println!("  Joined:           {}", joined.format("%Y-%m-%d"));
    }

    if !stats.region_order.is_empty() {
        println!("\n  Regions:");
        for region in &stats.region_order {
            println!("    {:<10} {}", region.as_str(), stats.region_count(region));
        }
    }

    if !stats.category_posts.is_empty() {
        println!("\n  Categories:");
        for (category, count) in &stats.category_posts {
            println!("    {:<10} {}", category.label(), count);
        }
    }

    if report.quarantined > 0 {
        println!("\n  {} posts without an owner were left out", report.quarantined);
    }

    Ok(())
}
