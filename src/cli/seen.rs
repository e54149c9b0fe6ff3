//! Seen command implementation

use anyhow::Result;

use super::Context;

/// Mark badge notifications as seen, or list unseen ones
pub async fn seen_command(ctx: &Context, codes: &[String]) -> Result<()> {
    let manager = ctx.open_manager()?;

    if codes.is_empty() {
        let unseen = manager.unseen_badges(&ctx.user)?;
        if unseen.is_empty() {
            println!("No unseen badges.");
        }
        for badge in &unseen {
            println!("  {} {} ({})", badge.icon, badge.name, badge.code);
        }
        return Ok(());
    }

    for code in codes {
        if manager.mark_seen(&ctx.user, code)? {
            println!("Marked {} as seen", code);
        } else {
            println!("{} was already seen", code);
        }
    }
    Ok(())
}
