//! Check command implementation

use anyhow::Result;

use super::{with_notifier, Context};

/// Evaluate badges for the current user and award anything newly earned
pub async fn check_command(ctx: &Context) -> Result<()> {
    let manager = ctx.open_manager()?;
    let events = with_notifier(manager, |m| Ok(m.check_and_award(&ctx.user)?)).await?;

    if events.is_empty() {
        println!("No new badges.");
    }
    Ok(())
}
