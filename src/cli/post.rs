//! Post command implementation

use anyhow::{bail, Result};

use livejourney::domain::{Category, Post};

use super::{with_notifier, Context};

/// Record a post for the current user and run the upload rewards
pub async fn post_command(
    ctx: &Context,
    location: &str,
    category: Option<String>,
    note: Option<String>,
    tags: Vec<String>,
) -> Result<()> {
    let mut post = Post::new_local(&ctx.user, location);

    if let Some(code) = category {
        let Some(category) = Category::from_code(&code) else {
            bail!("Unknown category: {} (expected scenic, food or bloom)", code);
        };
        post.category = Some(category.as_str().to_string());
        post.category_name = Some(category.label().to_string());
    }
    post.note = note;
    post.tags = tags;

    let manager = ctx.open_manager()?;
    let events = with_notifier(manager, |m| Ok(m.record_post(&post)?)).await?;

    println!(
        "Posted {} ({} events)",
        post.id.as_deref().unwrap_or("-"),
        events.len()
    );
    Ok(())
}
