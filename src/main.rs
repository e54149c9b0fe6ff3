use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use livejourney::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "livejourney")]
#[command(about = "LiveJourney - badges, daily titles and levels for your travel posts")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.livejourney/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// User to act as (defaults to settings.current_user)
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show aggregated post statistics and level
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate badges and award anything newly earned
    Check,

    /// List badges
    Badges {
        /// Include unearned badges with progress
        #[arg(short, long)]
        all: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record a new post, then award XP, titles and badges
    Post {
        /// Location, e.g. "제주 애월읍"
        location: String,

        /// Category code: scenic, food or bloom
        #[arg(long)]
        category: Option<String>,

        /// Free-text note
        #[arg(long)]
        note: Option<String>,

        /// Tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Show daily titles
    Titles {
        /// Award titles to everyone who posted today before listing
        #[arg(long)]
        refresh: bool,

        /// List every title held today, not only your own
        #[arg(short, long)]
        all: bool,
    },

    /// Mark badge notifications as seen
    Seen {
        /// Badge codes to mark; lists unseen badges when empty
        codes: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        config,
        user,
        verbose,
        command,
    } = Cli::parse();

    // Initialize logging
    let log_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    // Every command except init runs against a loaded config
    let context = || -> Result<cli::Context> {
        let loaded = Config::load_from(config.as_deref())?;
        Ok(cli::Context::new(loaded, user.clone()))
    };

    match command {
        Commands::Init { force } => cli::init::init_command(config.clone(), force).await?,
        Commands::Stats { json } => cli::stats::stats_command(&context()?, json).await?,
        Commands::Check => cli::check::check_command(&context()?).await?,
        Commands::Badges { all, json } => cli::badges::badges_command(&context()?, all, json).await?,
        Commands::Post {
            location,
            category,
            note,
            tags,
        } => cli::post::post_command(&context()?, &location, category, note, tags).await?,
        Commands::Titles { refresh, all } => {
            cli::titles::titles_command(&context()?, refresh, all).await?
        }
        Commands::Seen { codes } => cli::seen::seen_command(&context()?, &codes).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_parses_with_global_flags() {
        let cli = Cli::try_parse_from(["livejourney", "init", "--force", "-c", "/tmp/lj.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::Init { force: true }));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/lj.toml")));
    }
}
