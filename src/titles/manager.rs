//! Daily title awarding, lookup and retention

use anyhow::Result;
use chrono::{DateTime, Days, Utc};

use super::checker::check_title_conditions;
use super::definitions::TitleDefinition;
use crate::config::TitleSettings;
use crate::domain::Post;
use crate::stats::{day_key, DayResolver, StatsAggregator};
use crate::store::{GamificationDb, Inserted, TitleRecord};

pub struct TitleManager {
    db: GamificationDb,
    settings: TitleSettings,
    days: DayResolver,
}

impl TitleManager {
    pub fn new(db: GamificationDb, settings: TitleSettings, days: DayResolver) -> Self {
        Self { db, settings, days }
    }

    fn record(&self, user: &str, title: &TitleDefinition, now: DateTime<Utc>) -> TitleRecord {
        let day = self.days.day_of(&now);
        TitleRecord {
            user_id: user.to_string(),
            day: day_key(day),
            code: title.code.to_string(),
            name: title.name.to_string(),
            icon: title.icon.to_string(),
            category: title.category.label().to_string(),
            description: title.description.to_string(),
            earned_at: now,
            expires_at: self.days.next_midnight(day),
        }
    }

    /// Award today's title to `user` if they qualify and hold none yet.
    ///
    /// Returns the newly stored title, or `None` when titles are disabled,
    /// nothing qualifies, or the user already has today's title.
    pub fn check_and_award(
        &self,
        posts: &[Post],
        user: &str,
        aggregator: &StatsAggregator,
        now: DateTime<Utc>,
    ) -> Result<Option<TitleRecord>> {
        if !self.settings.enabled {
            return Ok(None);
        }

        let today = self.days.day_of(&now);
        let Some(best) = check_title_conditions(posts, user, today, aggregator).into_iter().next() else {
            return Ok(None);
        };

        match self.db.insert_title_if_absent(&self.record(user, best, now))? {
            Inserted::New(title) => {
                tracing::info!(user, title = %title.name, "Daily title earned");
                Ok(Some(title))
            }
            Inserted::Existing | Inserted::Unverified => Ok(None),
        }
    }

    /// Distinct owners of non-mock posts, sorted, for a title refresh
    pub fn title_candidates<'a>(posts: &'a [Post], aggregator: &StatsAggregator) -> Vec<&'a str> {
        let mut users: Vec<&str> = posts
            .iter()
            .filter(|p| !aggregator.is_mock(p))
            .filter_map(Post::owner)
            .collect();
        users.sort_unstable();
        users.dedup();
        users
    }

    /// The user's title for today, unless it has expired
    pub fn current_title(&self, user: &str, now: DateTime<Utc>) -> Result<Option<TitleRecord>> {
        let today = day_key(self.days.day_of(&now));
        let title = self.db.title_for_day(user, &today)?;
        Ok(title.filter(|t| !t.is_expired(now)))
    }

    /// Titles awarded today, in award order
    pub fn todays_titles(&self, now: DateTime<Utc>) -> Result<Vec<TitleRecord>> {
        let today = day_key(self.days.day_of(&now));
        Ok(self
            .db
            .titles_for_day(&today)?
            .into_iter()
            .filter(|t| !t.is_expired(now))
            .collect())
    }

    /// Drop title history older than the retention window
    pub fn daily_reset(&self, now: DateTime<Utc>) -> Result<usize> {
        let today = self.days.day_of(&now);
        let cutoff = today
            .checked_sub_days(Days::new(u64::from(self.settings.retention_days)))
            .unwrap_or(today);
        let removed = self.db.prune_titles_before(&day_key(cutoff))?;
        if removed > 0 {
            tracing::info!(removed, "Pruned old daily titles");
        }
        Ok(removed)
    }
}
