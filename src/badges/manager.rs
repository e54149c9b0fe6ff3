//! Badge Manager - Core gamification logic
//!
//! Ties the pipeline together: posts are loaded from the post store,
//! aggregated, checked against the catalog, and newly earned badges are
//! persisted, rewarded with XP and announced on the event bus.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::catalog::BadgeCatalog;
use super::checker::{badge_progress, check_new_badges, BadgeProgress};
use super::definitions::{BadgeCode, BadgeDefinition};
use super::events::{BadgeNotification, EventBus, EventReceiver, GamificationEvent};
use crate::config::{BadgeSettings, Config};
use crate::domain::Post;
use crate::levels::{LevelUp, PlayerStats, XpRewards};
use crate::stats::{AggregateReport, StatsAggregator, UserStats};
use crate::store::{
    EarnedBadge, GamificationDb, Inserted, PostStore, PostStoreError, StoreError,
};
use crate::titles::TitleManager;

#[derive(Debug, Error)]
pub enum BadgeError {
    /// Storage rejected the write; retrying later may succeed
    #[error("storage is full, badge state was not saved")]
    StorageFull,

    #[error("storage error: {0}")]
    Storage(#[source] anyhow::Error),

    /// The write reported success but the stored row did not match
    #[error("badge {0} could not be verified after writing")]
    VerificationFailed(BadgeCode),
}

impl From<StoreError> for BadgeError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Full => Self::StorageFull,
            other => Self::Storage(other.into()),
        }
    }
}

impl From<PostStoreError> for BadgeError {
    fn from(err: PostStoreError) -> Self {
        match err {
            PostStoreError::StorageFull => Self::StorageFull,
            other => Self::Storage(other.into()),
        }
    }
}

impl From<anyhow::Error> for BadgeError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<StoreError>() {
            Ok(store) => return store.into(),
            Err(err) => err,
        };
        match err.downcast::<rusqlite::Error>() {
            Ok(sqlite) => StoreError::from(sqlite).into(),
            Err(other) => Self::Storage(other),
        }
    }
}

/// Result of a single award attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AwardOutcome {
    Awarded(EarnedBadge),
    AlreadyAwarded,
}

/// A user's badge standing: the catalog built from their stats plus what they hold
pub struct BadgeOverview {
    pub stats: UserStats,
    pub catalog: BadgeCatalog,
    pub earned: HashMap<BadgeCode, DateTime<Utc>>,
}

impl BadgeOverview {
    /// Every catalog badge with earned flag and progress (`getAvailableBadges`)
    pub fn progress(&self) -> Vec<BadgeProgress<'_>> {
        badge_progress(&self.catalog, &self.stats, &self.earned)
    }
}

/// Main manager for all gamification features
pub struct BadgeManager {
    db: GamificationDb,
    posts: PostStore,
    badges: BadgeSettings,
    aggregator: StatsAggregator,
    titles: TitleManager,
    events: EventBus,
}

impl BadgeManager {
    pub fn new(db: GamificationDb, posts: PostStore, config: &Config) -> Self {
        let aggregator = StatsAggregator::from_config(config);
        let titles = TitleManager::new(db.clone(), config.titles.clone(), aggregator.day_resolver());
        Self {
            db,
            posts,
            badges: config.badges.clone(),
            aggregator,
            titles,
            events: EventBus::default(),
        }
    }

    /// Open the database and post store in the configured data directory
    pub fn open(config: &Config) -> anyhow::Result<Self> {
        let db = GamificationDb::open(&config.db_path())?;
        let posts = PostStore::new(config.posts_path());
        Ok(Self::new(db, posts, config))
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn db(&self) -> &GamificationDb {
        &self.db
    }

    pub fn post_store(&self) -> &PostStore {
        &self.posts
    }

    pub fn titles(&self) -> &TitleManager {
        &self.titles
    }

    pub fn aggregator(&self) -> &StatsAggregator {
        &self.aggregator
    }

    fn emit(&self, events: &mut Vec<GamificationEvent>, event: GamificationEvent) {
        self.events.publish(event.clone());
        events.push(event);
    }

    // ========================================
    // AWARDING
    // ========================================

    /// Persist a badge for `user` unless already held.
    ///
    /// The duplicate check and the write are one atomic insert, so racing
    /// callers for the same badge see exactly one `Awarded`.
    pub fn award_badge(
        &self,
        user: &str,
        badge: &BadgeDefinition,
    ) -> Result<AwardOutcome, BadgeError> {
        match self.db.insert_badge_if_absent(user, badge, Utc::now())? {
            Inserted::New(earned) => {
                tracing::info!(user, code = %earned.code, name = %earned.name, "Badge earned");
                Ok(AwardOutcome::Awarded(earned))
            }
            Inserted::Existing => {
                tracing::debug!(user, code = %badge.code, "Badge already awarded");
                Ok(AwardOutcome::AlreadyAwarded)
            }
            Inserted::Unverified => {
                tracing::warn!(user, code = %badge.code, "Badge write could not be verified");
                Err(BadgeError::VerificationFailed(badge.code.clone()))
            }
        }
    }

    /// Add XP and report the award plus any level up
    fn grant_xp(
        &self,
        user: &str,
        amount: u32,
        reason: String,
        events: &mut Vec<GamificationEvent>,
    ) -> Result<(), BadgeError> {
        if amount == 0 {
            return Ok(());
        }
        let (old_xp, new_xp) = self.db.add_xp(user, amount)?;
        tracing::debug!(user, amount, total = new_xp, "XP awarded");
        self.emit(events, GamificationEvent::XpAwarded { amount, reason });

        if let Some(level_up) = LevelUp::between(old_xp, new_xp) {
            tracing::info!(user, level = level_up.new_level, title = %level_up.new_title, "Level up");
            self.emit(events, GamificationEvent::LevelUp(level_up));
        }
        Ok(())
    }

    /// Stats for `user` from the current post list, persisting the join date on first use
    pub fn user_stats(&self, user: &str) -> Result<AggregateReport, BadgeError> {
        let posts = self.posts.load()?;
        self.aggregate(&posts, user)
    }

    fn aggregate(&self, posts: &[Post], user: &str) -> Result<AggregateReport, BadgeError> {
        let joined = self.db.ensure_join_date(user, Utc::now())?;
        let report = self.aggregator.aggregate(posts, user, Some(joined));
        if report.quarantined > 0 {
            tracing::warn!(user, count = report.quarantined, "Ownerless posts excluded from stats");
        }
        Ok(report)
    }

    /// Evaluate the catalog for `user` and award everything newly earned.
    ///
    /// Badges are awarded in catalog order, each with its own XP grant.
    /// A badge whose write fails is skipped for this pass and retried on
    /// the next one; the rest of the catalog is still awarded.
    pub fn check_and_award(&self, user: &str) -> Result<Vec<GamificationEvent>, BadgeError> {
        let posts = self.posts.load()?;
        self.check_posts(&posts, user)
    }

    fn check_posts(&self, posts: &[Post], user: &str) -> Result<Vec<GamificationEvent>, BadgeError> {
        let stats = self.aggregate(posts, user)?.stats;
        let catalog = BadgeCatalog::build(&stats, &self.badges);
        let earned: HashSet<BadgeCode> = self.db.earned_codes(user)?;

        let mut events = Vec::new();
        for badge in check_new_badges(&catalog, &stats, &earned) {
            let record = match self.award_badge(user, badge) {
                Ok(AwardOutcome::Awarded(record)) => record,
                Ok(AwardOutcome::AlreadyAwarded) => continue,
                Err(e) => {
                    tracing::warn!(user, code = %badge.code, error = %e, "Badge not awarded this pass");
                    continue;
                }
            };
            self.emit(
                &mut events,
                GamificationEvent::BadgeEarned(BadgeNotification::from(&record)),
            );
            let reason = format!("배지 획득: {}", record.name);
            self.grant_xp(user, XpRewards::for_badge(record.difficulty), reason, &mut events)?;
        }
        Ok(events)
    }

    /// Award today's title to `user` from `posts`, with its XP
    fn award_daily_title(
        &self,
        posts: &[Post],
        user: &str,
        now: DateTime<Utc>,
        events: &mut Vec<GamificationEvent>,
    ) -> Result<(), BadgeError> {
        if let Some(title) = self.titles.check_and_award(posts, user, &self.aggregator, now)? {
            let reason = format!("오늘의 타이틀: {}", title.name);
            self.emit(events, GamificationEvent::DailyTitleEarned(title));
            self.grant_xp(user, XpRewards::DAILY_TITLE, reason, events)?;
        }
        Ok(())
    }

    /// Persist a new post, then reward and evaluate.
    ///
    /// The post is written before anything is evaluated, so the checks
    /// always see it.
    pub fn record_post(&self, post: &Post) -> Result<Vec<GamificationEvent>, BadgeError> {
        let user = post
            .owner()
            .ok_or_else(|| BadgeError::Storage(anyhow::anyhow!("post has no owner")))?
            .to_string();

        self.posts.append(post)?;
        let posts = self.posts.load()?;

        let mut events = Vec::new();
        self.grant_xp(&user, XpRewards::POST_UPLOAD, "게시물 업로드".to_string(), &mut events)?;
        self.award_daily_title(&posts, &user, Utc::now(), &mut events)?;

        events.extend(self.check_posts(&posts, &user)?);
        Ok(events)
    }

    /// Prune old titles, then award today's title to every user who posted
    pub fn refresh_titles(&self, now: DateTime<Utc>) -> Result<Vec<GamificationEvent>, BadgeError> {
        self.titles.daily_reset(now)?;
        let posts = self.posts.load()?;

        let mut events = Vec::new();
        for user in TitleManager::title_candidates(&posts, &self.aggregator) {
            self.award_daily_title(&posts, user, now, &mut events)?;
        }
        Ok(events)
    }

    // ========================================
    // QUERIES
    // ========================================

    pub fn earned_badges(&self, user: &str) -> Result<Vec<EarnedBadge>, BadgeError> {
        Ok(self.db.earned_badges(user)?)
    }

    pub fn available_badges(&self, user: &str) -> Result<BadgeOverview, BadgeError> {
        let stats = self.user_stats(user)?.stats;
        let catalog = BadgeCatalog::build(&stats, &self.badges);
        let earned = self.db.earned_times(user)?;
        Ok(BadgeOverview {
            stats,
            catalog,
            earned,
        })
    }

    pub fn player_stats(&self, user: &str) -> Result<PlayerStats, BadgeError> {
        Ok(PlayerStats::new(self.db.total_xp(user)?))
    }

    /// Record that the user has seen a badge's notification. Returns false if already seen.
    pub fn mark_seen(&self, user: &str, code: &str) -> Result<bool, BadgeError> {
        Ok(self.db.mark_seen(user, code, Utc::now())?)
    }

    pub fn has_seen(&self, user: &str, code: &str) -> Result<bool, BadgeError> {
        Ok(self.db.has_seen(user, code)?)
    }

    /// Earned badges whose notification has not been seen yet
    pub fn unseen_badges(&self, user: &str) -> Result<Vec<EarnedBadge>, BadgeError> {
        let mut unseen = Vec::new();
        for badge in self.earned_badges(user)? {
            if !self.has_seen(user, badge.code.as_str())? {
                unseen.push(badge);
            }
        }
        Ok(unseen)
    }
}
