//! SQLite database connection and schema management for gamification state
//!
//! Manages `gamification.db` in the data directory with automatic schema
//! migration. All writes go through one connection behind a mutex, so
//! insert-if-absent operations are atomic within the process and the
//! `PRIMARY KEY` constraints keep them atomic across processes.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, ErrorCode, OptionalExtension};
use thiserror::Error;

use super::models::{from_millis, to_millis, EarnedBadge, TitleRecord};
use crate::badges::{BadgeCode, BadgeDefinition, Difficulty};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database or disk is full")]
    Full,

    #[error("database lock poisoned")]
    Poisoned,

    #[error(transparent)]
    Sqlite(rusqlite::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::DiskFull) => Self::Full,
            _ => Self::Sqlite(err),
        }
    }
}

/// Outcome of an insert-if-absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inserted<T> {
    /// The row was written and read back
    New(T),
    /// A row with the same key already existed; nothing was written
    Existing,
    /// The write reported success but the row could not be read back
    Unverified,
}

/// Database wrapper shared between managers
#[derive(Clone)]
pub struct GamificationDb {
    conn: Arc<Mutex<Connection>>,
}

impl GamificationDb {
    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open gamification db: {}", path.display()))?;

        // Wait on concurrent writers instead of failing with SQLITE_BUSY
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        // WAL so the CLI can read while another process awards
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        Self::from_connection(conn)
    }

    /// In-memory database, used by tests and dry runs
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory db")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Initialize the database schema
    fn init_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA_SQL)?;
        drop(conn);
        self.run_migrations()?;
        Ok(())
    }

    /// Run any pending migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        let version: i32 = conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))
            .unwrap_or(0);

        // Migration 2: daily titles
        if version < 2 {
            conn.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS daily_titles (
                    user_id TEXT NOT NULL,
                    day TEXT NOT NULL,              -- YYYY-MM-DD on the configured calendar
                    code TEXT NOT NULL,
                    name TEXT NOT NULL,
                    icon TEXT NOT NULL,
                    category TEXT NOT NULL,
                    description TEXT NOT NULL DEFAULT '',
                    earned_at INTEGER NOT NULL,
                    expires_at INTEGER NOT NULL,
                    PRIMARY KEY (user_id, day)
                );
                CREATE INDEX IF NOT EXISTS idx_daily_titles_day ON daily_titles(day);
                "#,
            )?;
            conn.execute("INSERT OR REPLACE INTO schema_version VALUES (2)", [])?;
        }

        Ok(())
    }

    // ========================================
    // BADGES
    // ========================================

    /// Record a badge for a user unless it is already recorded.
    ///
    /// Insert and read-back happen under the connection lock, so concurrent
    /// callers for the same (user, code) see exactly one `New`.
    pub fn insert_badge_if_absent(
        &self,
        user_id: &str,
        badge: &BadgeDefinition,
        earned_at: DateTime<Utc>,
    ) -> Result<Inserted<EarnedBadge>, StoreError> {
        let conn = self.conn()?;
        let changed = conn.execute(
            r#"
            INSERT OR IGNORE INTO earned_badges
                (user_id, code, name, icon, difficulty, description, earned_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            (
                user_id,
                badge.code.as_str(),
                &*badge.name,
                &*badge.icon,
                badge.difficulty.as_str(),
                &*badge.description,
                to_millis(earned_at),
            ),
        )?;

        if changed == 0 {
            return Ok(Inserted::Existing);
        }

        let stored: Option<i64> = conn
            .query_row(
                "SELECT earned_at FROM earned_badges WHERE user_id = ?1 AND code = ?2",
                (user_id, badge.code.as_str()),
                |r| r.get(0),
            )
            .optional()?;

        match stored {
            Some(ms) if ms == to_millis(earned_at) => {
                Ok(Inserted::New(EarnedBadge::new(user_id, badge, earned_at)))
            }
            _ => Ok(Inserted::Unverified),
        }
    }

    /// Badges earned by a user, oldest first
    pub fn earned_badges(&self, user_id: &str) -> Result<Vec<EarnedBadge>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT code, name, icon, difficulty, description, earned_at
            FROM earned_badges WHERE user_id = ?1
            ORDER BY earned_at, rowid
            "#,
        )?;
        let badges = stmt
            .query_map([user_id], |row| {
                let difficulty: String = row.get(3)?;
                Ok(EarnedBadge {
                    user_id: user_id.to_string(),
                    code: BadgeCode::new(row.get::<_, String>(0)?),
                    name: row.get(1)?,
                    icon: row.get(2)?,
                    difficulty: Difficulty::from_str(&difficulty).unwrap_or(Difficulty::Low),
                    description: row.get(4)?,
                    earned_at: from_millis(row.get(5)?),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(badges)
    }

    pub fn earned_codes(&self, user_id: &str) -> Result<HashSet<BadgeCode>> {
        Ok(self.earned_times(user_id)?.into_keys().collect())
    }

    /// Earned badge codes with the time each was earned
    pub fn earned_times(&self, user_id: &str) -> Result<HashMap<BadgeCode, DateTime<Utc>>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT code, earned_at FROM earned_badges WHERE user_id = ?1")?;
        let times = stmt
            .query_map([user_id], |row| {
                Ok((BadgeCode::new(row.get::<_, String>(0)?), from_millis(row.get(1)?)))
            })?
            .collect::<rusqlite::Result<HashMap<_, _>>>()?;
        Ok(times)
    }

    pub fn badge_count(&self, user_id: &str) -> Result<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM earned_badges WHERE user_id = ?1",
            [user_id],
            |r| r.get(0),
        )?;
        Ok(count as usize)
    }

    // ========================================
    // SEEN TRACKING
    // ========================================

    /// Returns true if the badge was not marked seen before
    pub fn mark_seen(&self, user_id: &str, code: &str, at: DateTime<Utc>) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "INSERT OR IGNORE INTO seen_badges (user_id, code, seen_at) VALUES (?1, ?2, ?3)",
            (user_id, code, to_millis(at)),
        )?;
        Ok(changed > 0)
    }

    pub fn has_seen(&self, user_id: &str, code: &str) -> Result<bool> {
        let conn = self.conn()?;
        let seen = conn
            .query_row(
                "SELECT 1 FROM seen_badges WHERE user_id = ?1 AND code = ?2",
                (user_id, code),
                |_| Ok(()),
            )
            .optional()?;
        Ok(seen.is_some())
    }

    // ========================================
    // PROFILE
    // ========================================

    pub fn join_date(&self, user_id: &str) -> Result<Option<DateTime<Utc>>> {
        let conn = self.conn()?;
        let ms: Option<i64> = conn
            .query_row(
                "SELECT join_date FROM user_profile WHERE user_id = ?1",
                [user_id],
                |r| r.get(0),
            )
            .optional()?;
        Ok(ms.map(from_millis))
    }

    /// Stored join date, recording `now` first if none exists
    pub fn ensure_join_date(&self, user_id: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "INSERT OR IGNORE INTO user_profile (user_id, join_date) VALUES (?1, ?2)",
            (user_id, to_millis(now)),
        )?;
        if changed > 0 {
            tracing::info!(user = user_id, "Recorded join date");
        }
        let ms: i64 = conn.query_row(
            "SELECT join_date FROM user_profile WHERE user_id = ?1",
            [user_id],
            |r| r.get(0),
        )?;
        Ok(from_millis(ms))
    }

    // ========================================
    // XP
    // ========================================

    pub fn total_xp(&self, user_id: &str) -> Result<u32> {
        let conn = self.conn()?;
        let xp: Option<u32> = conn
            .query_row(
                "SELECT total_xp FROM player_stats WHERE user_id = ?1",
                [user_id],
                |r| r.get(0),
            )
            .optional()?;
        Ok(xp.unwrap_or(0))
    }

    /// Add XP and return (old total, new total).
    ///
    /// One upsert statement, so concurrent writers on the same file never
    /// overwrite each other's increments.
    pub fn add_xp(&self, user_id: &str, amount: u32) -> Result<(u32, u32)> {
        let conn = self.conn()?;
        let new: u32 = conn.query_row(
            r#"
            INSERT INTO player_stats (user_id, total_xp, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(user_id) DO UPDATE
                SET total_xp = total_xp + excluded.total_xp, updated_at = excluded.updated_at
            RETURNING total_xp
            "#,
            (user_id, amount, to_millis(Utc::now())),
            |r| r.get(0),
        )?;
        Ok((new.saturating_sub(amount), new))
    }

    // ========================================
    // DAILY TITLES
    // ========================================

    /// Store a title unless the user already holds one for that day
    pub fn insert_title_if_absent(&self, title: &TitleRecord) -> Result<Inserted<TitleRecord>> {
        let conn = self.conn()?;
        let changed = conn.execute(
            r#"
            INSERT OR IGNORE INTO daily_titles
                (user_id, day, code, name, icon, category, description, earned_at, expires_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            (
                &title.user_id,
                &title.day,
                &title.code,
                &title.name,
                &title.icon,
                &title.category,
                &title.description,
                to_millis(title.earned_at),
                to_millis(title.expires_at),
            ),
        )?;
        if changed == 0 {
            return Ok(Inserted::Existing);
        }
        Ok(Inserted::New(title.clone()))
    }

    pub fn title_for_day(&self, user_id: &str, day: &str) -> Result<Option<TitleRecord>> {
        let conn = self.conn()?;
        let title = conn
            .query_row(
                &format!("{TITLE_COLUMNS} WHERE user_id = ?1 AND day = ?2"),
                (user_id, day),
                title_from_row,
            )
            .optional()?;
        Ok(title)
    }

    /// All titles awarded on a day, in award order
    pub fn titles_for_day(&self, day: &str) -> Result<Vec<TitleRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{TITLE_COLUMNS} WHERE day = ?1 ORDER BY earned_at"))?;
        let titles = stmt
            .query_map([day], title_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(titles)
    }

    /// Delete title rows for days before `day`. Returns the number removed.
    pub fn prune_titles_before(&self, day: &str) -> Result<usize> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM daily_titles WHERE day < ?1", [day])?;
        Ok(removed)
    }
}

const TITLE_COLUMNS: &str = "SELECT user_id, day, code, name, icon, category, description, earned_at, expires_at FROM daily_titles";

fn title_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TitleRecord> {
    Ok(TitleRecord {
        user_id: row.get(0)?,
        day: row.get(1)?,
        code: row.get(2)?,
        name: row.get(3)?,
        icon: row.get(4)?,
        category: row.get(5)?,
        description: row.get(6)?,
        earned_at: from_millis(row.get(7)?),
        expires_at: from_millis(row.get(8)?),
    })
}

/// SQL schema for the gamification database
const SCHEMA_SQL: &str = r#"
-- Earned badges (one row per user and badge code, never updated)
CREATE TABLE IF NOT EXISTS earned_badges (
    user_id TEXT NOT NULL,
    code TEXT NOT NULL,
    name TEXT NOT NULL,
    icon TEXT NOT NULL,
    difficulty TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    earned_at INTEGER NOT NULL,
    PRIMARY KEY (user_id, code)
);
CREATE INDEX IF NOT EXISTS idx_earned_user ON earned_badges(user_id, earned_at);

-- Badges whose celebration the user has already seen
CREATE TABLE IF NOT EXISTS seen_badges (
    user_id TEXT NOT NULL,
    code TEXT NOT NULL,
    seen_at INTEGER NOT NULL,
    PRIMARY KEY (user_id, code)
);

-- First-seen date per user
CREATE TABLE IF NOT EXISTS user_profile (
    user_id TEXT PRIMARY KEY,
    join_date INTEGER NOT NULL
);

-- XP per user
CREATE TABLE IF NOT EXISTS player_stats (
    user_id TEXT PRIMARY KEY,
    total_xp INTEGER NOT NULL DEFAULT 0,
    updated_at INTEGER
);

-- Schema version
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
INSERT OR IGNORE INTO schema_version VALUES (1);
"#;
