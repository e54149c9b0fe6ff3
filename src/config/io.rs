//! Configuration file I/O operations

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.livejourney/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".livejourney")
    }

    /// Get the global config file path (~/.livejourney/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a file with atomic write and file locking.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        write_atomic_locked(path, content.as_bytes())
    }

    /// Load global configuration from ~/.livejourney/config.toml
    /// If no config exists, auto-creates one with defaults.
    pub fn load() -> Result<Self> {
        let global_path = Self::global_config_path();

        if !global_path.exists() {
            Self::auto_init(&global_path)?;
        }

        Self::from_file(&global_path)
    }

    /// Load from an explicit path when given, otherwise the global config
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Auto-initialize configuration when no config exists
    ///
    /// Uses file locking so concurrent first runs do not race.
    fn auto_init(config_path: &Path) -> Result<()> {
        let lock_file = acquire_lock(config_path)?;

        // Re-check after acquiring the lock (another process may have created it)
        if config_path.exists() {
            return Ok(());
        }

        let content = toml::to_string_pretty(&Self::default())
            .with_context(|| "Failed to serialize default config")?;
        write_atomic(config_path, content.as_bytes())?;

        tracing::info!("Created {}", config_path.display());
        drop(lock_file);
        Ok(())
    }
}

/// Write `content` to `path` under an exclusive lock file, via temp file + rename.
///
/// 1. Exclusive lock prevents concurrent writes from separate processes
/// 2. Atomic write (temp file + rename) prevents corruption on crash
/// 3. Parent directory is created if needed
fn write_atomic_locked(path: &Path, content: &[u8]) -> Result<()> {
    let lock_file = acquire_lock(path)?;
    write_atomic(path, content)?;
    // Lock is released when lock_file is dropped
    drop(lock_file);
    Ok(())
}

/// Take the exclusive `<path>.lock` lock, creating parent directories first.
/// The lock is held until the returned file is dropped.
pub(crate) fn acquire_lock(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    // Lock file is separate from the target to avoid issues with rename
    let lock_path = with_suffix(path, "lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .with_context(|| format!("Failed to acquire lock: {}", lock_path.display()))?;

    Ok(lock_file)
}

/// Temp file + fsync + rename. Callers hold the lock from [`acquire_lock`].
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let temp_path = with_suffix(path, "tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;

    temp_file
        .sync_all()
        .with_context(|| format!("Failed to sync {}", temp_path.display()))?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename into place: {}", path.display()))?;

    Ok(())
}

/// `config.toml` -> `config.toml.lock`
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.settings.current_user = "U7".to_string();
        config.badges.excluded_regions.push("독도".to_string());
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.settings.current_user, "U7");
        assert!(loaded.badges.is_region_excluded("독도"));
        assert!(!dir.path().join("nested").join("config.toml.tmp").exists());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(Config::from_file(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_with_suffix() {
        assert_eq!(
            with_suffix(Path::new("/a/posts.json"), "lock"),
            PathBuf::from("/a/posts.json.lock")
        );
    }
}
