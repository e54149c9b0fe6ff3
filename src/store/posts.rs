//! Uploaded-post list stored as a JSON array (newest first)
//!
//! The file is shared with the upload screen, so entries are rewritten as
//! raw JSON values and fields this crate does not model are preserved.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::config::{acquire_lock, write_atomic};
use crate::domain::Post;

#[derive(Debug, Error)]
pub enum PostStoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a JSON array of posts: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no space left to store posts")]
    StorageFull,

    #[error(transparent)]
    Write(#[from] anyhow::Error),
}

pub struct PostStore {
    path: PathBuf,
}

impl PostStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All posts. A missing file is an empty list; entries that are not
    /// JSON objects are skipped.
    pub fn load(&self) -> Result<Vec<Post>, PostStoreError> {
        let raw = self.load_raw()?;
        let total = raw.len();
        let posts: Vec<Post> = raw
            .into_iter()
            .filter_map(|value| match serde_json::from_value(value) {
                Ok(post) => Some(post),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable post entry");
                    None
                }
            })
            .collect();
        tracing::debug!(path = %self.path.display(), total, loaded = posts.len(), "Loaded posts");
        Ok(posts)
    }

    /// Persist a new post at the head of the list.
    ///
    /// Returns once the file has been replaced on disk, so stats computed
    /// afterwards always include the post.
    pub fn append(&self, post: &Post) -> Result<(), PostStoreError> {
        let value = serde_json::to_value(post).map_err(|e| PostStoreError::Write(e.into()))?;

        let lock = acquire_lock(&self.path).map_err(classify_write_error)?;
        let mut raw = self.load_raw()?;
        raw.insert(0, value);
        let content = serde_json::to_vec_pretty(&raw).map_err(|e| PostStoreError::Write(e.into()))?;
        write_atomic(&self.path, &content).map_err(classify_write_error)?;
        drop(lock);

        tracing::info!(id = post.id.as_deref().unwrap_or("-"), path = %self.path.display(), "Saved post");
        Ok(())
    }

    fn load_raw(&self) -> Result<Vec<Value>, PostStoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(PostStoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let values: Vec<Value> =
            serde_json::from_str(&content).map_err(|source| PostStoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        Ok(values.into_iter().filter(Value::is_object).collect())
    }
}

fn classify_write_error(err: anyhow::Error) -> PostStoreError {
    let full = err
        .downcast_ref::<std::io::Error>()
        .is_some_and(|e| e.kind() == ErrorKind::StorageFull);
    if full {
        PostStoreError::StorageFull
    } else {
        PostStoreError::Write(err)
    }
}
