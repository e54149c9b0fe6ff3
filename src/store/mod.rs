//! Persistence: the gamification database and the uploaded-post list

mod db;
mod models;
mod posts;

pub use db::{GamificationDb, Inserted, StoreError};
pub use models::{EarnedBadge, TitleRecord};
pub use posts::{PostStore, PostStoreError};
