//! Daily titles: 24-hour honors recomputed each calendar day
//!
//! A user holds at most one title per day. Titles expire at the next
//! midnight and their history is pruned after the retention window.

mod checker;
mod definitions;
mod manager;

pub use checker::{check_title_conditions, DailyStats};
pub use definitions::{TitleCategory, TitleDefinition, DAILY_TITLES};
pub use manager::TitleManager;
