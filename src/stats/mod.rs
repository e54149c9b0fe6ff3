//! User statistics derived from the post history
//!
//! # Usage
//!
//! ```ignore
//! let aggregator = StatsAggregator::from_config(&config);
//! let report = aggregator.aggregate(&posts, "U1", join_date);
//! println!("{} posts in {} regions", report.stats.total_posts, report.stats.visited_regions);
//! ```

mod aggregator;
mod day;
mod streaks;

pub use aggregator::{AggregateReport, StatsAggregator, UserStats};
pub use day::{day_key, DayResolver};
pub use streaks::consecutive_days;
