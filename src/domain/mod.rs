//! Core domain types for LiveJourney

mod category;
mod lenient;
mod post;
mod region;

pub use category::Category;
pub use lenient::{RawTimestamp, UserRef};
pub use post::{parse_timestamp, Post};
pub use region::{leading_token, RegionKey, RegionResolver, SuffixRegionResolver};
