//! Region keys and region resolution
//!
//! Posts carry free-text place strings ("서울특별시 강남구 역삼동", "제주 애월읍").
//! Badge rules and region counters are keyed by a canonical [`RegionKey`]
//! resolved once per post, never by a display-string template.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Administrative suffixes removed from the leading place token.
/// Longest first so "특별자치시" is not partially matched.
static ADMIN_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(특별자치시|특별자치도|특별시|광역시)$").expect("valid suffix regex")
});

/// Canonical region identifier (e.g. `서울`, `제주`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionKey(String);

impl RegionKey {
    /// Build a key from an already-canonical name. Returns `None` for blank input.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolves a raw place token to its canonical region
pub trait RegionResolver: Send + Sync {
    fn resolve(&self, token: &str) -> Option<RegionKey>;
}

/// Default resolver: strips Korean administrative suffixes from the token.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixRegionResolver;

impl RegionResolver for SuffixRegionResolver {
    fn resolve(&self, token: &str) -> Option<RegionKey> {
        let token = token.trim();
        let stripped = ADMIN_SUFFIX.replace(token, "");
        RegionKey::new(stripped.into_owned())
    }
}

/// First whitespace-delimited token of a place string
pub fn leading_token(place: &str) -> Option<&str> {
    place.split_whitespace().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_admin_suffixes() {
        let resolver = SuffixRegionResolver;
        assert_eq!(resolver.resolve("서울특별시").unwrap().as_str(), "서울");
        assert_eq!(resolver.resolve("부산광역시").unwrap().as_str(), "부산");
        assert_eq!(resolver.resolve("세종특별자치시").unwrap().as_str(), "세종");
        assert_eq!(resolver.resolve("제주특별자치도").unwrap().as_str(), "제주");
        assert_eq!(resolver.resolve("강릉").unwrap().as_str(), "강릉");
    }

    #[test]
    fn test_blank_tokens_do_not_resolve() {
        let resolver = SuffixRegionResolver;
        assert!(resolver.resolve("   ").is_none());
        assert!(resolver.resolve("특별시").is_none());
    }

    #[test]
    fn test_leading_token() {
        assert_eq!(leading_token("서울 강남구 역삼동"), Some("서울"));
        assert_eq!(leading_token("  제주  "), Some("제주"));
        assert_eq!(leading_token(""), None);
    }
}
