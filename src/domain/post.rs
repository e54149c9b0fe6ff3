//! Travel post record as written by the upload screen

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::category::Category;
use super::lenient::{self, RawTimestamp, UserRef};
use super::region::{leading_token, RegionKey, RegionResolver};

/// A single travel post.
///
/// Every field is optional in storage; accessors resolve fallbacks and
/// degrade to empty values on malformed input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default, deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::user", skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRef>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub detailed_location: Option<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,

    #[serde(default, deserialize_with = "lenient::count")]
    pub likes: u64,

    #[serde(default, deserialize_with = "lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<RawTimestamp>,

    #[serde(default, deserialize_with = "lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<RawTimestamp>,

    #[serde(default, deserialize_with = "lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub time: Option<RawTimestamp>,

    #[serde(default, deserialize_with = "lenient::strings")]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(default, deserialize_with = "lenient::strings")]
    pub ai_labels: Vec<String>,

    #[serde(default, deserialize_with = "lenient::values", skip_serializing_if = "Vec::is_empty")]
    pub qna_list: Vec<Value>,
}

impl Post {
    /// Create a post for the given owner, stamped now, with a fresh local id
    pub fn new_local(user_id: &str, location: &str) -> Self {
        Self {
            id: Some(format!("local-{}", uuid::Uuid::new_v4())),
            user_id: Some(user_id.to_string()),
            location: Some(location.to_string()),
            detailed_location: Some(location.to_string()),
            timestamp: Some(RawTimestamp::Text(Utc::now().to_rfc3339())),
            ..Self::default()
        }
    }

    /// Resolve the owner: `userId`, else `user.id`, else the raw `user` string
    pub fn owner(&self) -> Option<&str> {
        if let Some(id) = self.user_id.as_deref() {
            return Some(id);
        }
        match &self.user {
            Some(UserRef::Object { id: Some(id) }) => Some(id.as_str()),
            Some(UserRef::Name(name)) => Some(name.as_str()),
            _ => None,
        }
    }

    /// True when the record carries no ownership field at all
    pub fn is_ownerless(&self) -> bool {
        self.owner().is_none()
    }

    /// Demo records generated by the client use well-known id prefixes
    pub fn is_mock(&self, prefixes: &[String]) -> bool {
        match self.id.as_deref() {
            Some(id) => prefixes.iter().any(|p| !p.is_empty() && id.starts_with(p.as_str())),
            None => false,
        }
    }

    /// Region of the post: explicit `region`, else the first token of
    /// `location`, else of `detailedLocation`
    pub fn region_key(&self, resolver: &dyn RegionResolver) -> Option<RegionKey> {
        if let Some(region) = self.region.as_deref().and_then(|r| resolver.resolve(r)) {
            return Some(region);
        }
        [self.location.as_deref(), self.detailed_location.as_deref()]
            .into_iter()
            .flatten()
            .filter_map(leading_token)
            .find_map(|token| resolver.resolve(token))
    }

    /// Explicit category code, else inferred from the display label
    pub fn category(&self) -> Option<Category> {
        self.category
            .as_deref()
            .and_then(Category::from_code)
            .or_else(|| self.category_name.as_deref().and_then(Category::from_label))
    }

    /// Creation instant from `timestamp`, `createdAt` or `time` (first parseable)
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        [&self.timestamp, &self.created_at, &self.time]
            .into_iter()
            .flatten()
            .find_map(parse_timestamp)
    }

    /// Number of comments (Q&A entries) on the post
    pub fn comment_count(&self) -> usize {
        self.qna_list.len()
    }

    /// Free text searched for daily-title keywords: the note plus AI labels
    pub fn text_fragments(&self) -> impl Iterator<Item = &str> {
        self.note
            .as_deref()
            .into_iter()
            .chain(self.ai_labels.iter().map(String::as_str))
    }
}

/// Parse a stored timestamp. Naive date-times are taken as UTC.
pub fn parse_timestamp(raw: &RawTimestamp) -> Option<DateTime<FixedOffset>> {
    match raw {
        RawTimestamp::Millis(ms) => DateTime::from_timestamp_millis(*ms).map(|dt| dt.fixed_offset()),
        RawTimestamp::Text(text) => {
            let text = text.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
                return Some(dt);
            }
            for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
                if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                    return Some(naive.and_utc().fixed_offset());
                }
            }
            text.parse::<i64>()
                .ok()
                .and_then(DateTime::from_timestamp_millis)
                .map(|dt| dt.fixed_offset())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::region::SuffixRegionResolver;
    use serde_json::json;

    fn post(value: Value) -> Post {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_owner_resolution_order() {
        let p = post(json!({"userId": "u1", "user": {"id": "u2"}}));
        assert_eq!(p.owner(), Some("u1"));

        let p = post(json!({"user": {"id": "u2", "username": "모사모"}}));
        assert_eq!(p.owner(), Some("u2"));

        let p = post(json!({"user": "u3"}));
        assert_eq!(p.owner(), Some("u3"));

        let p = post(json!({"userId": 42}));
        assert_eq!(p.owner(), Some("42"));

        let p = post(json!({"location": "서울"}));
        assert!(p.is_ownerless());
    }

    #[test]
    fn test_region_fallbacks() {
        let resolver = SuffixRegionResolver;
        let p = post(json!({"region": "부산광역시", "location": "서울 강남구"}));
        assert_eq!(p.region_key(&resolver).unwrap().as_str(), "부산");

        let p = post(json!({"location": "서울특별시 강남구"}));
        assert_eq!(p.region_key(&resolver).unwrap().as_str(), "서울");

        let p = post(json!({"location": "", "detailedLocation": "제주 애월읍"}));
        assert_eq!(p.region_key(&resolver).unwrap().as_str(), "제주");

        let p = post(json!({"tags": ["바다"]}));
        assert!(p.region_key(&resolver).is_none());
    }

    #[test]
    fn test_category_inferred_from_label() {
        let p = post(json!({"categoryName": "맛집 정보"}));
        assert_eq!(p.category(), Some(Category::Food));

        let p = post(json!({"category": "bloom", "categoryName": "맛집 정보"}));
        assert_eq!(p.category(), Some(Category::Bloom));

        let p = post(json!({"category": "unknown"}));
        assert_eq!(p.category(), None);
    }

    #[test]
    fn test_malformed_fields_degrade() {
        let p = post(json!({
            "likes": "many",
            "tags": "not-a-list",
            "timestamp": "yesterday",
            "qnaList": {"a": 1}
        }));
        assert_eq!(p.likes, 0);
        assert!(p.tags.is_empty());
        assert!(p.created_at().is_none());
        assert_eq!(p.comment_count(), 0);
    }

    #[test]
    fn test_timestamp_formats() {
        let p = post(json!({"timestamp": "2025-03-01T09:30:00.000Z"}));
        assert_eq!(p.created_at().unwrap().timestamp(), 1_740_821_400);

        let p = post(json!({"time": 1_740_821_400_000i64}));
        assert_eq!(p.created_at().unwrap().timestamp(), 1_740_821_400);

        let p = post(json!({"timestamp": "bad", "createdAt": "2025-03-01 09:30:00"}));
        assert_eq!(p.created_at().unwrap().timestamp(), 1_740_821_400);
    }

    #[test]
    fn test_mock_prefix() {
        let prefixes = vec!["mock-".to_string()];
        assert!(post(json!({"id": "mock-17"})).is_mock(&prefixes));
        assert!(!post(json!({"id": "local-17"})).is_mock(&prefixes));
        assert!(!post(json!({})).is_mock(&prefixes));
    }
}
