//! Post categories

use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed three-way post category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Recommended places (추천 장소)
    Scenic,
    /// Restaurants and cafes (맛집 정보)
    Food,
    /// Flower bloom status (개화 상황)
    Bloom,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scenic => "scenic",
            Self::Food => "food",
            Self::Bloom => "bloom",
        }
    }

    /// Parse the stored category code
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "scenic" => Some(Self::Scenic),
            "food" => Some(Self::Food),
            "bloom" => Some(Self::Bloom),
            _ => None,
        }
    }

    /// Infer the category from its display label
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "추천 장소" => Some(Self::Scenic),
            "맛집 정보" => Some(Self::Food),
            "개화 상황" => Some(Self::Bloom),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Scenic => "추천 장소",
            Self::Food => "맛집 정보",
            Self::Bloom => "개화 상황",
        }
    }

    pub fn all() -> &'static [Category] {
        &[Self::Scenic, Self::Food, Self::Bloom]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
