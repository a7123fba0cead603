//! Core type definitions for outfit recommendation

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Garment slot an item fills within an outfit
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Topwear,
    Bottomwear,
    OnePiece,
    Layer,
    /// Catalog rows with a missing or unrecognized category
    Unknown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Topwear => "topwear",
            Category::Bottomwear => "bottomwear",
            Category::OnePiece => "one_piece",
            Category::Layer => "layer",
            Category::Unknown => "unknown",
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "topwear" => Category::Topwear,
            "bottomwear" => Category::Bottomwear,
            "one_piece" => Category::OnePiece,
            "layer" => Category::Layer,
            _ => Category::Unknown,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single wardrobe entry. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub category: Category,
    /// Lowercase, deduplicated, in catalog order
    pub tags: IndexSet<String>,
    pub image: String,
}

impl Item {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn has_any_tag(&self, tags: &[&str]) -> bool {
        tags.iter().any(|t| self.tags.contains(*t))
    }

    /// True when `value` equals one of the item's scalar fields (id, name,
    /// category or image reference).
    pub fn has_field_value(&self, value: &str) -> bool {
        self.id == value
            || self.name.to_lowercase() == value
            || self.category.as_str() == value
            || self.image == value
    }

    pub fn shares_tag_with(&self, tags: &BTreeSet<String>) -> bool {
        tags.iter().any(|t| self.tags.contains(t))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Winter,
    Summer,
    Monsoon,
    Autumn,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Summer => "summer",
            Season::Monsoon => "monsoon",
            Season::Autumn => "autumn",
        }
    }
}

/// Weather bucket. `Rainy` is never produced by the calendar resolver but
/// callers may construct it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    Cold,
    Hot,
    Humid,
    Pleasant,
    Rainy,
}

impl Weather {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Cold => "cold",
            Weather::Hot => "hot",
            Weather::Humid => "humid",
            Weather::Pleasant => "pleasant",
            Weather::Rainy => "rainy",
        }
    }
}

/// Situational context derived fresh for every request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub time_of_day: TimeOfDay,
    pub season: Season,
    pub weather: Weather,
    pub needs_layer: bool,
}

/// Keyword sets parsed from a prompt. Transient; discarded after the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementSet {
    pub required: BTreeSet<String>,
    pub preferred: BTreeSet<String>,
    pub forbidden: BTreeSet<String>,
}

impl RequirementSet {
    pub fn requires(&self, keyword: &str) -> bool {
        self.required.contains(keyword)
    }

    pub fn forbids(&self, keyword: &str) -> bool {
        self.forbidden.contains(keyword)
    }

    /// Same forbidden and preferred sets, no hard requirements. Used by the
    /// relaxation pass.
    pub fn relaxed(&self) -> Self {
        Self {
            required: BTreeSet::new(),
            preferred: self.preferred.clone(),
            forbidden: self.forbidden.clone(),
        }
    }
}

/// Prioritized occasion labels for one prompt (never empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occasions(Vec<String>);

impl Occasions {
    pub fn new(labels: Vec<String>) -> Self {
        if labels.is_empty() {
            Self(vec![GENERAL_OCCASION.to_string()])
        } else {
            Self(labels)
        }
    }

    pub fn single(label: &str) -> Self {
        Self(vec![label.to_string()])
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn primary(&self) -> &str {
        &self.0[0]
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }

    pub fn contains_any(&self, labels: &[&str]) -> bool {
        labels.iter().any(|l| self.contains(l))
    }

    /// Whether any label mentions one of `keywords` as a substring
    pub fn mentions_any(&self, keywords: &[&str]) -> bool {
        self.0.iter().any(|l| keywords.iter().any(|kw| l.contains(kw)))
    }

    /// Labels in tag form ("business meeting" -> "business_meeting")
    pub fn as_tags(&self) -> Vec<String> {
        self.0.iter().map(|l| l.replace(' ', "_")).collect()
    }

    pub fn joined(&self) -> String {
        self.0.join(" & ")
    }
}

impl fmt::Display for Occasions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

pub const GENERAL_OCCASION: &str = "general";

/// Qualitative description of how an outfit's colors combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorHarmony {
    #[serde(rename = "complementary")]
    Complementary,
    #[serde(rename = "monochromatic")]
    Monochromatic,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "analogous")]
    Analogous,
    #[serde(rename = "stylish combination")]
    Stylish,
}

/// A complete ensemble: one-piece (+layer) or top+bottom (+layer)
#[derive(Debug, Clone, Serialize)]
pub struct Outfit {
    #[serde(rename = "type")]
    pub kind: String,
    pub items: Vec<Item>,
    pub reason: String,
    pub score: i32,
    pub color_harmony: ColorHarmony,
}

impl Outfit {
    pub fn item_in(&self, category: Category) -> Option<&Item> {
        self.items.iter().find(|i| i.category == category)
    }

    pub fn has_layer(&self) -> bool {
        self.item_in(Category::Layer).is_some()
    }

    /// Union of all item tags
    pub fn tags(&self) -> BTreeSet<String> {
        self.items.iter().flat_map(|i| i.tags.iter().cloned()).collect()
    }
}

/// Result bundle for one request
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub occasion: String,
    pub outfits: Vec<Outfit>,
    pub context: Context,
}
