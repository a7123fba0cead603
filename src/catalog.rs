//! Wardrobe catalog: loading, normalization and category lookups

use crate::error::{Result, StylistError};
use crate::types::{Category, Item};
use serde::Deserialize;
use indexmap::IndexSet;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

const BUILTIN_WARDROBE: &str = include_str!("../data/wardrobe.json");

/// Row as it appears on disk. Every field but `id` may be missing.
#[derive(Debug, Deserialize)]
struct RawItem {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    image: Option<String>,
}

impl RawItem {
    fn normalize(self) -> Item {
        let tags: IndexSet<String> = self
            .tags
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();

        Item {
            name: self.name.unwrap_or_else(|| self.id.clone()),
            category: self
                .category
                .as_deref()
                .map(Category::parse)
                .unwrap_or(Category::Unknown),
            tags,
            image: self.image.unwrap_or_default(),
            id: self.id,
        }
    }
}

/// Immutable in-memory item table
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from already-normalized items, rejecting duplicate ids
    pub fn new(items: Vec<Item>) -> Result<Self> {
        let mut index = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            if index.insert(item.id.clone(), pos).is_some() {
                return Err(StylistError::DuplicateItem(item.id.clone()));
            }
        }
        Ok(Self { items, index })
    }

    /// Parse a JSON array of item rows
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Vec<RawItem> = serde_json::from_str(json)?;
        let items: Vec<Item> = raw.into_iter().map(RawItem::normalize).collect();
        debug!("Parsed {} catalog rows", items.len());
        Self::new(items)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| StylistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        info!("Loaded {} items from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// The wardrobe table shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_WARDROBE)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    pub fn in_category(&self, category: Category) -> Vec<&Item> {
        self.items.iter().filter(|i| i.category == category).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_are_normalized() {
        let catalog = Catalog::from_json(
            r#"[
                {"id": "a1", "name": "plain"},
                {"id": "a2", "category": "Topwear", "tags": [" Red ", "COTTON", ""]},
                {"id": "a3", "category": "cape", "tags": []}
            ]"#,
        )
        .unwrap();

        let a1 = catalog.get("a1").unwrap();
        assert!(a1.tags.is_empty());
        assert_eq!(a1.category, Category::Unknown);

        let a2 = catalog.get("a2").unwrap();
        assert_eq!(a2.category, Category::Topwear);
        assert_eq!(a2.name, "a2");
        assert!(a2.has_tag("red"));
        assert!(a2.has_tag("cotton"));
        assert_eq!(a2.tags.len(), 2);
        assert_eq!(a2.tags.iter().collect::<Vec<_>>(), vec!["red", "cotton"]);

        assert_eq!(catalog.get("a3").unwrap().category, Category::Unknown);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Catalog::from_json(r#"[{"id": "x"}, {"id": "x"}]"#).unwrap_err();
        assert!(matches!(err, StylistError::DuplicateItem(id) if id == "x"));
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.len() > 150);
        for category in [
            Category::Topwear,
            Category::Bottomwear,
            Category::OnePiece,
            Category::Layer,
        ] {
            assert!(!catalog.in_category(category).is_empty(), "no {category} items");
        }
        assert!(catalog
            .items()
            .iter()
            .all(|i| i.category != Category::Unknown));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(StylistError::Json(_))
        ));
    }
}
