//! JSON stand-in for the host game's item registry and player stats.

use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
};

use anyhow::Context;
use collection_engine::{CategoryDef, CountSource, ItemCatalog, ItemMetadata, RawItem};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub items: HashMap<String, ItemEntry>,
    /// Collection entries keyed by category simple name.
    #[serde(default)]
    pub collections: HashMap<String, Vec<CollectedEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemEntry {
    pub name: String,
    #[serde(default)]
    pub price: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectedEntry {
    /// Host component label; the item id is its first token.
    pub label: String,
    #[serde(default)]
    pub count: u32,
}

impl Inventory {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read inventory '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse inventory '{}'", path.display()))
    }

    /// Raw items of one category; the label doubles as the visual handle.
    pub fn raw_items(&self, category: &CategoryDef) -> Vec<RawItem<String>> {
        let Some(entries) = self.collections.get(&category.simple_name) else {
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|entry| {
                let item = RawItem::from_label(&entry.label, entry.label.clone());
                if item.is_none() {
                    warn!(category = %category.simple_name, "skipping entry with blank label");
                }
                item
            })
            .collect()
    }
}

impl ItemCatalog for Inventory {
    fn metadata(&self, id: &str) -> Option<ItemMetadata> {
        self.items.get(id).map(|entry| ItemMetadata {
            display_name: entry.name.clone(),
            price: entry.price,
        })
    }

    fn tags(&self, id: &str) -> HashSet<String> {
        self.items
            .get(id)
            .map(|entry| entry.tags.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl CountSource for Inventory {
    fn count(&self, category: &CategoryDef, id: &str) -> u32 {
        self.collections
            .get(&category.simple_name)
            .and_then(|entries| {
                entries
                    .iter()
                    .find(|entry| entry.label.split_whitespace().next() == Some(id))
            })
            .map(|entry| entry.count)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use collection_engine::default_categories;

    use super::*;

    const SAMPLE: &str = r#"{
        "items": {
            "128": { "name": "Pufferfish", "price": 200, "tags": ["color_yellow"] },
            "129": { "name": "Anchovy", "price": 30 }
        },
        "collections": {
            "fish": [
                { "label": "128 true", "count": 2 },
                { "label": "129", "count": 7 },
                { "label": "   " }
            ]
        }
    }"#;

    fn fish() -> CategoryDef {
        default_categories()
            .into_iter()
            .find(|def| def.simple_name == "fish")
            .expect("fish")
    }

    #[test]
    fn raw_items_parse_ids_from_labels() {
        let inventory: Inventory = serde_json::from_str(SAMPLE).expect("inventory");
        let items = inventory.raw_items(&fish());
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "128");
        assert_eq!(items[0].handle, "128 true");
    }

    #[test]
    fn counts_and_metadata_come_from_entries() {
        let inventory: Inventory = serde_json::from_str(SAMPLE).expect("inventory");
        assert_eq!(inventory.count(&fish(), "129"), 7);
        assert_eq!(inventory.count(&fish(), "130"), 0);
        let meta = inventory.metadata("128").expect("meta");
        assert_eq!(meta.price, 200);
        assert!(inventory.tags("128").contains("color_yellow"));
        assert!(inventory.tags("129").is_empty());
    }

    #[test]
    fn categories_without_entries_are_empty() {
        let inventory: Inventory = serde_json::from_str(SAMPLE).expect("inventory");
        let cooking = default_categories()
            .into_iter()
            .find(|def| def.simple_name == "cooking")
            .expect("cooking");
        assert!(inventory.raw_items(&cooking).is_empty());
    }
}
