use std::collections::BTreeMap;

use shared::domain::{CategoryId, CountKind, SortMode};
use tracing::{debug, warn};

use crate::labels::{LabelCatalog, Translator};

/// Where canonical and color order lists come from.
pub trait OrderSource {
    fn canonical_order(&self, def: &CategoryDef) -> anyhow::Result<Vec<String>>;
    fn color_patterns(&self) -> anyhow::Result<Vec<String>>;
}

/// Static description of a category before its order list is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDef {
    pub id: CategoryId,
    pub simple_name: String,
    /// Translation key of the category's display name.
    pub label_key: String,
    pub order_file: String,
    pub count_kind: CountKind,
}

impl CategoryDef {
    pub fn new(
        id: i64,
        simple_name: &str,
        label_key: &str,
        order_file: &str,
        count_kind: CountKind,
    ) -> Self {
        Self {
            id: CategoryId(id),
            simple_name: simple_name.into(),
            label_key: label_key.into(),
            order_file: order_file.into(),
            count_kind,
        }
    }
}

pub fn default_categories() -> Vec<CategoryDef> {
    vec![
        CategoryDef::new(
            0,
            "items",
            "Strings\\UI:Collections_Shipped",
            "item_sorting.json",
            CountKind::Shipped,
        ),
        CategoryDef::new(
            1,
            "fish",
            "Strings\\UI:Collections_Fish",
            "fish_sorting.json",
            CountKind::Caught,
        ),
        CategoryDef::new(
            2,
            "artifacts",
            "Strings\\UI:Collections_Artifacts",
            "artifact_sorting.json",
            CountKind::Found,
        ),
        CategoryDef::new(
            3,
            "minerals",
            "Strings\\UI:Collections_Minerals",
            "mineral_sorting.json",
            CountKind::Found,
        ),
        CategoryDef::new(
            4,
            "cooking",
            "Strings\\UI:Collections_Cooking",
            "cooking_sorting.json",
            CountKind::Cooked,
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryConfig {
    pub def: CategoryDef,
    pub translated_name: String,
    pub canonical_order: Vec<String>,
    pub mode_labels: [String; SortMode::COUNT],
}

impl CategoryConfig {
    pub fn id(&self) -> CategoryId {
        self.def.id
    }

    pub fn simple_name(&self) -> &str {
        &self.def.simple_name
    }

    pub fn mode_label(&self, mode: SortMode) -> &str {
        &self.mode_labels[mode.index()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    categories: BTreeMap<CategoryId, CategoryConfig>,
}

impl CategoryRegistry {
    pub fn load(defs: Vec<CategoryDef>, source: &dyn OrderSource, labels: &LabelCatalog) -> Self {
        let mut categories = BTreeMap::new();
        for def in defs {
            let canonical_order = load_canonical_order(&def, source);
            let config = CategoryConfig {
                translated_name: def.simple_name.clone(),
                mode_labels: labels.mode_labels(def.count_kind),
                canonical_order,
                def,
            };
            categories.insert(config.id(), config);
        }
        Self { categories }
    }

    pub fn get(&self, id: CategoryId) -> Option<&CategoryConfig> {
        self.categories.get(&id)
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.categories.contains_key(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.categories.keys().copied()
    }

    pub fn find_by_name(&self, simple_name: &str) -> Option<&CategoryConfig> {
        self.categories
            .values()
            .find(|config| config.simple_name().eq_ignore_ascii_case(simple_name))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Re-resolves display names and mode labels after a locale change.
    pub fn refresh_labels(&mut self, labels: &LabelCatalog, translator: &dyn Translator) {
        for config in self.categories.values_mut() {
            if let Some(name) = translator.translate(&config.def.label_key) {
                config.translated_name = name;
            }
            config.mode_labels = labels.mode_labels(config.def.count_kind);
        }
    }
}

fn load_canonical_order(def: &CategoryDef, source: &dyn OrderSource) -> Vec<String> {
    match source.canonical_order(def) {
        Ok(order) if order.is_empty() => {
            warn!(
                category = %def.simple_name,
                file = %def.order_file,
                "canonical order is empty; category keeps its original order"
            );
            Vec::new()
        }
        Ok(order) => {
            debug!(category = %def.simple_name, ids = order.len(), "loaded canonical order");
            order
        }
        Err(error) => {
            warn!(
                category = %def.simple_name,
                file = %def.order_file,
                error = %format!("{error:#}"),
                "failed to load canonical order; category keeps its original order"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
