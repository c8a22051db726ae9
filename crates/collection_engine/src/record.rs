use std::collections::HashSet;

use crate::{
    color::{classify, ColorBucket, ColorOrder, TagMatcher},
    registry::CategoryDef,
};

/// One collected item as the host hands it over: an id and whatever visual
/// object the host wants back in the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawItem<H> {
    pub id: String,
    pub handle: H,
}

impl<H> RawItem<H> {
    pub fn new(id: impl Into<String>, handle: H) -> Self {
        Self {
            id: id.into(),
            handle,
        }
    }

    /// Builds an item from a host component label such as `"128 true"`;
    /// the id is the first whitespace-separated token.
    pub fn from_label(label: &str, handle: H) -> Option<Self> {
        label
            .split_whitespace()
            .next()
            .map(|id| Self::new(id, handle))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemMetadata {
    pub display_name: String,
    pub price: u32,
}

pub trait ItemCatalog {
    fn metadata(&self, id: &str) -> Option<ItemMetadata>;
    fn tags(&self, id: &str) -> HashSet<String>;
}

/// Category-specific tally: times shipped, caught, found or cooked.
pub trait CountSource {
    fn count(&self, category: &CategoryDef, id: &str) -> u32;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord<H> {
    pub id: String,
    pub name: String,
    pub price: u32,
    pub count: u32,
    pub color: ColorBucket,
    pub handle: H,
}

pub struct Aggregation<'a> {
    pub catalog: &'a dyn ItemCatalog,
    pub counts: &'a dyn CountSource,
    pub colors: &'a ColorOrder,
    pub matcher: &'a dyn TagMatcher,
}

impl Aggregation<'_> {
    pub fn record<H>(&self, category: &CategoryDef, raw: RawItem<H>) -> ItemRecord<H> {
        let (name, price) = match self.catalog.metadata(&raw.id) {
            Some(meta) => (meta.display_name, meta.price),
            None => (raw.id.clone(), 0),
        };
        let color = classify(&self.catalog.tags(&raw.id), self.colors, self.matcher);
        ItemRecord {
            count: self.counts.count(category, &raw.id),
            id: raw.id,
            name,
            price,
            color,
            handle: raw.handle,
        }
    }

    pub fn records<H, I>(&self, category: &CategoryDef, items: I) -> Vec<ItemRecord<H>>
    where
        I: IntoIterator<Item = RawItem<H>>,
    {
        items
            .into_iter()
            .map(|raw| self.record(category, raw))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use shared::domain::CountKind;

    use super::*;
    use crate::color::{StandardTagMatcher, DEFAULT_COLOR_KEY};

    struct Catalog;

    impl ItemCatalog for Catalog {
        fn metadata(&self, id: &str) -> Option<ItemMetadata> {
            (id == "128").then(|| ItemMetadata {
                display_name: "Pufferfish".into(),
                price: 200,
            })
        }

        fn tags(&self, id: &str) -> HashSet<String> {
            match id {
                "128" => HashSet::from(["color_yellow".to_string()]),
                _ => HashSet::new(),
            }
        }
    }

    struct Counts(HashMap<&'static str, u32>);

    impl CountSource for Counts {
        fn count(&self, _category: &CategoryDef, id: &str) -> u32 {
            self.0.get(id).copied().unwrap_or_default()
        }
    }

    fn fish() -> CategoryDef {
        CategoryDef::new(1, "fish", "fish", "fish_sorting.json", CountKind::Caught)
    }

    #[test]
    fn builds_record_from_metadata_and_counts() {
        let colors = ColorOrder::new(["color_red", "color_yellow"]);
        let aggregation = Aggregation {
            catalog: &Catalog,
            counts: &Counts(HashMap::from([("128", 3)])),
            colors: &colors,
            matcher: &StandardTagMatcher,
        };
        let record = aggregation.record(&fish(), RawItem::new("128", 'p'));
        assert_eq!(record.name, "Pufferfish");
        assert_eq!(record.price, 200);
        assert_eq!(record.count, 3);
        assert_eq!(record.color.rank, 1);
        assert_eq!(record.handle, 'p');
    }

    #[test]
    fn missing_metadata_falls_back_to_id_and_zero_price() {
        let colors = ColorOrder::new(["color_red"]);
        let aggregation = Aggregation {
            catalog: &Catalog,
            counts: &Counts(HashMap::new()),
            colors: &colors,
            matcher: &StandardTagMatcher,
        };
        let records = aggregation.records(&fish(), [RawItem::new("999", ())]);
        assert_eq!(records[0].name, "999");
        assert_eq!(records[0].price, 0);
        assert_eq!(records[0].count, 0);
        assert_eq!(records[0].color.key, DEFAULT_COLOR_KEY);
    }

    #[test]
    fn label_parsing_takes_first_token() {
        let item = RawItem::from_label("  372 true extra", 7).expect("item");
        assert_eq!(item.id, "372");
        assert!(RawItem::from_label("   ", 7).is_none());
    }
}
