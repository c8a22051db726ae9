use shared::domain::{CountKind, SortMode};

/// Translation lookup provided by the host. `None` means "no entry".
pub trait Translator {
    fn translate(&self, key: &str) -> Option<String>;
}

impl Translator for std::collections::HashMap<String, String> {
    fn translate(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Display labels for every sort mode, per count kind for the Count mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCatalog {
    pub canonical: String,
    pub alphabetical: String,
    pub price: String,
    pub color: String,
    pub shipped: String,
    pub caught: String,
    pub found: String,
    pub cooked: String,
}

impl Default for LabelCatalog {
    fn default() -> Self {
        Self {
            canonical: "Logical Sort".into(),
            alphabetical: "Alphabetical Sort".into(),
            price: "Price Sort".into(),
            color: "Color Sort".into(),
            shipped: "Shipped Sort".into(),
            caught: "Caught Sort".into(),
            found: "Found Sort".into(),
            cooked: "Cooked Sort".into(),
        }
    }
}

impl LabelCatalog {
    /// Re-resolves every label. Keys the translator lacks keep their current
    /// value, so a partial translation never blanks a label.
    pub fn refresh(&mut self, translator: &dyn Translator) {
        let fields = [
            ("sort-logical", &mut self.canonical),
            ("sort-alpha", &mut self.alphabetical),
            ("sort-price", &mut self.price),
            ("sort-color", &mut self.color),
            ("sort-shipped", &mut self.shipped),
            ("sort-caught", &mut self.caught),
            ("sort-found", &mut self.found),
            ("sort-cooked", &mut self.cooked),
        ];
        for (key, slot) in fields {
            if let Some(value) = translator.translate(key) {
                *slot = value;
            }
        }
    }

    pub fn count_label(&self, kind: CountKind) -> &str {
        match kind {
            CountKind::Shipped => &self.shipped,
            CountKind::Caught => &self.caught,
            CountKind::Found => &self.found,
            CountKind::Cooked => &self.cooked,
        }
    }

    /// The five labels of a category, indexed by [`SortMode::index`].
    pub fn mode_labels(&self, kind: CountKind) -> [String; SortMode::COUNT] {
        SortMode::ALL.map(|mode| match mode {
            SortMode::Canonical => self.canonical.clone(),
            SortMode::Alphabetical => self.alphabetical.clone(),
            SortMode::Price => self.price.clone(),
            SortMode::Count => self.count_label(kind).to_string(),
            SortMode::Color => self.color.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn count_label_follows_count_kind() {
        let labels = LabelCatalog::default();
        let fish = labels.mode_labels(CountKind::Caught);
        assert_eq!(fish[SortMode::Count.index()], "Caught Sort");
        assert_eq!(fish[SortMode::Canonical.index()], "Logical Sort");
    }

    #[test]
    fn refresh_keeps_labels_missing_from_translation() {
        let mut labels = LabelCatalog::default();
        let translations = HashMap::from([("sort-price".to_string(), "Nach Preis".to_string())]);
        labels.refresh(&translations);
        assert_eq!(labels.price, "Nach Preis");
        assert_eq!(labels.color, "Color Sort");
    }
}
