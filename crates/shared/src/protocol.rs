use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{CategoryId, SortMode};

/// Target of a directional move from a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum NeighborLink {
    /// Page-local index of another slot. May point past the last slot of a
    /// partially filled final row; hosts treat that as "stay".
    Slot(usize),
    /// Host-defined focus id supplied through the sentinels.
    External(i64),
}

impl NeighborLink {
    /// Flattens the link to the host's integer focus-id space.
    pub fn as_focus_id(self) -> i64 {
        match self {
            NeighborLink::Slot(index) => index as i64,
            NeighborLink::External(id) => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbors {
    pub up: NeighborLink,
    pub down: NeighborLink,
    pub left: NeighborLink,
    pub right: NeighborLink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot<H> {
    pub index: usize,
    pub row: usize,
    pub column: usize,
    pub item_id: String,
    pub handle: H,
    pub bounds: Bounds,
    pub neighbors: Neighbors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<H> {
    pub slots: Vec<Slot<H>>,
}

impl<H> Page<H> {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Two-line hover text for a category tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLabel {
    pub title: String,
    pub mode_label: String,
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.title, self.mode_label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryView<H> {
    pub category: CategoryId,
    pub mode: SortMode,
    pub pages: Vec<Page<H>>,
    pub status: StatusLabel,
    /// Set when this view follows a mode change; the host should jump back
    /// to the first page.
    pub mode_changed: bool,
}

impl<H> CategoryView<H> {
    pub fn slot_count(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_label_renders_two_lines() {
        let label = StatusLabel {
            title: "Fish".into(),
            mode_label: "Caught Sort".into(),
        };
        assert_eq!(label.to_string(), "Fish\nCaught Sort");
    }

    #[test]
    fn neighbor_link_flattens_to_focus_id() {
        assert_eq!(NeighborLink::Slot(11).as_focus_id(), 11);
        assert_eq!(NeighborLink::External(-7777).as_focus_id(), -7777);
    }

    #[test]
    fn neighbor_link_uses_tagged_json() {
        let raw = serde_json::to_value(NeighborLink::External(7001)).expect("serialize");
        assert_eq!(raw["type"], "external");
        assert_eq!(raw["value"], 7001);
    }
}
