use shared::domain::{CycleDirection, SortMode};

use crate::record::ItemRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryState<H> {
    pub mode: SortMode,
    pub records: Vec<ItemRecord<H>>,
}

impl<H> Default for CategoryState<H> {
    fn default() -> Self {
        Self {
            mode: SortMode::default(),
            records: Vec::new(),
        }
    }
}

pub fn step(mode: SortMode, direction: CycleDirection) -> SortMode {
    let len = SortMode::COUNT;
    let next = match direction {
        CycleDirection::Forward => (mode.index() + 1) % len,
        CycleDirection::Backward => (mode.index() + len - 1) % len,
    };
    SortMode::from_index(next)
}

pub fn advance<H>(state: &mut CategoryState<H>, direction: CycleDirection) -> SortMode {
    state.mode = step(state.mode, direction);
    state.mode
}
