use std::collections::BTreeMap;

use shared::{
    domain::{CategoryId, CycleDirection, HostTrigger, SortMode},
    error::EngineError,
    protocol::{CategoryView, StatusLabel},
};
use tracing::{debug, debug_span, error, warn};

pub mod color;
pub mod cycle;
pub mod labels;
pub mod layout;
pub mod record;
pub mod registry;
pub mod sort;

pub use color::{classify, ColorBucket, ColorOrder, StandardTagMatcher, TagMatcher};
pub use cycle::{advance, CategoryState};
pub use labels::{LabelCatalog, Translator};
pub use layout::{paginate, CellSize, GridConfig, NeighborSentinels, Region};
pub use record::{Aggregation, CountSource, ItemCatalog, ItemMetadata, ItemRecord, RawItem};
pub use registry::{default_categories, CategoryConfig, CategoryDef, CategoryRegistry, OrderSource};
pub use sort::sort_records;

/// Everything the engine knows: static category configuration plus one
/// mutable [`CategoryState`] per category. Hosts own one of these and call
/// into it when a menu opens or a tab is clicked.
pub struct EngineContext<H> {
    registry: CategoryRegistry,
    labels: LabelCatalog,
    colors: ColorOrder,
    matcher: Box<dyn TagMatcher>,
    states: BTreeMap<CategoryId, CategoryState<H>>,
    grid: GridConfig,
    sentinels: NeighborSentinels,
    active: Option<CategoryId>,
}

impl<H: Clone> EngineContext<H> {
    pub fn new(
        registry: CategoryRegistry,
        labels: LabelCatalog,
        colors: ColorOrder,
        grid: GridConfig,
        sentinels: NeighborSentinels,
    ) -> Self {
        let states = registry
            .ids()
            .map(|id| (id, CategoryState::default()))
            .collect();
        Self {
            registry,
            labels,
            colors,
            matcher: Box::new(StandardTagMatcher),
            states,
            grid,
            sentinels,
            active: None,
        }
    }

    /// Builds a context from category definitions, pulling order lists from
    /// `source`. Sources that fail leave the affected list empty.
    pub fn load(
        defs: Vec<CategoryDef>,
        source: &dyn OrderSource,
        grid: GridConfig,
        sentinels: NeighborSentinels,
    ) -> Self {
        let labels = LabelCatalog::default();
        let registry = CategoryRegistry::load(defs, source, &labels);
        let colors = match source.color_patterns() {
            Ok(patterns) if patterns.is_empty() => {
                warn!("color order is empty; every item sorts into the default bucket");
                ColorOrder::default()
            }
            Ok(patterns) => {
                let colors = ColorOrder::new(patterns);
                debug!(patterns = colors.len(), "loaded color order");
                colors
            }
            Err(error) => {
                warn!(
                    error = %format!("{error:#}"),
                    "failed to load color order; every item sorts into the default bucket"
                );
                ColorOrder::default()
            }
        };
        Self::new(registry, labels, colors, grid, sentinels)
    }

    pub fn with_matcher(mut self, matcher: impl TagMatcher + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn colors(&self) -> &ColorOrder {
        &self.colors
    }

    pub fn labels(&self) -> &LabelCatalog {
        &self.labels
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn active(&self) -> Option<CategoryId> {
        self.active
    }

    pub fn state(&self, id: CategoryId) -> Option<&CategoryState<H>> {
        self.states.get(&id)
    }

    pub fn mode(&self, id: CategoryId) -> Option<SortMode> {
        self.states.get(&id).map(|state| state.mode)
    }

    /// Re-anchors the grid, e.g. after the host window was resized.
    pub fn set_grid(&mut self, grid: GridConfig) {
        self.grid = grid;
    }

    pub fn refresh_labels(&mut self, translator: &dyn Translator) {
        self.labels.refresh(translator);
        self.registry.refresh_labels(&self.labels, translator);
    }

    /// Replaces the category's records with a fresh aggregation pass.
    /// Returns how many records were built; unknown categories build none.
    pub fn aggregate<I>(
        &mut self,
        id: CategoryId,
        items: I,
        catalog: &dyn ItemCatalog,
        counts: &dyn CountSource,
    ) -> usize
    where
        I: IntoIterator<Item = RawItem<H>>,
    {
        let (Some(config), Some(state)) = (self.registry.get(id), self.states.get_mut(&id)) else {
            unknown_category(id, "aggregate");
            return 0;
        };
        let aggregation = Aggregation {
            catalog,
            counts,
            colors: &self.colors,
            matcher: self.matcher.as_ref(),
        };
        state.records = aggregation.records(&config.def, items);
        debug!(
            category = %config.simple_name(),
            records = state.records.len(),
            "aggregated category"
        );
        state.records.len()
    }

    /// The category's records under its current mode.
    pub fn sorted(&self, id: CategoryId) -> Vec<ItemRecord<H>> {
        let (Some(config), Some(state)) = (self.registry.get(id), self.states.get(&id)) else {
            unknown_category(id, "sort");
            return Vec::new();
        };
        let _span = debug_span!("sort", category = %config.simple_name(), mode = %state.mode).entered();
        sort_records(&state.records, state.mode, &config.canonical_order)
    }

    pub fn status(&self, id: CategoryId) -> Option<StatusLabel> {
        let config = self.registry.get(id)?;
        let mode = self.mode(id)?;
        Some(StatusLabel {
            title: config.translated_name.clone(),
            mode_label: config.mode_label(mode).to_string(),
        })
    }

    /// Sorts and paginates the category under its current mode.
    pub fn layout(&self, id: CategoryId) -> Option<CategoryView<H>> {
        self.view(id, false)
    }

    pub fn cycle(&mut self, id: CategoryId, direction: CycleDirection) -> Option<SortMode> {
        let Some(state) = self.states.get_mut(&id) else {
            unknown_category(id, "cycle");
            return None;
        };
        let mode = advance(state, direction);
        debug!(category = %id, %mode, ?direction, "sort mode changed");
        Some(mode)
    }

    pub fn set_mode(&mut self, id: CategoryId, mode: SortMode) -> Option<SortMode> {
        let Some(state) = self.states.get_mut(&id) else {
            unknown_category(id, "set_mode");
            return None;
        };
        state.mode = mode;
        Some(mode)
    }

    /// Applies one host input to a category tab and returns the refreshed
    /// view. Selecting a tab cycles forward only when it was already active;
    /// alt-selecting the active tab cycles backward. Alt-select never switches
    /// tabs.
    pub fn handle_trigger(&mut self, id: CategoryId, trigger: HostTrigger) -> Option<CategoryView<H>> {
        let was_active = self.active == Some(id);
        if trigger != HostTrigger::AltSelect {
            self.active = Some(id);
        }

        if !self.registry.contains(id) {
            debug!(category = %id, ?trigger, "ignoring trigger for unmanaged category");
            return None;
        }

        let direction = match trigger {
            HostTrigger::Open => None,
            HostTrigger::Select if was_active => Some(CycleDirection::Forward),
            HostTrigger::AltSelect if was_active => Some(CycleDirection::Backward),
            HostTrigger::Select | HostTrigger::AltSelect => None,
        };
        if let Some(direction) = direction {
            self.cycle(id, direction)?;
        }
        self.view(id, direction.is_some())
    }

    fn view(&self, id: CategoryId, mode_changed: bool) -> Option<CategoryView<H>> {
        if !self.registry.contains(id) {
            unknown_category(id, "layout");
            return None;
        }
        let pages = paginate(self.sorted(id), &self.grid, &self.sentinels);
        Some(CategoryView {
            category: id,
            mode: self.mode(id)?,
            pages,
            status: self.status(id)?,
            mode_changed,
        })
    }
}

fn unknown_category(id: CategoryId, operation: &str) {
    let error = EngineError::UnknownCategory(id);
    error!(category = %id, operation, %error, "nothing to display");
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
