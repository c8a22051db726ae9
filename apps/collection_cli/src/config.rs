use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use collection_engine::{CellSize, GridConfig, NeighborSentinels, Region};
use serde::Deserialize;
use shared::error::EngineError;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub assets_dir: PathBuf,
    pub grid_columns: usize,
    pub cell: CellSize,
    pub region: Region,
    pub sentinels: NeighborSentinels,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            grid_columns: 10,
            cell: CellSize::default(),
            region: Region {
                x: 0,
                y: 0,
                width: 680,
                height: 340,
            },
            // Focus ids of the host menu's side tabs, back button and page arrows.
            sentinels: NeighborSentinels {
                up: 12347,
                down: -7777,
                left: 7001,
                right: -1,
            },
        }
    }
}

impl Settings {
    pub fn grid(&self) -> Result<GridConfig, EngineError> {
        GridConfig::new(self.grid_columns, self.cell, self.region)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    assets_dir: Option<PathBuf>,
    grid: Option<FileGrid>,
    region: Option<FileRegion>,
    sentinels: Option<FileSentinels>,
}

#[derive(Debug, Default, Deserialize)]
struct FileGrid {
    columns: Option<usize>,
    pitch_x: Option<i32>,
    pitch_y: Option<i32>,
    slot_width: Option<i32>,
    slot_height: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
struct FileRegion {
    x: Option<i32>,
    y: Option<i32>,
    width: Option<i32>,
    height: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
struct FileSentinels {
    up: Option<i64>,
    down: Option<i64>,
    left: Option<i64>,
    right: Option<i64>,
}

/// Defaults, then `path` if it exists, then `APP__*` environment variables.
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => apply_file(&mut settings, file_cfg),
            Err(error) => warn!(
                file = %path.display(),
                %error,
                "ignoring malformed settings file"
            ),
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.assets_dir {
        settings.assets_dir = v;
    }
    if let Some(grid) = file_cfg.grid {
        override_with(&mut settings.grid_columns, grid.columns);
        override_with(&mut settings.cell.pitch_x, grid.pitch_x);
        override_with(&mut settings.cell.pitch_y, grid.pitch_y);
        override_with(&mut settings.cell.slot_width, grid.slot_width);
        override_with(&mut settings.cell.slot_height, grid.slot_height);
    }
    if let Some(region) = file_cfg.region {
        override_with(&mut settings.region.x, region.x);
        override_with(&mut settings.region.y, region.y);
        override_with(&mut settings.region.width, region.width);
        override_with(&mut settings.region.height, region.height);
    }
    if let Some(sentinels) = file_cfg.sentinels {
        override_with(&mut settings.sentinels.up, sentinels.up);
        override_with(&mut settings.sentinels.down, sentinels.down);
        override_with(&mut settings.sentinels.left, sentinels.left);
        override_with(&mut settings.sentinels.right, sentinels.right);
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("APP__ASSETS_DIR") {
        settings.assets_dir = PathBuf::from(v);
    }
    override_with(&mut settings.grid_columns, parsed(&var, "APP__GRID_COLUMNS"));
    override_with(&mut settings.cell.pitch_x, parsed(&var, "APP__GRID_PITCH_X"));
    override_with(&mut settings.cell.pitch_y, parsed(&var, "APP__GRID_PITCH_Y"));
    override_with(&mut settings.region.x, parsed(&var, "APP__REGION_X"));
    override_with(&mut settings.region.y, parsed(&var, "APP__REGION_Y"));
    override_with(&mut settings.region.width, parsed(&var, "APP__REGION_WIDTH"));
    override_with(&mut settings.region.height, parsed(&var, "APP__REGION_HEIGHT"));
}

fn override_with<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn parsed<T: FromStr>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = var(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
