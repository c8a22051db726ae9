use serde::{Deserialize, Serialize};
use shared::{
    error::EngineError,
    protocol::{Bounds, NeighborLink, Neighbors, Page, Slot},
};

use crate::record::ItemRecord;

/// Usable area of the host's menu, in screen pixels.
///
/// Only the height bounds the layout: rows that would start below
/// [`Region::bottom`] spill onto a new page. The column count alone decides
/// how far a row reaches, so a grid with more columns than fit in `width`
/// extends past the right edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSize {
    /// Horizontal distance between the origins of adjacent cells.
    pub pitch_x: i32,
    /// Vertical distance between the origins of adjacent rows.
    pub pitch_y: i32,
    pub slot_width: i32,
    pub slot_height: i32,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            pitch_x: 68,
            pitch_y: 68,
            slot_width: 64,
            slot_height: 64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    columns: usize,
    cell: CellSize,
    region: Region,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 10,
            cell: CellSize::default(),
            region: Region {
                x: 0,
                y: 0,
                width: 680,
                height: 340,
            },
        }
    }
}

impl GridConfig {
    pub fn new(columns: usize, cell: CellSize, region: Region) -> Result<Self, EngineError> {
        if columns == 0 {
            return Err(EngineError::InvalidGrid("columns must be at least 1".into()));
        }
        if cell.pitch_x <= 0 || cell.pitch_y <= 0 {
            return Err(EngineError::InvalidGrid(format!(
                "cell pitch must be positive, got {}x{}",
                cell.pitch_x, cell.pitch_y
            )));
        }
        if cell.slot_width < 0 || cell.slot_height < 0 {
            return Err(EngineError::InvalidGrid(format!(
                "slot size must not be negative, got {}x{}",
                cell.slot_width, cell.slot_height
            )));
        }
        if region.width < 0 || region.height < 0 {
            return Err(EngineError::InvalidGrid(format!(
                "region extent must not be negative, got {}x{}",
                region.width, region.height
            )));
        }
        if !fits_in_screen_space(columns, cell, region) {
            return Err(EngineError::InvalidGrid(format!(
                "region at ({}, {}) sized {}x{} leaves no room for {columns} columns of {}x{} cells",
                region.x, region.y, region.width, region.height, cell.pitch_x, cell.pitch_y
            )));
        }
        Ok(Self {
            columns,
            cell,
            region,
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell(&self) -> CellSize {
        self.cell
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Same grid anchored in a new region, e.g. after the host menu moved.
    pub fn with_region(self, region: Region) -> Result<Self, EngineError> {
        Self::new(self.columns, self.cell, region)
    }

    /// Rows that fit in the region. A region shorter than one pitch still
    /// holds a single row.
    pub fn rows_per_page(&self) -> usize {
        (self.region.height / self.cell.pitch_y) as usize + 1
    }

    fn row_y(&self, row: usize) -> i32 {
        self.region.y + row as i32 * self.cell.pitch_y
    }

    fn column_x(&self, column: usize) -> i32 {
        self.region.x + column as i32 * self.cell.pitch_x
    }
}

/// Every coordinate `paginate` computes stays within `i32`: the row just
/// below the region, the last column, and both region edges.
fn fits_in_screen_space(columns: usize, cell: CellSize, region: Region) -> bool {
    let below = region
        .height
        .checked_add(cell.pitch_y)
        .and_then(|reach| region.y.checked_add(reach));
    let last_column = i32::try_from(columns - 1)
        .ok()
        .and_then(|column| column.checked_mul(cell.pitch_x))
        .and_then(|offset| region.x.checked_add(offset));
    below.is_some() && last_column.is_some() && region.x.checked_add(region.width).is_some()
}

/// Host focus ids used where a slot has no in-grid neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborSentinels {
    pub up: i64,
    pub down: i64,
    pub left: i64,
    pub right: i64,
}

/// Lays `ordered` out row-major, starting a new page whenever the next row
/// would fall below the region. Pages are only created for records, so an
/// empty input yields no pages.
pub fn paginate<H, I>(ordered: I, grid: &GridConfig, sentinels: &NeighborSentinels) -> Vec<Page<H>>
where
    I: IntoIterator<Item = ItemRecord<H>>,
{
    let columns = grid.columns;
    let bottom = grid.region.bottom();
    let mut pages: Vec<Page<H>> = Vec::new();

    for record in ordered {
        let needs_page = match pages.last() {
            None => true,
            Some(page) => !page.is_empty() && grid.row_y(page.len() / columns) > bottom,
        };
        if needs_page {
            pages.push(Page { slots: Vec::new() });
        }
        let Some(page) = pages.last_mut() else {
            continue;
        };

        let index = page.len();
        let row = index / columns;
        let column = index % columns;
        let x = grid.column_x(column);
        let y = grid.row_y(row);

        let neighbors = Neighbors {
            up: if row == 0 {
                NeighborLink::External(sentinels.up)
            } else {
                NeighborLink::Slot(index - columns)
            },
            down: if y + grid.cell.pitch_y > bottom {
                NeighborLink::External(sentinels.down)
            } else {
                NeighborLink::Slot(index + columns)
            },
            left: if column == 0 {
                NeighborLink::External(sentinels.left)
            } else {
                NeighborLink::Slot(index - 1)
            },
            right: if column + 1 == columns {
                NeighborLink::External(sentinels.right)
            } else {
                NeighborLink::Slot(index + 1)
            },
        };

        page.slots.push(Slot {
            index,
            row,
            column,
            item_id: record.id,
            handle: record.handle,
            bounds: Bounds {
                x,
                y,
                width: grid.cell.slot_width,
                height: grid.cell.slot_height,
            },
            neighbors,
        });
    }

    pages
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
