//! Conversion between the persisted schedule string and the 7x24 grid,
//! plus rectangle queries and updates on the persisted form.

use serde_json::Value;
use tracing::debug;

use super::geometry::schedule_range_from_mouse;
use super::types::{Axis, Cell, CellUpdate, MouseState, ScheduleGrid, DAYS_PER_WEEK, HOURS_PER_DAY};

/// Parse a persisted value into a grid.
///
/// Never fails: unparsable text or a non-array document becomes the empty grid,
/// and a short array leaves the remaining cells unselected.
pub fn parse(value: &str) -> ScheduleGrid {
    match serde_json::from_str::<Value>(value) {
        Ok(Value::Array(items)) => ScheduleGrid::from_flat(items.into_iter().map(cell_from_json)),
        Ok(other) => {
            debug!(value = %other, "Schedule value is not an array, using empty grid");
            ScheduleGrid::new()
        }
        Err(error) => {
            if !value.is_empty() {
                debug!(%error, "Schedule value unparsable, using empty grid");
            }
            ScheduleGrid::new()
        }
    }
}

// Non-string scalars still mark the hour as selected
fn cell_from_json(item: Value) -> Cell {
    match item {
        Value::Null => None,
        Value::String(label) => Some(label),
        other => Some(other.to_string()),
    }
}

/// Serialize a grid to its persisted form. No grid at all gives the empty string.
pub fn stringify(grid: Option<&ScheduleGrid>) -> String {
    grid.map(ScheduleGrid::to_value).unwrap_or_default()
}

/// Count selected cells inside the inclusive rectangle `axis1..=axis2`
pub fn selected_count(value: &str, axis1: Axis, axis2: Axis) -> usize {
    let grid = parse(value);
    clipped_axes(axis1, axis2)
        .filter(|axis| matches!(grid.cell(*axis), Some(Some(_))))
        .count()
}

/// Apply `update` to every in-grid cell of the inclusive rectangle and re-serialize
pub fn update_value_by_axis(value: &str, axis1: Axis, axis2: Axis, update: &CellUpdate) -> String {
    let mut grid = parse(value);
    for axis in clipped_axes(axis1, axis2) {
        if let Some(cell) = grid.cell_mut(axis) {
            update.apply(cell);
        }
    }
    grid.to_value()
}

/// Toggle every cell covered by the current drag rectangle
pub fn update_value_by_mouse(value: &str, state: &MouseState) -> String {
    let range = schedule_range_from_mouse(state);
    update_value_by_axis(value, range.start_axis(), range.end_axis(), &CellUpdate::Toggle)
}

/// Axes of the rectangle that fall inside the grid, row by row
fn clipped_axes(axis1: Axis, axis2: Axis) -> impl Iterator<Item = Axis> {
    let xs = axis1.x.max(0)..=axis2.x.min(HOURS_PER_DAY as i32 - 1);
    let ys = axis1.y.max(0)..=axis2.y.min(DAYS_PER_WEEK as i32 - 1);
    ys.flat_map(move |y| xs.clone().map(move |x| Axis::new(x, y)))
}
