use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Timelike, Weekday};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Side length of one grid cell in pixels
pub const CELL_LENGTH: i32 = 24;
pub const DAYS_PER_WEEK: usize = 7;
pub const HOURS_PER_DAY: usize = 24;
/// Number of cells in the flat value (7 x 24)
pub const CELLS_PER_WEEK: usize = DAYS_PER_WEEK * HOURS_PER_DAY;

/// One hour of the week. `None` is unselected, `Some("")` is selected with the default label.
pub type Cell = Option<String>;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Invalid schedule JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected {expected} schedule cells, found {found}")]
    Length { expected: usize, found: usize },
}

/// Integer grid coordinate: `x` is the hour (0-23), `y` the weekday (0-6, Monday first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Axis {
    pub x: i32,
    pub y: i32,
}

impl Axis {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn weekday(&self) -> Option<Weekday> {
        u8::try_from(self.y)
            .ok()
            .and_then(|day| Weekday::try_from(day).ok())
    }

    /// (day, hour) indices when the axis lies inside the grid
    fn index(&self) -> Option<(usize, usize)> {
        let day = usize::try_from(self.y).ok().filter(|d| *d < DAYS_PER_WEEK)?;
        let hour = usize::try_from(self.x).ok().filter(|h| *h < HOURS_PER_DAY)?;
        Some((day, hour))
    }
}

/// Pixel positions of the drag start and the current pointer.
/// A negative X means "not pressed" (down) or "pointer outside" (current).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MouseState {
    pub mouse_down_x: i32,
    pub mouse_down_y: i32,
    pub mouse_current_x: i32,
    pub mouse_current_y: i32,
}

impl MouseState {
    pub const ABSENT: i32 = -1;

    pub fn idle() -> Self {
        Self {
            mouse_down_x: Self::ABSENT,
            mouse_down_y: Self::ABSENT,
            mouse_current_x: Self::ABSENT,
            mouse_current_y: Self::ABSENT,
        }
    }

    pub fn hover(x: i32, y: i32) -> Self {
        Self {
            mouse_current_x: x,
            mouse_current_y: y,
            ..Self::idle()
        }
    }

    /// Start a drag at the given pixel
    pub fn press(x: i32, y: i32) -> Self {
        Self {
            mouse_down_x: x,
            mouse_down_y: y,
            mouse_current_x: x,
            mouse_current_y: y,
        }
    }

    pub fn drag_to(self, x: i32, y: i32) -> Self {
        Self {
            mouse_current_x: x,
            mouse_current_y: y,
            ..self
        }
    }

    /// Button released; the pointer keeps hovering where it is
    pub fn release(self) -> Self {
        Self::hover(self.mouse_current_x, self.mouse_current_y)
    }

    pub fn leave(self) -> Self {
        Self::idle()
    }

    pub fn is_pointer_present(&self) -> bool {
        self.mouse_current_x >= 0
    }

    pub fn is_pressed(&self) -> bool {
        self.mouse_down_x >= 0
    }
}

impl Default for MouseState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Grid rectangle selected by a drag, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRange {
    pub start_hour: i32,
    pub end_hour: i32,
    pub start_weekday: i32,
    pub end_weekday: i32,
}

impl ScheduleRange {
    pub fn start_axis(&self) -> Axis {
        Axis::new(self.start_hour, self.start_weekday)
    }

    pub fn end_axis(&self) -> Axis {
        Axis::new(self.end_hour, self.end_weekday)
    }
}

/// Pixel rectangle handed to the rendering layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelBox {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// A maximal run of equal selected hours within one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub begin: usize,
    pub end: usize,
    pub value: String,
}

impl Label {
    pub fn new(begin: usize, end: usize, value: impl Into<String>) -> Self {
        Self {
            begin,
            end,
            value: value.into(),
        }
    }
}

/// What a rectangle update does to each cell it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellUpdate {
    Set(String),
    Clear,
    /// Unselected cells become selected with the default label, selected cells are cleared
    Toggle,
}

impl CellUpdate {
    pub fn apply(&self, cell: &mut Cell) {
        *cell = match self {
            CellUpdate::Set(value) => Some(value.clone()),
            CellUpdate::Clear => None,
            CellUpdate::Toggle => match cell {
                Some(_) => None,
                None => Some(String::new()),
            },
        };
    }
}

/// A week of hourly cells, day-major (row = weekday, column = hour)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleGrid {
    days: [[Cell; HOURS_PER_DAY]; DAYS_PER_WEEK],
}

impl ScheduleGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a flat day-major sequence. Missing cells stay unselected, extras are dropped.
    pub fn from_flat<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut grid = Self::new();
        for (i, cell) in cells.into_iter().take(CELLS_PER_WEEK).enumerate() {
            grid.days[i / HOURS_PER_DAY][i % HOURS_PER_DAY] = cell;
        }
        grid
    }

    pub fn flatten(&self) -> Vec<Cell> {
        self.days.iter().flatten().cloned().collect()
    }

    pub fn rows(&self) -> &[[Cell; HOURS_PER_DAY]; DAYS_PER_WEEK] {
        &self.days
    }

    pub fn row(&self, day: usize) -> Option<&[Cell; HOURS_PER_DAY]> {
        self.days.get(day)
    }

    pub fn cell(&self, axis: Axis) -> Option<&Cell> {
        let (day, hour) = axis.index()?;
        Some(&self.days[day][hour])
    }

    pub fn cell_mut(&mut self, axis: Axis) -> Option<&mut Cell> {
        let (day, hour) = axis.index()?;
        Some(&mut self.days[day][hour])
    }

    /// Returns false when the axis is outside the grid
    pub fn set(&mut self, axis: Axis, cell: Cell) -> bool {
        match self.cell_mut(axis) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    pub fn selected_count(&self) -> usize {
        self.days.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn iter_selected(&self) -> impl Iterator<Item = (Axis, &str)> + '_ {
        self.days.iter().enumerate().flat_map(|(day, row)| {
            row.iter().enumerate().filter_map(move |(hour, cell)| {
                cell.as_deref()
                    .map(|label| (Axis::new(hour as i32, day as i32), label))
            })
        })
    }

    pub fn cell_at(&self, weekday: Weekday, hour: u32) -> Option<&Cell> {
        self.days[weekday.num_days_from_monday() as usize].get(hour as usize)
    }

    /// Whether the hour containing `moment` is selected
    pub fn is_selected_at<T: Datelike + Timelike>(&self, moment: &T) -> bool {
        matches!(self.cell_at(moment.weekday(), moment.hour()), Some(Some(_)))
    }

    /// Canonical persisted form: a flat JSON array of 168 `null | string`
    pub fn to_value(&self) -> String {
        self.to_string()
    }

    fn from_cells(cells: Vec<Cell>) -> Result<Self, ScheduleError> {
        if cells.len() != CELLS_PER_WEEK {
            return Err(ScheduleError::Length {
                expected: CELLS_PER_WEEK,
                found: cells.len(),
            });
        }
        Ok(Self::from_flat(cells))
    }
}

impl Serialize for ScheduleGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.days.iter().flatten())
    }
}

impl<'de> Deserialize<'de> for ScheduleGrid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let cells = Vec::<Cell>::deserialize(deserializer)?;
        Self::from_cells(cells).map_err(D::Error::custom)
    }
}

impl fmt::Display for ScheduleGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Strict decode: exactly 168 `null | string` elements
impl FromStr for ScheduleGrid {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<Cell> = serde_json::from_str(s)?;
        Self::from_cells(cells)
    }
}
