//! Core of a weekly schedule picker: a 7x24 hour grid persisted as a flat JSON
//! array, the pixel math behind drag selection on the grid, readable labels for
//! selected ranges, and a small form registry that validates fields before submit.

pub mod config;
pub mod form;
pub mod schedule;

pub use config::Config;
pub use schedule::{
    Axis, CellUpdate, GridLayout, Label, MouseState, PixelBox, RangeText, ScheduleError,
    ScheduleGrid, ScheduleRange,
};
