mod codec;
mod geometry;
mod time;
mod types;

pub use codec::{parse, selected_count, stringify, update_value_by_axis, update_value_by_mouse};
pub use geometry::{cursor_box, grid_axis, schedule_range_from_mouse, title_layer_box, GridLayout};
pub use time::{label_text, labels_for_grid, labels_for_row, range_text, RangeText};
pub use types::*;
