//! Pixel <-> grid math for the schedule table: hovered cell, drag rectangle,
//! the highlight box under the cursor and the tooltip placement.

use serde::{Deserialize, Serialize};

use super::types::{Axis, MouseState, PixelBox, ScheduleRange, CELL_LENGTH};

/// Where a hidden tooltip is parked
const PARKED_POSITION: i32 = -200;
/// Position of the cursor box when no pointer is over the table
const OFF_SCREEN_POSITION: i32 = -2;

/// Table metrics used by the geometry functions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    pub cell_length: i32,
    pub table_width: i32,
    pub table_height: i32,
    pub title_layer_width: i32,
    pub title_layer_height: i32,
    pub title_layer_padding: i32,
    pub highlight_color: String,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            cell_length: CELL_LENGTH,
            table_width: 577,
            table_height: 170,
            title_layer_width: 100,
            title_layer_height: 60,
            title_layer_padding: 10,
            // color-blue-2
            highlight_color: "rgba(47, 130, 245, 0.5)".to_string(),
        }
    }
}

impl GridLayout {
    // A zero length from a hand-edited config would divide by zero
    fn cell(&self) -> i32 {
        self.cell_length.max(1)
    }

    /// Leading pixel edge of cell `index`; saturates for axes far outside the grid
    fn edge(&self, index: i32) -> i32 {
        index.saturating_mul(self.cell())
    }

    /// Pixel position to grid coordinate. Not clamped to the grid bounds.
    pub fn grid_axis(&self, x: i32, y: i32) -> Axis {
        let cell = self.cell();
        Axis::new(x / cell, y / cell)
    }

    /// Normalized drag rectangle, whichever direction the drag went
    pub fn schedule_range(&self, state: &MouseState) -> ScheduleRange {
        let (from, to) = self.drag_corners(state);
        ScheduleRange {
            start_hour: from.x,
            end_hour: to.x,
            start_weekday: from.y,
            end_weekday: to.y,
        }
    }

    fn drag_corners(&self, state: &MouseState) -> (Axis, Axis) {
        let from = self.grid_axis(
            state.mouse_down_x.min(state.mouse_current_x),
            state.mouse_down_y.min(state.mouse_current_y),
        );
        let to = self.grid_axis(
            state.mouse_down_x.max(state.mouse_current_x),
            state.mouse_down_y.max(state.mouse_current_y),
        );
        (from, to)
    }

    /// Highlight box for the hovered cell or the active drag rectangle
    pub fn cursor_box(&self, state: &MouseState) -> PixelBox {
        let cell = self.cell();

        if !state.is_pointer_present() {
            return PixelBox {
                left: OFF_SCREEN_POSITION,
                top: OFF_SCREEN_POSITION,
                width: 0,
                height: 0,
                background_color: None,
            };
        }

        if !state.is_pressed() {
            let axis = self.grid_axis(state.mouse_current_x, state.mouse_current_y);
            return PixelBox {
                left: self.edge(axis.x).saturating_add(1),
                top: self.edge(axis.y).saturating_add(1),
                width: cell - 1,
                height: cell - 1,
                background_color: None,
            };
        }

        let (from, to) = self.drag_corners(state);
        PixelBox {
            left: self.edge(from.x).saturating_add(1),
            top: self.edge(from.y).saturating_add(1),
            width: self.span(from.x, to.x),
            height: self.span(from.y, to.y),
            background_color: Some(self.highlight_color.clone()),
        }
    }

    /// Pixel length covering cells `from..=to`, minus the 1px border gap
    fn span(&self, from: i32, to: i32) -> i32 {
        let cells = to.saturating_sub(from).saturating_add(1);
        self.edge(cells).saturating_sub(1)
    }

    /// Tooltip box next to `axis`, flipped above or left when it would leave the table
    pub fn title_layer_box(&self, axis: Axis, hide: bool) -> PixelBox {
        let width = self.title_layer_width;
        let height = self.title_layer_height;
        let padding = self.title_layer_padding;

        if hide {
            return PixelBox {
                left: PARKED_POSITION,
                top: PARKED_POSITION,
                width,
                height,
                background_color: None,
            };
        }

        let below = self.edge(axis.y.saturating_add(1)).saturating_add(padding);
        let top = if below.saturating_add(height) < self.table_height {
            below
        } else {
            self.edge(axis.y).saturating_sub(padding).saturating_sub(height)
        };

        let left = if self.edge(axis.x).saturating_add(width) < self.table_width {
            self.edge(axis.x)
        } else {
            self.edge(axis.x.saturating_add(1)).saturating_sub(width)
        };

        PixelBox {
            left,
            top,
            width,
            height,
            background_color: None,
        }
    }
}

pub fn grid_axis(x: i32, y: i32) -> Axis {
    GridLayout::default().grid_axis(x, y)
}

pub fn schedule_range_from_mouse(state: &MouseState) -> ScheduleRange {
    GridLayout::default().schedule_range(state)
}

pub fn cursor_box(state: &MouseState) -> PixelBox {
    GridLayout::default().cursor_box(state)
}

pub fn title_layer_box(axis: Axis, hide: bool) -> PixelBox {
    GridLayout::default().title_layer_box(axis, hide)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_axis() {
        assert_eq!(grid_axis(25, 48), Axis::new(1, 2));
        assert_eq!(grid_axis(0, 0), Axis::new(0, 0));
        assert_eq!(grid_axis(23, 167), Axis::new(0, 6));
        // Not clamped
        assert_eq!(grid_axis(24 * 30, 24 * 9), Axis::new(30, 9));
        // Negative pixels truncate toward zero
        assert_eq!(grid_axis(-5, -30), Axis::new(0, -1));
    }

    #[test]
    fn test_range_is_direction_independent() {
        let expected = ScheduleRange {
            start_hour: 1,
            end_hour: 3,
            start_weekday: 0,
            end_weekday: 2,
        };
        let corners = [((30, 10), (80, 60)), ((80, 60), (30, 10)), ((80, 10), (30, 60)), ((30, 60), (80, 10))];
        for ((dx, dy), (cx, cy)) in corners {
            let state = MouseState::press(dx, dy).drag_to(cx, cy);
            assert_eq!(schedule_range_from_mouse(&state), expected);
        }
    }

    #[test]
    fn test_cursor_box_without_pointer() {
        let b = cursor_box(&MouseState::idle());
        assert_eq!((b.left, b.top, b.width, b.height), (-2, -2, 0, 0));
        assert!(b.background_color.is_none());
    }

    #[test]
    fn test_cursor_box_hover() {
        let b = cursor_box(&MouseState::hover(30, 30));
        assert_eq!(
            b,
            PixelBox { left: 25, top: 25, width: 23, height: 23, background_color: None }
        );
    }

    #[test]
    fn test_cursor_box_drag() {
        let state = MouseState::press(70, 5).drag_to(10, 50);
        let b = cursor_box(&state);
        assert_eq!((b.left, b.top), (1, 1));
        assert_eq!((b.width, b.height), (3 * 24 - 1, 3 * 24 - 1));
        assert_eq!(b.background_color.as_deref(), Some("rgba(47, 130, 245, 0.5)"));
    }

    #[test]
    fn test_title_layer_hidden_is_parked() {
        let b = title_layer_box(Axis::new(5, 2), true);
        assert_eq!((b.left, b.top, b.width, b.height), (-200, -200, 100, 60));
    }

    #[test]
    fn test_title_layer_flips() {
        // Top-left cell: below and to the right
        let b = title_layer_box(Axis::new(0, 0), false);
        assert_eq!((b.left, b.top), (0, 34));

        // Bottom row: 4*24+10+60 = 166 < 170 stays below for y = 3, flips for y = 4
        assert_eq!(title_layer_box(Axis::new(0, 3), false).top, 4 * 24 + 10);
        assert_eq!(title_layer_box(Axis::new(0, 4), false).top, 4 * 24 - 10 - 60);

        // Right edge: 20*24+100 = 580 >= 577 flips left
        assert_eq!(title_layer_box(Axis::new(19, 0), false).left, 19 * 24);
        assert_eq!(title_layer_box(Axis::new(20, 0), false).left, 21 * 24 - 100);
    }

    #[test]
    fn test_extreme_coordinates_saturate() {
        let b = title_layer_box(Axis::new(0, i32::MAX / 24), false);
        assert_eq!(b.left, 0);
        assert!(b.top > 0);

        let b = title_layer_box(Axis::new(i32::MAX, i32::MIN), false);
        assert_eq!(b.top, i32::MIN + 10);
        assert_eq!(b.left, i32::MAX - 100);

        let state = MouseState {
            mouse_down_x: 0,
            mouse_down_y: i32::MIN,
            mouse_current_x: 0,
            mouse_current_y: i32::MAX,
        };
        let b = cursor_box(&state);
        assert_eq!((b.left, b.width), (1, 23));
        assert_eq!(b.top, -(i32::MAX / 24) * 24 + 1);
        assert_eq!(b.height, i32::MAX - 1);

        let hover = cursor_box(&MouseState::hover(i32::MAX, i32::MAX));
        assert_eq!(hover.left, (i32::MAX / 24) * 24 + 1);

        let layout = GridLayout { cell_length: 1, ..GridLayout::default() };
        let wide = MouseState::press(0, 0).drag_to(i32::MAX, 0);
        assert_eq!(layout.cursor_box(&wide).width, i32::MAX - 1);
    }

    #[test]
    fn test_custom_layout() {
        let layout = GridLayout { cell_length: 10, ..GridLayout::default() };
        assert_eq!(layout.grid_axis(25, 48), Axis::new(2, 4));
        let zero = GridLayout { cell_length: 0, ..GridLayout::default() };
        assert_eq!(zero.grid_axis(3, 4), Axis::new(3, 4));
    }
}
