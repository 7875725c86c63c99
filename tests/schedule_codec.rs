use schedule_picker::schedule::{
    cursor_box, grid_axis, labels_for_grid, labels_for_row, parse, range_text, selected_count,
    stringify, update_value_by_axis, update_value_by_mouse, Axis, CellUpdate, Label, MouseState,
    ScheduleGrid, CELLS_PER_WEEK,
};

fn sample_grid() -> ScheduleGrid {
    let mut grid = ScheduleGrid::new();
    for hour in 9..18 {
        for day in 0..5 {
            grid.set(Axis::new(hour, day), Some(String::new()));
        }
    }
    grid.set(Axis::new(12, 2), Some("lunch".to_string()));
    grid.set(Axis::new(23, 6), Some("\"quoted\" \\ label".to_string()));
    grid
}

#[test]
fn test_round_trip() {
    let grid = sample_grid();
    assert_eq!(parse(&stringify(Some(&grid))), grid);

    let empty = ScheduleGrid::new();
    assert_eq!(parse(&stringify(Some(&empty))), empty);
}

#[test]
fn test_unparsable_values_are_empty() {
    assert_eq!(parse(""), ScheduleGrid::new());
    assert_eq!(parse("not json"), ScheduleGrid::new());
    assert_eq!(parse("").flatten(), vec![None; CELLS_PER_WEEK]);
}

#[test]
fn test_full_week_count_matches_grid() {
    let grid = sample_grid();
    let value = stringify(Some(&grid));
    assert_eq!(
        selected_count(&value, Axis::new(0, 0), Axis::new(23, 6)),
        grid.selected_count()
    );
    assert_eq!(grid.selected_count(), 9 * 5 + 1);
}

#[test]
fn test_toggle_law() {
    let value = stringify(Some(&sample_grid()));
    for axis in [Axis::new(9, 0), Axis::new(0, 0), Axis::new(23, 6)] {
        let once = update_value_by_axis(&value, axis, axis, &CellUpdate::Toggle);
        assert_ne!(once, value);
        let twice = update_value_by_axis(&once, axis, axis, &CellUpdate::Toggle);
        let restored = parse(&twice);
        // A labelled cell comes back as a default-labelled one after two toggles
        let expected = parse(&value).cell(axis).cloned().unwrap().map(|_| String::new());
        assert_eq!(restored.cell(axis).cloned().unwrap(), expected);
    }

    let blank = Axis::new(0, 0);
    let once = update_value_by_axis(&value, blank, blank, &CellUpdate::Toggle);
    assert_eq!(update_value_by_axis(&once, blank, blank, &CellUpdate::Toggle), value);
}

#[test]
fn test_set_and_clear_out_of_bounds() {
    let value = update_value_by_axis("", Axis::new(22, 5), Axis::new(30, 9), &CellUpdate::Set("x".into()));
    let grid = parse(&value);
    assert_eq!(grid.selected_count(), 2 * 2);

    let cleared = update_value_by_axis(&value, Axis::new(-3, -3), Axis::new(99, 99), &CellUpdate::Clear);
    assert_eq!(parse(&cleared), ScheduleGrid::new());
}

#[test]
fn test_drag_then_label() {
    // Drag across Monday 9:00 through 17:00
    let state = MouseState::press(9 * 24 + 2, 2).drag_to(17 * 24 + 20, 10);
    let value = update_value_by_mouse("", &state);
    let labels = labels_for_grid(&parse(&value));

    assert_eq!(labels[0], vec![Label::new(9, 17, "")]);
    assert!(labels[1..].iter().all(|day| day.is_empty()));
    let monday = &labels[0][0];
    assert_eq!(
        range_text(Some(monday.begin as i32), Some(monday.end as i32), Some(0), None),
        "周一 9:00-18:00"
    );
}

#[test]
fn test_documented_examples() {
    assert_eq!(range_text(Some(0), Some(23), None, None), "全天");
    assert_eq!(range_text(Some(9), None, None, None), "9:00");
    assert_eq!(range_text(Some(9), Some(17), None, None), "9:00-18:00");
    assert_eq!(grid_axis(25, 48), Axis::new(1, 2));

    let hidden = cursor_box(&MouseState { mouse_current_x: -1, ..MouseState::press(5, 5) });
    assert_eq!((hidden.left, hidden.top, hidden.width, hidden.height), (-2, -2, 0, 0));

    let hover = cursor_box(&MouseState::hover(30, 30));
    assert_eq!((hover.left, hover.top), (24 + 1, 24 + 1));

    let row: Vec<Option<String>> = ["a", "a", "", "b", "b", "b"]
        .iter()
        .map(|s| if s.is_empty() { None } else { Some(s.to_string()) })
        .collect();
    assert_eq!(
        labels_for_row(&row),
        vec![Label::new(0, 1, "a"), Label::new(3, 5, "b")]
    );
}
