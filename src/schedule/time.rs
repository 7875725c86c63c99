//! Human-readable text for schedule selections

use serde::{Deserialize, Serialize};

use super::types::{Cell, Label, ScheduleGrid};

/// Words used when describing a range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeText {
    /// Monday first
    pub weekdays: [String; 7],
    pub full_day: String,
    /// Follows the weekday span when both weekdays are given
    pub separator: String,
}

impl Default for RangeText {
    fn default() -> Self {
        Self {
            weekdays: ["周一", "周二", "周三", "周四", "周五", "周六", "周日"].map(String::from),
            full_day: "全天".to_string(),
            separator: "，".to_string(),
        }
    }
}

impl RangeText {
    fn weekday(&self, day: i32) -> &str {
        usize::try_from(day)
            .ok()
            .and_then(|d| self.weekdays.get(d))
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Describe a range of hours, optionally prefixed by weekday(s).
    ///
    /// - `9` -> "9:00"
    /// - `9..17` -> "9:00-18:00" (the end is shown as the boundary after the last hour)
    /// - `0..23` -> "全天"
    /// - with a start weekday: "周一 9:00-18:00", "周一全天"
    /// - with both weekdays: "周一 - 周五，9:00-18:00"
    pub fn format(
        &self,
        start_hour: Option<i32>,
        end_hour: Option<i32>,
        start_weekday: Option<i32>,
        end_weekday: Option<i32>,
    ) -> String {
        let Some(start_hour) = start_hour else {
            return String::new();
        };

        let mut text = String::new();
        if let Some(day) = start_weekday {
            text.push_str(self.weekday(day));
            text.push(' ');
        }

        if let Some(day) = end_weekday {
            if text.ends_with(' ') {
                text.pop();
            }
            text.push_str(" - ");
            text.push_str(self.weekday(day));
            text.push_str(&self.separator);
        }

        if start_hour == 0 && end_hour == Some(23) {
            if end_weekday.is_none() && text.ends_with(' ') {
                text.pop();
            }
            text.push_str(&self.full_day);
            return text;
        }

        text.push_str(&format!("{}:00", start_hour));
        if let Some(end_hour) = end_hour {
            text.push_str(&format!("-{}:00", i64::from(end_hour) + 1));
        }
        text
    }

    /// The label's own text, or its hour span when the label is empty
    pub fn label_text(&self, label: &Label) -> String {
        if label.value.is_empty() {
            self.format(Some(label.begin as i32), Some(label.end as i32), None, None)
        } else {
            label.value.clone()
        }
    }
}

/// Collapse a day row into runs of equal selected values
pub fn labels_for_row(row: &[Cell]) -> Vec<Label> {
    let mut labels = Vec::new();
    let mut run: Option<(usize, &str)> = None;

    for (i, cell) in row.iter().enumerate() {
        match (cell.as_deref(), run) {
            (None, None) => {}
            (None, Some((begin, value))) => {
                labels.push(Label::new(begin, i - 1, value));
                run = None;
            }
            (Some(value), Some((_, current))) if value == current => {}
            (Some(value), previous) => {
                if let Some((begin, current)) = previous {
                    labels.push(Label::new(begin, i - 1, current));
                }
                run = Some((i, value));
            }
        }
    }

    if let Some((begin, value)) = run {
        labels.push(Label::new(begin, row.len() - 1, value));
    }
    labels
}

/// Labels for each day of the week, Monday first
pub fn labels_for_grid(grid: &ScheduleGrid) -> Vec<Vec<Label>> {
    grid.rows().iter().map(|row| labels_for_row(row)).collect()
}

pub fn range_text(
    start_hour: Option<i32>,
    end_hour: Option<i32>,
    start_weekday: Option<i32>,
    end_weekday: Option<i32>,
) -> String {
    RangeText::default().format(start_hour, end_hour, start_weekday, end_weekday)
}

pub fn label_text(label: &Label) -> String {
    RangeText::default().label_text(label)
}
