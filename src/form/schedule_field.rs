use serde_json::Value;

use super::field::FormField;
use crate::config::Config;
use crate::schedule::{
    self, Axis, MouseState, RangeText, ScheduleGrid, DAYS_PER_WEEK, HOURS_PER_DAY,
};

/// Form input holding a persisted schedule value
#[derive(Debug, Clone)]
pub struct ScheduleField {
    value: String,
    min_selected: usize,
    is_valid: bool,
}

impl ScheduleField {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            min_selected: 0,
            is_valid: true,
        }
    }

    /// Field that requires the configured minimum of selected hours
    pub fn from_config(value: impl Into<String>, config: &Config) -> Self {
        Self::new(value).with_min_selected(config.min_selected)
    }

    pub fn with_min_selected(mut self, min_selected: usize) -> Self {
        self.min_selected = min_selected;
        self
    }

    pub fn value_str(&self) -> &str {
        &self.value
    }

    pub fn grid(&self) -> ScheduleGrid {
        schedule::parse(&self.value)
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Text of every label run as (weekday, text), Monday first
    pub fn describe(&self, text: &RangeText) -> Vec<(usize, String)> {
        schedule::labels_for_grid(&self.grid())
            .iter()
            .enumerate()
            .flat_map(|(day, labels)| labels.iter().map(move |label| (day, text.label_text(label))))
            .collect()
    }

    /// Toggle the cells under a finished drag and return the new value
    pub fn apply_drag(&mut self, state: &MouseState) -> &str {
        self.value = schedule::update_value_by_mouse(&self.value, state);
        &self.value
    }
}

impl FormField for ScheduleField {
    fn value(&self) -> Value {
        Value::String(self.value.clone())
    }

    fn set_value(&mut self, value: Value) {
        self.value = match value {
            Value::String(text) => text,
            Value::Null => String::new(),
            other => other.to_string(),
        };
    }

    fn validate(&self, value: &Value) -> Vec<String> {
        let text = value.as_str().unwrap_or_default();
        let last = Axis::new(HOURS_PER_DAY as i32 - 1, DAYS_PER_WEEK as i32 - 1);
        let selected = schedule::selected_count(text, Axis::new(0, 0), last);
        if selected < self.min_selected {
            vec![format!(
                "Select at least {} hour(s), {} selected",
                self.min_selected, selected
            )]
        } else {
            Vec::new()
        }
    }

    fn set_valid(&mut self, is_valid: bool) {
        self.is_valid = is_valid;
    }
}
