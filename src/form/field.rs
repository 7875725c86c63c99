use serde_json::Value;

/// An input registered with a [`Form`](super::Form)
pub trait FormField {
    /// Current value, pulled on submit
    fn value(&self) -> Value;

    /// Store a value pushed by the form
    fn set_value(&mut self, value: Value);

    /// Error messages for `value`; empty when valid
    fn validate(&self, value: &Value) -> Vec<String>;

    fn set_valid(&mut self, is_valid: bool);
}
