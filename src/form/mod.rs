//! Form registry: fields attach by name, values and validation results are kept
//! per form, and every change is reported through a callback.

mod field;
mod schedule_field;

pub use field::FormField;
pub use schedule_field::ScheduleField;

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Latest value of each field, by name
pub type Dataset = BTreeMap<String, Value>;

/// Whole-form check across fields, e.g. "password confirmation matches"
pub type FormValidation = Box<dyn Fn(&Dataset) -> Result<(), String>>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Field \"{0}\" is already attached")]
    DuplicateField(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Messages per field; an empty list means valid
    pub fields: BTreeMap<String, Vec<String>>,
    /// Messages from form-level validations
    pub form: Vec<String>,
}

impl ValidationReport {
    pub fn field_is_valid(&self, name: &str) -> bool {
        self.fields.get(name).map_or(true, |errors| errors.is_empty())
    }

    pub fn is_valid(&self) -> bool {
        self.form.is_empty() && self.fields.values().all(|errors| errors.is_empty())
    }
}

/// Payload of the change callback
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormEvent {
    pub dataset: Dataset,
    pub validation: ValidationReport,
}

#[derive(Default)]
pub struct Form {
    fields: BTreeMap<String, Box<dyn FormField>>,
    dataset: Dataset,
    validation: ValidationReport,
    validations: Vec<(String, FormValidation)>,
    on_field_change: Option<Box<dyn FnMut(&FormEvent)>>,
    on_submit: Option<Box<dyn FnMut(&Dataset)>>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validation<F>(mut self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Dataset) -> Result<(), String> + 'static,
    {
        self.validations.push((name.into(), Box::new(check)));
        self
    }

    pub fn on_field_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&FormEvent) + 'static,
    {
        self.on_field_change = Some(Box::new(callback));
        self
    }

    pub fn on_submit<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Dataset) + 'static,
    {
        self.on_submit = Some(Box::new(callback));
        self
    }

    pub fn attach(&mut self, name: impl Into<String>, field: Box<dyn FormField>) -> Result<(), FormError> {
        let name = name.into();
        if self.fields.contains_key(&name) {
            warn!(field = %name, "Input component already attached");
            return Err(FormError::DuplicateField(name));
        }
        self.fields.insert(name, field);
        Ok(())
    }

    pub fn detach(&mut self, name: &str) -> Option<Box<dyn FormField>> {
        self.fields.remove(name)
    }

    pub fn field(&self, name: &str) -> Option<&dyn FormField> {
        self.fields.get(name).map(|field| field.as_ref())
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn validation(&self) -> &ValidationReport {
        &self.validation
    }

    /// Record a new value for an attached field and validate it.
    /// Returns false for unknown fields and unchanged values.
    pub fn update_field(&mut self, name: &str, value: Value) -> bool {
        let Some(field) = self.fields.get_mut(name) else {
            return false;
        };
        if self.dataset.get(name) == Some(&value) {
            return false;
        }

        let errors = field.validate(&value);
        field.set_valid(errors.is_empty());
        field.set_value(value.clone());
        self.dataset.insert(name.to_string(), value);
        self.validation.fields.insert(name.to_string(), errors);

        self.emit_change();
        true
    }

    /// Validate every field, then the form-level checks; `on_submit` runs only when all pass
    pub fn submit(&mut self) -> bool {
        let mut fields_valid = true;
        for (name, field) in self.fields.iter_mut() {
            let value = field.value();
            let errors = field.validate(&value);
            field.set_valid(errors.is_empty());
            fields_valid &= errors.is_empty();
            self.dataset.insert(name.clone(), value);
            self.validation.fields.insert(name.clone(), errors);
        }

        if !fields_valid {
            debug!("Form submit blocked by field validation");
            self.emit_change();
            return false;
        }

        let mut failures = Vec::new();
        for (name, check) in &self.validations {
            if let Err(message) = check(&self.dataset) {
                debug!(validation = %name, %message, "Form validation failed");
                failures.push(message);
            }
        }
        self.validation.form = failures;

        self.emit_change();
        if !self.validation.form.is_empty() {
            return false;
        }

        if let Some(on_submit) = self.on_submit.as_mut() {
            on_submit(&self.dataset);
        }
        true
    }

    fn emit_change(&mut self) {
        if let Some(callback) = self.on_field_change.as_mut() {
            let event = FormEvent {
                dataset: self.dataset.clone(),
                validation: self.validation.clone(),
            };
            callback(&event);
        }
    }
}
