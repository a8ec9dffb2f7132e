//! Declarative form validation mirroring the backend's bean validation.
//!
//! A [`Schema`] is an ordered list of field rules plus cross-field
//! refinements. [`validate`] is pure: no I/O, same input same output.
//! Within one field the first failing rule wins; refinements run only once
//! every field passed.

pub mod forms;
pub mod schema;
pub mod schemas;

pub use forms::{Form, LoginForm, OshiGroupForm, RegisterForm, SearchModeForm, validate_form};
pub use schema::{FieldKind, FieldSchema, Refinement, Rule, Schema};

use std::collections::BTreeMap;
use std::fmt;

/// A single submitted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

/// Submitted form values keyed by wire field name (`groupName`, `email`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<String, FieldValue>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.values
            .insert(name.to_string(), FieldValue::Text(value.into()));
        self
    }

    pub fn with_flag(mut self, name: &str, value: bool) -> Self {
        self.values.insert(name.to_string(), FieldValue::Flag(value));
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(FieldValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(FieldValue::Flag(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn insert(&mut self, name: &str, value: FieldValue) {
        self.values.insert(name.to_string(), value);
    }
}

/// Why a form was rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// First failing message per field.
    pub field_errors: BTreeMap<String, String>,
    /// Messages not tied to a single field (refinements).
    pub form_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty() && self.form_errors.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.field_errors.get(name).map(String::as_str)
    }

    pub fn first_form_error(&self) -> Option<&str> {
        self.form_errors.first().map(String::as_str)
    }

    /// The form-level message if there is one, else the first field message.
    pub fn summary(&self) -> Option<&str> {
        self.first_form_error()
            .or_else(|| self.field_errors.values().next().map(String::as_str))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self
            .field_errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        parts.extend(self.form_errors.iter().cloned());
        write!(f, "{}", parts.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Run `schema` against `values`.
///
/// On success returns the normalized values: only declared fields are kept.
pub fn validate(schema: &Schema, values: &FormValues) -> Result<FormValues, ValidationErrors> {
    schema.validate(values)
}
