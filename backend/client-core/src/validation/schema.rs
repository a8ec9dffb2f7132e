use super::{FieldValue, FormValues, ValidationErrors};

use once_cell::sync::Lazy;
use regex::Regex;

const MISSING_TEXT_MESSAGE: &str = "必須項目です";
const MISSING_FLAG_MESSAGE: &str = "選択してください";
const WRONG_KIND_MESSAGE: &str = "入力形式が正しくありません";

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("valid regex pattern")
});

/// A single check on a text field.
#[derive(Debug, Clone)]
pub enum Rule {
    /// At least `min` characters (Unicode scalar values).
    MinLength { min: usize, message: &'static str },
    /// At most `max` characters.
    MaxLength { max: usize, message: &'static str },
    Email { message: &'static str },
}

impl Rule {
    fn check(&self, value: &str) -> Result<(), &'static str> {
        match self {
            Rule::MinLength { min, message } => {
                if value.chars().count() < *min {
                    return Err(*message);
                }
            }
            Rule::MaxLength { max, message } => {
                if value.chars().count() > *max {
                    return Err(*message);
                }
            }
            Rule::Email { message } => {
                if !is_email(value) {
                    return Err(*message);
                }
            }
        }
        Ok(())
    }
}

fn is_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_PATTERN.is_match(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Flag,
}

#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: &'static str,
    pub kind: FieldKind,
    pub optional: bool,
    pub rules: Vec<Rule>,
}

impl FieldSchema {
    pub fn text(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            optional: false,
            rules: Vec::new(),
        }
    }

    pub fn flag(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::Flag,
            optional: false,
            rules: Vec::new(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn min(mut self, min: usize, message: &'static str) -> Self {
        self.rules.push(Rule::MinLength { min, message });
        self
    }

    pub fn max(mut self, max: usize, message: &'static str) -> Self {
        self.rules.push(Rule::MaxLength { max, message });
        self
    }

    pub fn email(mut self, message: &'static str) -> Self {
        self.rules.push(Rule::Email { message });
        self
    }

    /// `Ok(None)` when an optional field is absent.
    fn check(&self, value: Option<&FieldValue>) -> Result<Option<FieldValue>, &'static str> {
        match (self.kind, value) {
            (_, None) if self.optional => Ok(None),
            (FieldKind::Text, None) => Err(MISSING_TEXT_MESSAGE),
            (FieldKind::Flag, None) => Err(MISSING_FLAG_MESSAGE),
            (FieldKind::Text, Some(FieldValue::Text(text))) => {
                for rule in &self.rules {
                    rule.check(text)?;
                }
                Ok(Some(FieldValue::Text(text.clone())))
            }
            (FieldKind::Flag, Some(FieldValue::Flag(flag))) => Ok(Some(FieldValue::Flag(*flag))),
            _ => Err(WRONG_KIND_MESSAGE),
        }
    }
}

/// Cross-field rule. Fails with `message` when `check` returns false.
#[derive(Debug, Clone)]
pub struct Refinement {
    pub message: &'static str,
    pub check: fn(&FormValues) -> bool,
}

#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldSchema>,
    refinements: Vec<Refinement>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    pub fn refine(mut self, message: &'static str, check: fn(&FormValues) -> bool) -> Self {
        self.refinements.push(Refinement { message, check });
        self
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|field| field.name == name)
    }

    pub fn validate(&self, values: &FormValues) -> Result<FormValues, ValidationErrors> {
        let mut normalized = FormValues::new();
        let mut errors = ValidationErrors::default();

        for field in &self.fields {
            match field.check(values.get(field.name)) {
                Ok(Some(value)) => normalized.insert(field.name, value),
                Ok(None) => {}
                Err(message) => {
                    errors
                        .field_errors
                        .insert(field.name.to_string(), message.to_string());
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        // First failing refinement only, so contradictory checks never stack.
        if let Some(refinement) = self
            .refinements
            .iter()
            .find(|refinement| !(refinement.check)(&normalized))
        {
            errors.form_errors.push(refinement.message.to_string());
            return Err(errors);
        }

        Ok(normalized)
    }
}
