//! Typed views over the schemas.

use super::schemas::{LOGIN_SCHEMA, OSHI_GROUP_FORM_SCHEMA, REGISTER_SCHEMA, SEARCH_MODE_SCHEMA};
use super::{FormValues, Schema, ValidationErrors};

use models::{LoginRequest, OshiGroup, RegisterRequest};

/// A form with a schema.
pub trait Form: Sized {
    fn schema() -> &'static Schema;

    fn to_values(&self) -> FormValues;

    /// Rebuild from values the schema already accepted.
    fn from_values(values: &FormValues) -> Self;
}

/// Validate a typed form, returning its normalized copy.
pub fn validate_form<F: Form>(form: &F) -> Result<F, ValidationErrors> {
    let normalized = F::schema().validate(&form.to_values())?;
    Ok(F::from_values(&normalized))
}

fn text_or_empty(values: &FormValues, name: &str) -> String {
    values.text(name).unwrap_or_default().to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl Form for LoginForm {
    fn schema() -> &'static Schema {
        &LOGIN_SCHEMA
    }

    fn to_values(&self) -> FormValues {
        FormValues::new()
            .with_text("username", self.username.as_str())
            .with_text("password", self.password.as_str())
    }

    fn from_values(values: &FormValues) -> Self {
        Self {
            username: text_or_empty(values, "username"),
            password: text_or_empty(values, "password"),
        }
    }
}

impl From<LoginForm> for LoginRequest {
    fn from(form: LoginForm) -> Self {
        LoginRequest {
            username: form.username,
            password: form.password,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Form for RegisterForm {
    fn schema() -> &'static Schema {
        &REGISTER_SCHEMA
    }

    fn to_values(&self) -> FormValues {
        FormValues::new()
            .with_text("username", self.username.as_str())
            .with_text("email", self.email.as_str())
            .with_text("password", self.password.as_str())
    }

    fn from_values(values: &FormValues) -> Self {
        Self {
            username: text_or_empty(values, "username"),
            email: text_or_empty(values, "email"),
            password: text_or_empty(values, "password"),
        }
    }
}

impl From<RegisterForm> for RegisterRequest {
    fn from(form: RegisterForm) -> Self {
        RegisterRequest {
            username: form.username,
            email: form.email,
            password: form.password,
        }
    }
}

/// Create/edit modal contents. Nullable entity fields are edited as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OshiGroupForm {
    pub group_name: String,
    pub company: String,
    pub description: String,
}

impl OshiGroupForm {
    /// Pre-fill from an existing group.
    pub fn from_group(group: &OshiGroup) -> Self {
        Self {
            group_name: group.group_name.clone(),
            company: group.company.clone().unwrap_or_default(),
            description: group.description.clone().unwrap_or_default(),
        }
    }
}

impl Form for OshiGroupForm {
    fn schema() -> &'static Schema {
        &OSHI_GROUP_FORM_SCHEMA
    }

    fn to_values(&self) -> FormValues {
        FormValues::new()
            .with_text("groupName", self.group_name.as_str())
            .with_text("company", self.company.as_str())
            .with_text("description", self.description.as_str())
    }

    fn from_values(values: &FormValues) -> Self {
        Self {
            group_name: text_or_empty(values, "groupName"),
            company: text_or_empty(values, "company"),
            description: text_or_empty(values, "description"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchModeForm {
    pub full: bool,
    pub fuzzy: bool,
}

impl Form for SearchModeForm {
    fn schema() -> &'static Schema {
        &SEARCH_MODE_SCHEMA
    }

    fn to_values(&self) -> FormValues {
        FormValues::new()
            .with_flag("full", self.full)
            .with_flag("fuzzy", self.fuzzy)
    }

    fn from_values(values: &FormValues) -> Self {
        Self {
            full: values.flag("full").unwrap_or_default(),
            fuzzy: values.flag("fuzzy").unwrap_or_default(),
        }
    }
}
