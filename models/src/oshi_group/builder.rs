use crate::error::model_error::ModelError;
use crate::{CreateOshiGroupRequest, ErrorLocation, GroupId, UpdateOshiGroupRequest};

use std::panic::Location;

/// Builder for create/update request bodies.
///
/// Optional text fields given as empty strings are dropped, so the request
/// omits them instead of sending `""`. The backend treats "not provided" and
/// "empty" differently.
#[derive(Debug, Default, Clone)]
pub struct OshiGroupRequestBuilder {
    group_id: Option<GroupId>,
    group_name: Option<String>,
    company: Option<String>,
    description: Option<String>,
}

impl OshiGroupRequestBuilder {
    pub fn with_group_id(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn with_group_name(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = Some(group_name.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = non_empty(company.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_empty(description.into());
        self
    }

    /// Build a create body.
    #[track_caller]
    pub fn build_create(self) -> Result<CreateOshiGroupRequest, ModelError> {
        let group_name = require_group_name(self.group_name)?;

        Ok(CreateOshiGroupRequest {
            group_name,
            company: self.company,
            description: self.description,
        })
    }

    /// Build an update body. The group id is required and must be positive.
    #[track_caller]
    pub fn build_update(self) -> Result<UpdateOshiGroupRequest, ModelError> {
        let group_id = self.group_id.ok_or_else(|| ModelError::Validation {
            field: "groupId",
            message: String::from("Group id is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if group_id <= 0 {
            return Err(ModelError::Validation {
                field: "groupId",
                message: format!("Group id must be positive, got {group_id}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let group_name = require_group_name(self.group_name)?;

        Ok(UpdateOshiGroupRequest {
            group_id,
            group_name,
            company: self.company,
            description: self.description,
        })
    }
}

#[track_caller]
fn require_group_name(group_name: Option<String>) -> Result<String, ModelError> {
    match group_name {
        Some(name) if !name.is_empty() => Ok(name),
        Some(_) => Err(ModelError::Validation {
            field: "groupName",
            message: String::from("Group name cannot be empty"),
            location: ErrorLocation::from(Location::caller()),
        }),
        None => Err(ModelError::Validation {
            field: "groupName",
            message: String::from("Group name is required"),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
