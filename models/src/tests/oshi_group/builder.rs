use crate::{ModelError, OshiGroupRequestBuilder};

/// **VALUE**: Verifies that empty optional fields are dropped from create bodies.
///
/// **WHY THIS MATTERS**: The backend distinguishes "not provided" from "empty".
/// Sending `"company": ""` would overwrite data the user never touched.
///
/// **BUG THIS CATCHES**: Would catch if `non_empty()` is bypassed and the builder
/// stores empty strings as `Some("")`.
#[test]
fn given_empty_optional_fields_when_building_create_then_fields_are_absent() {
    // GIVEN: Builder with empty company and description
    let builder = OshiGroupRequestBuilder::default()
        .with_group_name("Aqours")
        .with_company("")
        .with_description("");

    // WHEN: Building a create body
    let request = builder.build_create().unwrap();

    // THEN: Optional fields are None and absent from the JSON
    assert_eq!(request.company, None);
    assert_eq!(request.description, None);
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json, serde_json::json!({ "groupName": "Aqours" }));
}

/// **VALUE**: Verifies the persisted-record invariant: group name is never empty.
///
/// **BUG THIS CATCHES**: Would catch if the builder lets an empty name through,
/// creating a request the server would reject.
#[test]
fn given_empty_group_name_when_building_create_then_returns_validation_error() {
    let result = OshiGroupRequestBuilder::default()
        .with_group_name("")
        .build_create();

    match result {
        Err(ModelError::Validation { field, message, .. }) => {
            assert_eq!(field, "groupName");
            assert_eq!(message, "Group name cannot be empty");
        }
        Ok(request) => panic!("Expected validation error, got {request:?}"),
    }
}

#[test]
fn given_missing_group_name_when_building_create_then_returns_validation_error() {
    let result = OshiGroupRequestBuilder::default().build_create();

    match result {
        Err(ModelError::Validation { field, message, .. }) => {
            assert_eq!(field, "groupName");
            assert_eq!(message, "Group name is required");
        }
        Ok(request) => panic!("Expected validation error, got {request:?}"),
    }
}

/// **VALUE**: Verifies that update bodies require a group id.
///
/// **WHY THIS MATTERS**: Update is keyed by id. Without it the server cannot know
/// which record to change.
#[test]
fn given_missing_group_id_when_building_update_then_returns_validation_error() {
    let result = OshiGroupRequestBuilder::default()
        .with_group_name("μ's")
        .build_update();

    match result {
        Err(ModelError::Validation { field, .. }) => assert_eq!(field, "groupId"),
        Ok(request) => panic!("Expected validation error, got {request:?}"),
    }
}

#[test]
fn given_non_positive_group_id_when_building_update_then_returns_validation_error() {
    let result = OshiGroupRequestBuilder::default()
        .with_group_id(0)
        .with_group_name("μ's")
        .build_update();

    assert!(result.is_err());
}

/// **VALUE**: Verifies the update wire shape (`groupId` plus camelCase fields).
#[test]
fn given_complete_fields_when_building_update_then_serializes_camel_case() {
    // GIVEN: All fields set
    let request = OshiGroupRequestBuilder::default()
        .with_group_id(7)
        .with_group_name("Liella!")
        .with_company("Lantis")
        .with_description("5人組")
        .build_update()
        .unwrap();

    // WHEN: Serializing
    let json = serde_json::to_value(&request).unwrap();

    // THEN: camelCase keys, every field present
    assert_eq!(
        json,
        serde_json::json!({
            "groupId": 7,
            "groupName": "Liella!",
            "company": "Lantis",
            "description": "5人組"
        })
    );
}
