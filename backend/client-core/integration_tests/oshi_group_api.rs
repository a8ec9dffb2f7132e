use crate::helpers::{TEST_TOKEN, group_json, signed_in_client};

use client_core::api::OshiGroupApi;

use models::{CreateOshiGroupRequest, UpdateOshiGroupRequest};

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Group-name search sends both mode flags and the query.
///
/// **BUG THIS CATCHES**: Unencoded Japanese queries or a missing `fuzzy=false`.
#[tokio::test]
async fn given_group_name_search_when_listing_then_query_params_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/oshi-groups/list-group"))
        .and(query_param("full", "false"))
        .and(query_param("fuzzy", "true"))
        .and(query_param("groupName", "ホロ ライブ"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([group_json(1, "ホロ ライブ", Some("カバー"))])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server.uri());
    let groups = client
        .list_by_group_name(false, true, "ホロ ライブ")
        .await
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].company.as_deref(), Some("カバー"));
}

#[tokio::test]
async fn given_company_search_when_listing_then_only_company_param_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/oshi-groups/list-company"))
        .and(query_param("company", "カバー株式会社"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server.uri());
    let groups = client.list_by_company("カバー株式会社").await.unwrap();

    assert!(groups.is_empty());
    let received = server.received_requests().await.unwrap();
    let query = received[0].url.query().unwrap_or_default();
    assert!(!query.contains("full"));
    assert!(!query.contains("fuzzy"));
}

/// **VALUE**: Absent optional fields are omitted from the create body.
///
/// **WHY THIS MATTERS**: The backend distinguishes "not provided" from `""`
/// and `null`.
///
/// **BUG THIS CATCHES**: Serializing `None` as `null`.
#[tokio::test]
async fn given_create_without_optionals_when_posting_then_body_has_group_name_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/oshi-groups/create"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"groupName": "ぶいすぽっ！"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(group_json(9, "ぶいすぽっ！", None)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server.uri());
    let request = CreateOshiGroupRequest {
        group_name: "ぶいすぽっ！".to_string(),
        company: None,
        description: None,
    };
    let created = client.create(&request).await.unwrap();

    assert_eq!(created.id, 9);
    assert_eq!(created.company, None);
}

#[tokio::test]
async fn given_update_when_posting_then_group_id_is_in_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/oshi-groups/update"))
        .and(body_json(json!({
            "groupId": 3,
            "groupName": "にじさんじ",
            "company": "ANYCOLOR"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(group_json(3, "にじさんじ", Some("ANYCOLOR"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server.uri());
    let request = UpdateOshiGroupRequest {
        group_id: 3,
        group_name: "にじさんじ".to_string(),
        company: Some("ANYCOLOR".to_string()),
        description: None,
    };
    let updated = client.update(&request).await.unwrap();

    assert_eq!(updated.group_name, "にじさんじ");
}
