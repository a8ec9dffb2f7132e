use crate::helpers::{Harness, group_json};

use oshikatsu::Outcome;
use oshikatsu::cli::{Command, GroupFieldArgs, GroupsCommand, SearchArgs};

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fuzzy(query: &str) -> SearchArgs {
    SearchArgs {
        query: query.to_string(),
        fuzzy: true,
        ..SearchArgs::default()
    }
}

/// **VALUE**: Both match modes on the command line hit the workflow's
/// conflict check; nothing is sent.
#[tokio::test]
async fn given_full_and_fuzzy_when_searching_then_conflict_message_and_no_request() {
    let server = MockServer::start().await;
    let harness = Harness::new(&server.uri()).signed_in();

    let command = Command::Groups(GroupsCommand::Search(SearchArgs {
        query: "ホロ".to_string(),
        full: true,
        fuzzy: true,
        ..SearchArgs::default()
    }));
    let (outcome, output) = harness.run(&command).await;

    assert_eq!(outcome, Outcome::Rejected);
    assert!(output.contains("全文一致とあいまい検索は同時に選択できません"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn given_no_results_when_searching_then_no_match_hint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/oshi-groups/list-company"))
        .and(query_param("company", "存在しない"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    let harness = Harness::new(&server.uri()).signed_in();

    let command = Command::Groups(GroupsCommand::Search(SearchArgs {
        query: "存在しない".to_string(),
        by_company: true,
        ..SearchArgs::default()
    }));
    let (outcome, output) = harness.run(&command).await;

    assert_eq!(outcome, Outcome::Done);
    assert_eq!(output, "該当するグループはありません\n");
}

/// **VALUE**: Scenario C end to end: an empty group name never leaves the CLI.
#[tokio::test]
async fn given_missing_group_name_when_creating_then_modal_errors_and_no_request() {
    let server = MockServer::start().await;
    let harness = Harness::new(&server.uri()).signed_in();

    let command = Command::Groups(GroupsCommand::Create {
        search: SearchArgs::default(),
        fields: GroupFieldArgs::default(),
    });
    let (outcome, output) = harness.run(&command).await;

    assert_eq!(outcome, Outcome::Rejected);
    assert!(output.contains("推しグループを新規作成"));
    assert!(output.contains("! グループ名を入力してください"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

/// **VALUE**: Scenario D end to end: create, then refetch with the search.
///
/// **BUG THIS CATCHES**: Printing the created entity without refetching, or
/// sending empty optional fields.
#[tokio::test]
async fn given_search_and_new_group_when_creating_then_created_and_list_is_refetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/oshi-groups/list-group"))
        .and(query_param("fuzzy", "true"))
        .and(query_param("groupName", "ホロ"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([group_json(1, "ホロライブ", None)])),
        )
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/oshi-groups/create"))
        .and(body_json(json!({"groupName": "ホロスターズ"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(group_json(2, "ホロスターズ", None)),
        )
        .expect(1)
        .mount(&server)
        .await;
    let harness = Harness::new(&server.uri()).signed_in();

    let command = Command::Groups(GroupsCommand::Create {
        search: fuzzy("ホロ"),
        fields: GroupFieldArgs {
            group_name: Some("ホロスターズ".to_string()),
            company: Some(String::new()),
            description: None,
        },
    });
    let (outcome, output) = harness.run(&command).await;

    assert_eq!(outcome, Outcome::Done, "{output}");
    assert!(output.contains("保存しました"));
    assert!(output.contains("[1] ホロライブ"));
}

/// **VALUE**: A save whose refetch fails still reports the failure through
/// the exit code.
///
/// **WHY THIS MATTERS**: Scripts check the exit code; the list printed after
/// the save is an error banner, not the data.
///
/// **BUG THIS CATCHES**: Returning success once the write went through,
/// regardless of the list that follows it.
#[tokio::test]
async fn given_refetch_failure_when_creating_then_saved_but_rejected() {
    // GIVEN: Create succeeds, the follow-up company search fails
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/oshi-groups/create"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(group_json(3, "ぶいすぽっ", None)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/oshi-groups/list-company"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "status": 500,
            "message": "一覧を取得できません"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let harness = Harness::new(&server.uri()).signed_in();

    // WHEN: Creating with an empty company search as the refetch criteria
    let command = Command::Groups(GroupsCommand::Create {
        search: SearchArgs {
            by_company: true,
            ..SearchArgs::default()
        },
        fields: GroupFieldArgs {
            group_name: Some("ぶいすぽっ".to_string()),
            ..GroupFieldArgs::default()
        },
    });
    let (outcome, output) = harness.run(&command).await;

    // THEN: The save is reported, the banner is shown, and the outcome is a rejection
    assert!(output.contains("保存しました"), "{output}");
    assert!(output.contains("一覧を取得できません"), "{output}");
    assert_eq!(outcome, Outcome::Rejected);
}

/// **VALUE**: Scenario E end to end: the server's field error is shown under
/// the field and the command reports a rejection.
#[tokio::test]
async fn given_server_field_error_when_editing_then_field_message_is_rendered() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/oshi-groups/list-group"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([group_json(4, "にじさんじ", Some("ANYCOLOR"))])),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/oshi-groups/update"))
        .and(body_json(json!({
            "groupId": 4,
            "groupName": "ホロライブ",
            "company": "ANYCOLOR"
        })))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": 400,
            "message": "入力エラー",
            "errors": {"groupName": "既に登録されています"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let harness = Harness::new(&server.uri()).signed_in();

    let command = Command::Groups(GroupsCommand::Edit {
        id: 4,
        search: fuzzy("にじ"),
        fields: GroupFieldArgs {
            group_name: Some("ホロライブ".to_string()),
            ..GroupFieldArgs::default()
        },
    });
    let (outcome, output) = harness.run(&command).await;

    assert_eq!(outcome, Outcome::Rejected);
    assert!(output.contains("推しグループを編集"));
    assert!(output.contains("エラー: 入力エラー (HTTP 400)"));
    assert!(output.contains("グループ名: ホロライブ"));
    assert!(output.contains("! 既に登録されています"));
    assert!(output.contains("会社: ANYCOLOR"));
}

#[tokio::test]
async fn given_id_not_in_results_when_editing_then_rejected_without_update() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/oshi-groups/list-group"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let harness = Harness::new(&server.uri()).signed_in();

    let command = Command::Groups(GroupsCommand::Edit {
        id: 99,
        search: fuzzy("x"),
        fields: GroupFieldArgs::default(),
    });
    let (outcome, output) = harness.run(&command).await;

    assert_eq!(outcome, Outcome::Rejected);
    assert!(output.contains("ID 99"));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn given_json_flag_when_searching_then_list_is_printed_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/oshi-groups/list-group"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([group_json(1, "ホロライブ", None)])),
        )
        .mount(&server)
        .await;
    let harness = Harness::new(&server.uri()).signed_in();

    let command = Command::Groups(GroupsCommand::Search(fuzzy("ホロ")));
    let (outcome, output) = harness.run_with(&command, true).await;

    assert_eq!(outcome, Outcome::Done);
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed[0]["groupName"], "ホロライブ");
}
