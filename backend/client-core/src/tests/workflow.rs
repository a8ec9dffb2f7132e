use super::support::{Call, FakeGroupApi, group};

use crate::error::api::NETWORK_ERROR_MESSAGE;
use crate::error::{ApiError, WorkflowError};
use crate::validation::schemas::{GROUP_NAME_REQUIRED, SEARCH_MODE_CONFLICT};
use crate::workflow::banner::CHECK_INPUT_MESSAGE;
use crate::workflow::{Effect, GroupPage, SearchCriteria, SearchKind, Status, WorkflowState};

use models::ApiErrorBody;

use std::collections::BTreeMap;
use std::sync::Arc;

fn page_with(groups: Vec<models::OshiGroup>) -> (GroupPage<Arc<FakeGroupApi>>, Arc<FakeGroupApi>) {
    let api = Arc::new(FakeGroupApi::with_groups(groups));
    (GroupPage::new(api.clone()), api)
}

fn seeded() -> Vec<models::OshiGroup> {
    vec![
        group(1, "ホロライブ", Some("カバー株式会社")),
        group(2, "にじさんじ", Some("ANYCOLOR株式会社")),
        group(3, "ホロスターズ", Some("カバー株式会社")),
    ]
}

/// **VALUE**: Scenario B. Contradictory search modes are rejected locally.
///
/// **WHY THIS MATTERS**: The backend's answer to `full=true&fuzzy=true` is
/// undefined; the request must never be sent.
///
/// **BUG THIS CATCHES**: Sending the request and only validating the response,
/// or leaving stale results visible next to the error.
#[tokio::test]
async fn given_both_modes_selected_when_searching_then_rejected_with_zero_calls() {
    // GIVEN: A page that already shows results
    let (mut page, api) = page_with(seeded());
    page.search_form_mut().query = "ホロ".to_string();
    page.search_form_mut().select_fuzzy();
    page.search().await.unwrap();
    assert_eq!(page.state().groups().len(), 2);

    // WHEN: Both modes are forced on and the search is submitted
    page.search_form_mut().full = true;
    page.search_form_mut().fuzzy = true;
    page.search().await.unwrap();

    // THEN: Conflict message, list cleared, no extra call
    let banner = page.state().search_error().expect("banner expected");
    assert_eq!(banner.message, SEARCH_MODE_CONFLICT);
    assert!(banner.status.is_none(), "Local failures carry no status");
    assert!(page.state().groups().is_empty());
    assert_eq!(api.calls().len(), 1);
    assert_eq!(page.state().status(), &Status::ListShown);
}

#[test]
fn given_radio_controls_when_selecting_then_other_mode_is_cleared() {
    let mut state = WorkflowState::new();
    assert!(state.search_form.full && !state.search_form.fuzzy);

    state.search_form.select_fuzzy();
    assert!(!state.search_form.full && state.search_form.fuzzy);

    state.search_form.select_full();
    assert!(state.search_form.full && !state.search_form.fuzzy);
}

/// **VALUE**: Company searches carry no match-mode flags at all.
///
/// **BUG THIS CATCHES**: Running the mode refinement on company searches, which
/// would reject a company search whenever the hidden radios are inconsistent.
#[tokio::test]
async fn given_company_search_when_modes_conflict_then_still_sent_without_flags() {
    let (mut page, api) = page_with(seeded());
    let form = page.search_form_mut();
    form.kind = SearchKind::Company;
    form.full = true;
    form.fuzzy = true;
    form.query = "カバー".to_string();

    page.search().await.unwrap();

    assert_eq!(api.calls(), vec![Call::ListByCompany("カバー".to_string())]);
    assert_eq!(page.state().groups().len(), 2);
    assert!(page.state().search_error().is_none());
}

#[tokio::test]
async fn given_fuzzy_group_name_search_when_run_then_flags_and_query_are_sent() {
    let (mut page, api) = page_with(seeded());
    page.search_form_mut().select_fuzzy();
    page.search_form_mut().query = "ホロ".to_string();

    page.search().await.unwrap();

    assert_eq!(
        api.calls(),
        vec![Call::ListByGroupName {
            full: false,
            fuzzy: true,
            query: "ホロ".to_string(),
        }]
    );
    assert_eq!(
        page.state().last_criteria(),
        Some(&SearchCriteria::GroupName {
            exact: false,
            fuzzy: true,
            query: "ホロ".to_string(),
        })
    );
}

/// **VALUE**: Scenario C. An empty group name never reaches the backend.
///
/// **BUG THIS CATCHES**: Building the create request before validating, or
/// closing the modal on a local failure.
#[tokio::test]
async fn given_empty_group_name_when_submitting_create_then_field_error_and_zero_calls() {
    // GIVEN: An open create modal with an empty form
    let (mut page, api) = page_with(Vec::new());
    page.open_create().unwrap();

    // WHEN: Submitting
    page.submit().await.unwrap();

    // THEN: Field error under groupName, modal still open, nothing sent
    let modal = page.state().modal().expect("modal stays open");
    assert_eq!(
        modal.field_errors.get("groupName").map(String::as_str),
        Some(GROUP_NAME_REQUIRED)
    );
    assert_eq!(
        modal.error.as_ref().map(|banner| banner.message.as_str()),
        Some(CHECK_INPUT_MESSAGE)
    );
    assert!(page.state().can_submit());
    assert!(api.calls().is_empty());
}

/// **VALUE**: Scenario D. A successful create closes the modal and refetches
/// with the previous criteria.
///
/// **WHY THIS MATTERS**: The list must reflect server truth (ids, timestamps),
/// not a locally patched copy.
///
/// **BUG THIS CATCHES**: Appending the created entity locally instead of
/// refetching, or refetching with the modal's values instead of the search.
#[tokio::test]
async fn given_prior_search_when_create_succeeds_then_modal_closes_and_list_is_refetched() {
    // GIVEN: A fuzzy search for "ホロ"
    let (mut page, api) = page_with(seeded());
    page.search_form_mut().select_fuzzy();
    page.search_form_mut().query = "ホロ".to_string();
    page.search().await.unwrap();

    // AND: The search box has since been edited but not submitted
    page.search_form_mut().query = "関係ない".to_string();

    // WHEN: Creating a new matching group
    page.open_create().unwrap();
    let form = page.form_mut().unwrap();
    form.group_name = "ホロライブEN".to_string();
    form.company = String::new();
    page.submit().await.unwrap();

    // THEN: Create sent without empty optional fields, then the old search again
    let calls = api.calls();
    assert_eq!(calls.len(), 3);
    match &calls[1] {
        Call::Create(request) => {
            assert_eq!(request.group_name, "ホロライブEN");
            assert_eq!(request.company, None);
            assert_eq!(request.description, None);
        }
        other => panic!("expected create, got {other:?}"),
    }
    assert_eq!(calls[2], calls[0], "Refetch repeats the last search");

    assert!(page.state().modal().is_none());
    assert_eq!(page.state().status(), &Status::ListShown);
    assert_eq!(page.state().groups().len(), 3);
}

#[tokio::test]
async fn given_no_prior_search_when_create_succeeds_then_refetch_uses_search_form() {
    let (mut page, api) = page_with(Vec::new());
    page.search_form_mut().query = "新グループ".to_string();

    page.open_create().unwrap();
    page.form_mut().unwrap().group_name = "新グループ".to_string();
    page.submit().await.unwrap();

    assert_eq!(
        api.calls().last(),
        Some(&Call::ListByGroupName {
            full: true,
            fuzzy: false,
            query: "新グループ".to_string(),
        })
    );
    assert_eq!(page.state().groups().len(), 1);
}

/// **VALUE**: Scenario E. Server field errors land under the matching field
/// and the form survives.
///
/// **BUG THIS CATCHES**: Closing the modal or resetting the form on a server
/// rejection, which would throw away the user's edits.
#[tokio::test]
async fn given_server_field_error_when_update_fails_then_modal_keeps_form_and_field_message() {
    // GIVEN: A listed group opened for editing
    let (mut page, api) = page_with(seeded());
    page.search_form_mut().query = "ホロライブ".to_string();
    page.search().await.unwrap();
    page.open_edit(1).unwrap();
    assert_eq!(page.form_mut().unwrap().company, "カバー株式会社");

    // AND: The server will reject the update
    let mut fields = BTreeMap::new();
    fields.insert("groupName".to_string(), "既に使用されています".to_string());
    fields.insert("userId".to_string(), "不正です".to_string());
    api.fail_next_write(ApiError::from_body(ApiErrorBody {
        status: 400,
        message: "入力エラー".to_string(),
        errors: Some(fields),
    }));

    // WHEN: Submitting an edited name
    page.form_mut().unwrap().group_name = "にじさんじ".to_string();
    page.submit().await.unwrap();

    // THEN: Back in modal-open with everything preserved
    let modal = page.state().modal().expect("modal stays open");
    assert!(matches!(page.state().status(), Status::ModalOpen(_)));
    assert!(modal.is_edit());
    assert_eq!(modal.form.group_name, "にじさんじ");
    assert_eq!(modal.form.company, "カバー株式会社");
    assert_eq!(
        modal.field_errors.get("groupName").map(String::as_str),
        Some("既に使用されています")
    );
    let banner = modal.error.as_ref().unwrap();
    assert!(banner.message.starts_with("入力エラー"));
    assert!(banner.message.contains("userId: 不正です"));
    assert_eq!(banner.status.map(|s| s.as_u16()), Some(400));

    // AND: No refetch happened
    assert!(matches!(api.calls().last(), Some(Call::Update(_))));
}

/// **VALUE**: Scenario F for search. Transport failures surface as status 0
/// with the generic message and clear the list.
#[tokio::test]
async fn given_network_failure_when_searching_then_generic_message_and_list_cleared() {
    let (mut page, api) = page_with(seeded());
    page.search_form_mut().query = "ホロライブ".to_string();
    page.search().await.unwrap();
    assert_eq!(page.state().groups().len(), 1);

    api.fail_next_list(ApiError::network("connection refused"));
    page.search().await.unwrap();

    let banner = page.state().search_error().unwrap();
    assert_eq!(banner.message, NETWORK_ERROR_MESSAGE);
    assert!(banner.is_network_failure());
    assert!(page.state().groups().is_empty());
}

/// **VALUE**: Scenario F for submit. The form survives a transport failure.
#[tokio::test]
async fn given_network_failure_when_creating_then_form_is_preserved() {
    let (mut page, api) = page_with(Vec::new());
    page.open_create().unwrap();
    page.form_mut().unwrap().group_name = "ぶいすぽっ！".to_string();
    api.fail_next_write(ApiError::network("timed out"));

    page.submit().await.unwrap();

    let modal = page.state().modal().unwrap();
    assert_eq!(modal.form.group_name, "ぶいすぽっ！");
    assert!(modal.error.as_ref().unwrap().is_network_failure());
    assert!(modal.field_errors.is_empty());
}

/// **VALUE**: Saving an unchanged edit sends the same values and yields the
/// same entity.
#[tokio::test]
async fn given_unchanged_edit_when_submitted_then_update_carries_original_values() {
    let (mut page, api) = page_with(seeded());
    page.search_form_mut().query = "にじさんじ".to_string();
    page.search().await.unwrap();
    let before = page.state().groups().to_vec();

    page.open_edit(2).unwrap();
    page.submit().await.unwrap();

    match &api.calls()[1] {
        Call::Update(request) => {
            assert_eq!(request.group_id, 2);
            assert_eq!(request.group_name, "にじさんじ");
            assert_eq!(request.company.as_deref(), Some("ANYCOLOR株式会社"));
            assert_eq!(request.description, None);
        }
        other => panic!("expected update, got {other:?}"),
    }
    assert_eq!(page.state().groups(), before.as_slice());
}

/// **VALUE**: Only one call may be in flight per page.
///
/// **BUG THIS CATCHES**: A double-clicked search issuing two overlapping
/// requests whose results race into the list.
#[test]
fn given_search_in_flight_when_triggering_again_then_busy() {
    let mut state = WorkflowState::new();
    state.search_form.query = "x".to_string();

    let effect = state.submit_search().unwrap();
    assert!(matches!(effect, Some(Effect::Search(_))));
    assert!(!state.can_search());

    assert!(matches!(state.submit_search(), Err(WorkflowError::Busy { .. })));
    assert!(matches!(state.open_create(), Err(WorkflowError::Busy { .. })));
}

#[test]
fn given_submit_in_flight_when_closing_or_resubmitting_then_busy() {
    let mut state = WorkflowState::new();
    state.open_create().unwrap();
    state.form_mut().unwrap().group_name = "A".to_string();

    let effect = state.submit_modal().unwrap();
    assert!(matches!(effect, Some(Effect::Create(_))));
    assert!(state.is_submitting());
    assert!(state.form_mut().is_none(), "Form is locked while submitting");

    assert!(matches!(state.submit_modal(), Err(WorkflowError::Busy { .. })));
    assert!(matches!(state.close_modal(), Err(WorkflowError::Busy { .. })));
}

#[test]
fn given_unlisted_group_when_opening_edit_then_unknown_group() {
    let mut state = WorkflowState::new();

    let result = state.open_edit(42);

    assert!(matches!(
        result,
        Err(WorkflowError::UnknownGroup { group_id: 42, .. })
    ));
    assert_eq!(state.status(), &Status::Idle);
}

#[test]
fn given_open_modal_when_cancelled_then_form_and_errors_are_discarded() {
    let mut state = WorkflowState::new();
    state.open_create().unwrap();
    state.submit_modal().unwrap();
    assert!(state.modal().unwrap().error.is_some());

    state.close_modal().unwrap();
    assert_eq!(state.status(), &Status::Idle);

    state.open_create().unwrap();
    let modal = state.modal().unwrap();
    assert!(modal.error.is_none());
    assert!(modal.field_errors.is_empty());
    assert!(modal.form.group_name.is_empty());
}

#[test]
fn given_finish_without_request_when_applied_then_invalid_transition() {
    let mut state = WorkflowState::new();

    assert!(matches!(
        state.finish_search(Ok(Vec::new())),
        Err(WorkflowError::InvalidTransition { .. })
    ));
    assert!(matches!(
        state.finish_submit(Err(ApiError::network("x"))),
        Err(WorkflowError::InvalidTransition { .. })
    ));
}

#[test]
fn given_search_error_when_dismissed_then_banner_is_cleared() {
    let mut state = WorkflowState::new();
    state.search_form.fuzzy = true;
    assert!(state.submit_search().unwrap().is_none());
    assert!(state.search_error().is_some());

    state.dismiss_search_error();

    assert!(state.search_error().is_none());
}
