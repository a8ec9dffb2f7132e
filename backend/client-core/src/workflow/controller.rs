use super::state::{Effect, SearchCriteria, SearchForm, WorkflowState};

use crate::api::OshiGroupApi;
use crate::error::{ApiError, WorkflowError};
use crate::validation::OshiGroupForm;

use models::{GroupId, OshiGroup};

use log::debug;

/// One group page: the workflow state plus the API it drives.
///
/// Async operations take `&mut self`, so at most one backend call per page is
/// ever outstanding.
pub struct GroupPage<A: OshiGroupApi> {
    api: A,
    state: WorkflowState,
}

impl<A: OshiGroupApi> GroupPage<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: WorkflowState::new(),
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn search_form_mut(&mut self) -> &mut SearchForm {
        &mut self.state.search_form
    }

    pub fn form_mut(&mut self) -> Option<&mut OshiGroupForm> {
        self.state.form_mut()
    }

    /// Run the search in the search form and show its result.
    pub async fn search(&mut self) -> Result<(), WorkflowError> {
        let effect = self.state.submit_search()?;
        self.run(effect).await
    }

    pub fn open_create(&mut self) -> Result<(), WorkflowError> {
        self.state.open_create()
    }

    pub fn open_edit(&mut self, group_id: GroupId) -> Result<(), WorkflowError> {
        self.state.open_edit(group_id)
    }

    pub fn close_modal(&mut self) -> Result<(), WorkflowError> {
        self.state.close_modal()
    }

    /// Save the modal form. A successful save refetches the list.
    pub async fn submit(&mut self) -> Result<(), WorkflowError> {
        let effect = self.state.submit_modal()?;
        self.run(effect).await
    }

    pub fn dismiss_search_error(&mut self) {
        self.state.dismiss_search_error();
    }

    pub fn dismiss_modal_error(&mut self) {
        self.state.dismiss_modal_error();
    }

    async fn run(&mut self, mut effect: Option<Effect>) -> Result<(), WorkflowError> {
        while let Some(current) = effect.take() {
            debug!("Running effect: {:?}", current);

            effect = match current {
                Effect::Search(criteria) => {
                    let result = self.fetch(&criteria).await;
                    self.state.finish_search(result)?;
                    None
                }
                Effect::Create(request) => {
                    let result = self.api.create(&request).await;
                    self.state.finish_submit(result)?
                }
                Effect::Update(request) => {
                    let result = self.api.update(&request).await;
                    self.state.finish_submit(result)?
                }
            };
        }

        Ok(())
    }

    async fn fetch(&self, criteria: &SearchCriteria) -> Result<Vec<OshiGroup>, ApiError> {
        match criteria {
            SearchCriteria::Company { query } => self.api.list_by_company(query).await,
            SearchCriteria::GroupName {
                exact,
                fuzzy,
                query,
            } => self.api.list_by_group_name(*exact, *fuzzy, query).await,
        }
    }
}
