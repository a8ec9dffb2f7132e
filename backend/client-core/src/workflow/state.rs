//! Workflow state for the oshi group page.
//!
//! All transitions are synchronous and side-effect free. A transition that
//! needs the backend returns an [`Effect`]; the caller performs it and hands
//! the result to the matching `finish_*` transition.

use super::banner::{CHECK_INPUT_MESSAGE, ErrorBanner};

use crate::error::{ApiError, WorkflowError};
use crate::validation::schemas::OSHI_GROUP_FORM_SCHEMA;
use crate::validation::{OshiGroupForm, SearchModeForm, ValidationErrors, validate_form};

use models::{
    CreateOshiGroupRequest, GroupId, OshiGroup, OshiGroupRequestBuilder, UpdateOshiGroupRequest,
};

use std::collections::BTreeMap;

use log::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchKind {
    #[default]
    GroupName,
    Company,
}

/// The search controls as the user left them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    pub kind: SearchKind,
    pub full: bool,
    pub fuzzy: bool,
    pub query: String,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            kind: SearchKind::GroupName,
            full: true,
            fuzzy: false,
            query: String::new(),
        }
    }
}

impl SearchForm {
    /// Radio behavior: choosing full match clears fuzzy.
    pub fn select_full(&mut self) {
        self.full = true;
        self.fuzzy = false;
    }

    /// Radio behavior: choosing fuzzy clears full match.
    pub fn select_fuzzy(&mut self) {
        self.fuzzy = true;
        self.full = false;
    }

    pub fn criteria(&self) -> SearchCriteria {
        match self.kind {
            SearchKind::Company => SearchCriteria::Company {
                query: self.query.clone(),
            },
            SearchKind::GroupName => SearchCriteria::GroupName {
                exact: self.full,
                fuzzy: self.fuzzy,
                query: self.query.clone(),
            },
        }
    }
}

/// One search request. The two shapes are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCriteria {
    /// Substring match on company; no exact/fuzzy flags exist for it.
    Company { query: String },
    GroupName {
        exact: bool,
        fuzzy: bool,
        query: String,
    },
}

impl SearchCriteria {
    /// Exactly one of `exact`/`fuzzy` for group-name searches.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            SearchCriteria::Company { .. } => Ok(()),
            SearchCriteria::GroupName { exact, fuzzy, .. } => {
                validate_form(&SearchModeForm {
                    full: *exact,
                    fuzzy: *fuzzy,
                })?;
                Ok(())
            }
        }
    }

    pub fn query(&self) -> &str {
        match self {
            SearchCriteria::Company { query } | SearchCriteria::GroupName { query, .. } => query,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit(OshiGroup),
}

/// The create/edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub mode: ModalMode,
    pub form: OshiGroupForm,
    pub field_errors: BTreeMap<String, String>,
    pub error: Option<ErrorBanner>,
}

impl Modal {
    fn create() -> Self {
        Self {
            mode: ModalMode::Create,
            form: OshiGroupForm::default(),
            field_errors: BTreeMap::new(),
            error: None,
        }
    }

    fn edit(target: &OshiGroup) -> Self {
        Self {
            mode: ModalMode::Edit(target.clone()),
            form: OshiGroupForm::from_group(target),
            field_errors: BTreeMap::new(),
            error: None,
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, ModalMode::Edit(_))
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            ModalMode::Create => "推しグループを新規作成",
            ModalMode::Edit(_) => "推しグループを編集",
        }
    }

    fn clear_errors(&mut self) {
        self.field_errors.clear();
        self.error = None;
    }

    fn reject(&mut self, errors: ValidationErrors) {
        self.error = Some(ErrorBanner::from_message(
            errors.first_form_error().unwrap_or(CHECK_INPUT_MESSAGE),
        ));
        self.field_errors = errors.field_errors;
    }

    /// Build the request body from an already validated form.
    fn to_effect(&self, form: &OshiGroupForm) -> Result<Effect, ValidationErrors> {
        let builder = OshiGroupRequestBuilder::default()
            .with_group_name(form.group_name.as_str())
            .with_company(form.company.as_str())
            .with_description(form.description.as_str());

        let built = match &self.mode {
            ModalMode::Create => builder.build_create().map(Effect::Create),
            ModalMode::Edit(target) => builder
                .with_group_id(target.id)
                .build_update()
                .map(Effect::Update),
        };

        built.map_err(|e| {
            warn!("Request body rejected after validation: {}", e);
            let models::ModelError::Validation { field, .. } = e;
            let mut errors = ValidationErrors::default();
            errors
                .field_errors
                .insert(field.to_string(), CHECK_INPUT_MESSAGE.to_string());
            errors
        })
    }
}

/// Where the page is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    Searching(SearchCriteria),
    ListShown,
    ModalOpen(Modal),
    Submitting(Modal),
}

impl Status {
    pub fn name(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Searching(_) => "searching",
            Status::ListShown => "list-shown",
            Status::ModalOpen(_) => "modal-open",
            Status::Submitting(_) => "submitting",
        }
    }
}

/// A backend call a transition asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Search(SearchCriteria),
    Create(CreateOshiGroupRequest),
    Update(UpdateOshiGroupRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowState {
    pub search_form: SearchForm,
    last_criteria: Option<SearchCriteria>,
    groups: Vec<OshiGroup>,
    search_error: Option<ErrorBanner>,
    status: Status,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowState {
    pub fn new() -> Self {
        Self {
            search_form: SearchForm::default(),
            last_criteria: None,
            groups: Vec::new(),
            search_error: None,
            status: Status::Idle,
        }
    }

    // ============================================
    // ACCESSORS
    // ============================================

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn groups(&self) -> &[OshiGroup] {
        &self.groups
    }

    pub fn search_error(&self) -> Option<&ErrorBanner> {
        self.search_error.as_ref()
    }

    pub fn last_criteria(&self) -> Option<&SearchCriteria> {
        self.last_criteria.as_ref()
    }

    pub fn modal(&self) -> Option<&Modal> {
        match &self.status {
            Status::ModalOpen(modal) | Status::Submitting(modal) => Some(modal),
            _ => None,
        }
    }

    /// Editable form while the modal is open and not submitting.
    pub fn form_mut(&mut self) -> Option<&mut OshiGroupForm> {
        match &mut self.status {
            Status::ModalOpen(modal) => Some(&mut modal.form),
            _ => None,
        }
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.status, Status::Searching(_))
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.status, Status::Submitting(_))
    }

    /// Search button state.
    pub fn can_search(&self) -> bool {
        matches!(self.status, Status::Idle | Status::ListShown)
    }

    /// Modal save button state.
    pub fn can_submit(&self) -> bool {
        matches!(self.status, Status::ModalOpen(_))
    }

    // ============================================
    // SEARCH TRANSITIONS
    // ============================================

    /// `idle/list-shown → searching`, or straight to `list-shown` with an
    /// error when the search mode is invalid (no effect returned).
    #[track_caller]
    pub fn submit_search(&mut self) -> Result<Option<Effect>, WorkflowError> {
        self.ensure_resting("search")?;
        let criteria = self.search_form.criteria();
        Ok(self.begin_search(criteria))
    }

    /// `searching → list-shown`. The list is replaced, never merged.
    #[track_caller]
    pub fn finish_search(
        &mut self,
        result: Result<Vec<OshiGroup>, ApiError>,
    ) -> Result<(), WorkflowError> {
        if !self.is_searching() {
            return Err(WorkflowError::invalid_transition(
                "finish search",
                self.status.name(),
            ));
        }

        match result {
            Ok(groups) => {
                info!("Search returned {} group(s)", groups.len());
                self.groups = groups;
            }
            Err(e) => {
                warn!("Search failed: {}", e);
                self.groups.clear();
                self.search_error = Some(ErrorBanner::from_api(&e));
            }
        }

        self.status = Status::ListShown;
        Ok(())
    }

    pub fn dismiss_search_error(&mut self) {
        self.search_error = None;
    }

    fn begin_search(&mut self, criteria: SearchCriteria) -> Option<Effect> {
        self.search_error = None;

        if let Err(errors) = criteria.validate() {
            debug!("Search rejected locally: {}", errors);
            self.groups.clear();
            self.search_error = Some(ErrorBanner::from_validation(&errors));
            self.status = Status::ListShown;
            return None;
        }

        self.last_criteria = Some(criteria.clone());
        self.status = Status::Searching(criteria.clone());
        Some(Effect::Search(criteria))
    }

    // ============================================
    // MODAL TRANSITIONS
    // ============================================

    /// `list-shown → modal-open(create)` with an empty form.
    #[track_caller]
    pub fn open_create(&mut self) -> Result<(), WorkflowError> {
        self.ensure_resting("open create")?;
        self.status = Status::ModalOpen(Modal::create());
        Ok(())
    }

    /// `list-shown → modal-open(edit)` pre-filled from a listed group.
    #[track_caller]
    pub fn open_edit(&mut self, group_id: GroupId) -> Result<(), WorkflowError> {
        self.ensure_resting("open edit")?;

        let target = self
            .groups
            .iter()
            .find(|group| group.id == group_id)
            .ok_or_else(|| WorkflowError::unknown_group(group_id))?;

        self.status = Status::ModalOpen(Modal::edit(target));
        Ok(())
    }

    /// Cancel: discard the form and its errors.
    #[track_caller]
    pub fn close_modal(&mut self) -> Result<(), WorkflowError> {
        match self.status {
            Status::ModalOpen(_) => {
                self.status = self.resting_status();
                Ok(())
            }
            Status::Submitting(_) => Err(WorkflowError::busy("close modal", "submit")),
            _ => Err(WorkflowError::invalid_transition(
                "close modal",
                self.status.name(),
            )),
        }
    }

    pub fn dismiss_modal_error(&mut self) {
        if let Status::ModalOpen(modal) = &mut self.status {
            modal.error = None;
        }
    }

    /// `modal-open → submitting`, or stay in `modal-open` with errors when the
    /// form is invalid (no effect returned).
    #[track_caller]
    pub fn submit_modal(&mut self) -> Result<Option<Effect>, WorkflowError> {
        let modal = match &mut self.status {
            Status::ModalOpen(modal) => modal,
            Status::Submitting(_) => return Err(WorkflowError::busy("submit", "submit")),
            other => return Err(WorkflowError::invalid_transition("submit", other.name())),
        };

        modal.clear_errors();

        let effect = match validate_form(&modal.form).and_then(|form| modal.to_effect(&form)) {
            Ok(effect) => effect,
            Err(errors) => {
                debug!("Group form rejected locally: {}", errors);
                modal.reject(errors);
                return Ok(None);
            }
        };

        let modal = modal.clone();
        self.status = Status::Submitting(modal);
        Ok(Some(effect))
    }

    /// `submitting → searching` (refetch) on success, back to `modal-open`
    /// with the form intact on failure.
    #[track_caller]
    pub fn finish_submit(
        &mut self,
        result: Result<OshiGroup, ApiError>,
    ) -> Result<Option<Effect>, WorkflowError> {
        let Status::Submitting(modal) = &self.status else {
            return Err(WorkflowError::invalid_transition(
                "finish submit",
                self.status.name(),
            ));
        };
        let mut modal = modal.clone();

        match result {
            Ok(saved) => {
                info!("Saved group {} ({})", saved.id, saved.group_name);
                self.status = self.resting_status();

                let criteria = self
                    .last_criteria
                    .clone()
                    .unwrap_or_else(|| self.search_form.criteria());
                Ok(self.begin_search(criteria))
            }
            Err(e) => {
                warn!("Save failed: {}", e);
                let banner = ErrorBanner::from_api_with_fields(
                    &e,
                    |field| OSHI_GROUP_FORM_SCHEMA.has_field(field),
                    &mut modal.field_errors,
                );
                modal.error = Some(banner);
                self.status = Status::ModalOpen(modal);
                Ok(None)
            }
        }
    }

    // ============================================
    // HELPERS
    // ============================================

    #[track_caller]
    fn ensure_resting(&self, action: &'static str) -> Result<(), WorkflowError> {
        match self.status {
            Status::Idle | Status::ListShown => Ok(()),
            Status::Searching(_) => Err(WorkflowError::busy(action, "search")),
            Status::Submitting(_) => Err(WorkflowError::busy(action, "submit")),
            Status::ModalOpen(_) => Err(WorkflowError::invalid_transition(
                action,
                self.status.name(),
            )),
        }
    }

    fn resting_status(&self) -> Status {
        if self.last_criteria.is_some() || self.search_error.is_some() {
            Status::ListShown
        } else {
            Status::Idle
        }
    }
}
