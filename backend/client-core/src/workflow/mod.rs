//! The oshi group page: search, list, create/edit modal.
//!
//! # Architecture
//!
//! - [`state`]: the explicit workflow state and its pure transitions. Each
//!   transition that needs the network returns an [`Effect`] instead of
//!   performing it.
//! - [`controller`]: [`GroupPage`] executes effects against an
//!   [`crate::api::OshiGroupApi`] and feeds the results back into the state.
//! - [`banner`]: the dismissible error shown on the search surface or in the modal.
//!
//! ```text
//! idle / list-shown --search--> searching --result--> list-shown
//! list-shown --open--> modal-open --submit--> submitting --ok--> searching (refetch)
//!                                                         \--err--> modal-open
//! ```

pub mod banner;
pub mod controller;
pub mod display;
pub mod state;

pub use banner::ErrorBanner;
pub use controller::GroupPage;
pub use state::{
    Effect, Modal, ModalMode, SearchCriteria, SearchForm, SearchKind, Status, WorkflowState,
};
