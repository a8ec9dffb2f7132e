use common::ErrorLocation;
use models::GroupId;

use std::panic::Location;

use thiserror::Error as ThisError;

/// A trigger the workflow refused to act on.
///
/// The UI normally prevents these (disabled buttons, hidden controls); the
/// workflow still rejects them so no request is ever issued from a wrong state.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum WorkflowError {
    #[error("Workflow Busy Error: {action} while {in_flight} is in flight {location}")]
    Busy {
        action: &'static str,
        in_flight: &'static str,
        location: ErrorLocation,
    },

    #[error("Workflow Transition Error: cannot {action} from {from} {location}")]
    InvalidTransition {
        action: &'static str,
        from: &'static str,
        location: ErrorLocation,
    },

    #[error("Workflow Target Error: group {group_id} is not in the current list {location}")]
    UnknownGroup {
        group_id: GroupId,
        location: ErrorLocation,
    },
}

impl WorkflowError {
    #[track_caller]
    pub fn busy(action: &'static str, in_flight: &'static str) -> Self {
        WorkflowError::Busy {
            action,
            in_flight,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_transition(action: &'static str, from: &'static str) -> Self {
        WorkflowError::InvalidTransition {
            action,
            from,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unknown_group(group_id: GroupId) -> Self {
        WorkflowError::UnknownGroup {
            group_id,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
