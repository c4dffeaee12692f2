// src/workflow/error.rs
use super::Stage;
use crate::core::ApiError;

/// Failure of a workflow transition. Every variant leaves the session
/// interactive so the user can retry, go back, or reset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    /// Required input missing; caught before any network call.
    #[error("Missing required fields: {}", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    #[error("Unsupported resume format: {0}")]
    UnsupportedResume(String),

    /// Another transition is still waiting on the service.
    #[error("A request is already in progress")]
    Busy,

    #[error("Cannot {action} while {actual}")]
    InvalidStage {
        action: &'static str,
        actual: Stage,
    },

    #[error("No profile has been created yet")]
    MissingProfile,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl WorkflowError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WorkflowError::Validation { .. } | WorkflowError::UnsupportedResume(_)
        )
    }
}
